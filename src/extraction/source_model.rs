//! Tree queries over a parsed TypeScript/JavaScript file
//!
//! [`SourceModel`] pairs a tree-sitter [`Tree`] with the text it was parsed
//! from and exposes the handful of searches the extractor needs: the
//! innermost node at a caret, descendants and ancestors of interesting
//! declaration kinds, and value-returning `return` statements within one
//! function scope.

use tree_sitter::{Node, Tree};

/// Declaration kinds the extractor cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    EnumMember,
    /// Function declarations, including `declare function` signatures
    Function,
    Method,
    MethodSignature,
    Property,
    PropertySignature,
    /// `get`/`set` accessors
    Accessor,
    Constructor,
    ArrowFunction,
    FunctionExpression,
}

impl DeclKind {
    /// The full allow-list of interesting kinds
    pub const ALL: &'static [DeclKind] = &[
        DeclKind::Class,
        DeclKind::Interface,
        DeclKind::Enum,
        DeclKind::EnumMember,
        DeclKind::Function,
        DeclKind::Method,
        DeclKind::MethodSignature,
        DeclKind::Property,
        DeclKind::PropertySignature,
        DeclKind::Accessor,
        DeclKind::Constructor,
        DeclKind::ArrowFunction,
        DeclKind::FunctionExpression,
    ];

    /// Kinds a caret request can generate a test for
    pub const METHODS: &'static [DeclKind] = &[
        DeclKind::Method,
        DeclKind::Function,
        DeclKind::MethodSignature,
        DeclKind::Constructor,
    ];

    /// Kinds collected by whole-file generation
    pub const TESTABLE: &'static [DeclKind] = &[
        DeclKind::Function,
        DeclKind::Method,
        DeclKind::MethodSignature,
    ];

    /// Kinds that carry a name usable as a test title
    pub const NAMED_CALLABLES: &'static [DeclKind] = &[
        DeclKind::Method,
        DeclKind::Function,
        DeclKind::MethodSignature,
    ];
}

/// Node kinds that open a new function scope
const SCOPE_BOUNDARIES: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
];

/// A parsed source file plus tree queries
#[derive(Clone, Copy)]
pub struct SourceModel<'a> {
    tree: &'a Tree,
    source: &'a str,
}

impl<'a> SourceModel<'a> {
    pub fn new(tree: &'a Tree, source: &'a str) -> Self {
        Self { tree, source }
    }

    pub fn root(&self) -> Node<'a> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Source text covered by `node`
    pub fn text(&self, node: Node<'a>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Text of the node's `name` field, if it has one
    pub fn name_of(&self, node: Node<'a>) -> Option<&'a str> {
        node.child_by_field_name("name").map(|name| self.text(name))
    }

    /// Classify a node against the declaration allow-list
    pub fn kind_of(&self, node: Node<'a>) -> Option<DeclKind> {
        // Keyword tokens share kind names with expressions ("class", "function")
        if !node.is_named() {
            return None;
        }

        match node.kind() {
            "class_declaration" | "abstract_class_declaration" | "class" => Some(DeclKind::Class),
            "interface_declaration" => Some(DeclKind::Interface),
            "enum_declaration" => Some(DeclKind::Enum),
            "enum_assignment" => Some(DeclKind::EnumMember),
            "property_identifier"
                if node.parent().is_some_and(|parent| parent.kind() == "enum_body") =>
            {
                Some(DeclKind::EnumMember)
            }
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                Some(DeclKind::Function)
            }
            "method_definition" => {
                if self.name_of(node) == Some("constructor") {
                    Some(DeclKind::Constructor)
                } else if self.has_modifier(node, "get") || self.has_modifier(node, "set") {
                    Some(DeclKind::Accessor)
                } else {
                    Some(DeclKind::Method)
                }
            }
            "abstract_method_signature" => Some(DeclKind::Method),
            "method_signature" => Some(DeclKind::MethodSignature),
            "public_field_definition" | "field_definition" => Some(DeclKind::Property),
            "property_signature" => Some(DeclKind::PropertySignature),
            "arrow_function" => Some(DeclKind::ArrowFunction),
            "function_expression" | "function" | "generator_function" => {
                Some(DeclKind::FunctionExpression)
            }
            _ => None,
        }
    }

    pub fn is_of_kind(&self, node: Node<'a>, kinds: &[DeclKind]) -> bool {
        self.kind_of(node).is_some_and(|kind| kinds.contains(&kind))
    }

    /// Whether `node` carries `keyword` among its own modifier tokens
    /// (`static`, `async`, `get`, or an accessibility keyword like `private`)
    pub fn has_modifier(&self, node: Node<'a>, keyword: &str) -> bool {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).any(|child| {
            child.kind() == keyword
                || (child.kind() == "accessibility_modifier" && self.text(child) == keyword)
        });
        found
    }

    /// Whether the declaration is wrapped in an `export` statement
    pub fn is_exported(&self, node: Node<'a>) -> bool {
        node.parent()
            .is_some_and(|parent| parent.kind() == "export_statement")
    }

    /// Innermost node whose span contains `offset` (end inclusive)
    ///
    /// Every containing node on the root-to-leaf path is visited and the last
    /// one wins, so the result is the deepest match rather than the first.
    pub fn find_child_at_position(&self, offset: usize) -> Option<Node<'a>> {
        let mut last_match = None;
        collect_containing(self.root(), offset, &mut last_match);
        last_match
    }

    /// All descendants of the given kinds, in source order
    pub fn find_descendants_of_kind(&self, node: Node<'a>, kinds: &[DeclKind]) -> Vec<Node<'a>> {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        push_children(&mut stack, node);

        while let Some(current) = stack.pop() {
            if self.is_of_kind(current, kinds) {
                found.push(current);
            }
            push_children(&mut stack, current);
        }

        found
    }

    /// Closest proper ancestor of the given kinds
    pub fn find_nearest_ancestor_of_kind(
        &self,
        node: Node<'a>,
        kinds: &[DeclKind],
    ) -> Option<Node<'a>> {
        let mut current = node.parent();
        while let Some(parent) = current {
            if self.is_of_kind(parent, kinds) {
                return Some(parent);
            }
            current = parent.parent();
        }
        None
    }

    /// Like [`Self::find_descendants_of_kind`], minus `private` members and
    /// class/interface/function declarations that are not exported
    pub fn find_visible_descendants_of_kind(
        &self,
        node: Node<'a>,
        kinds: &[DeclKind],
    ) -> Vec<Node<'a>> {
        self.find_descendants_of_kind(node, kinds)
            .into_iter()
            .filter(|child| {
                if self.has_modifier(*child, "private") {
                    return false;
                }

                match self.kind_of(*child) {
                    Some(DeclKind::Class | DeclKind::Interface | DeclKind::Function) => {
                        self.is_exported(*child)
                    }
                    _ => true,
                }
            })
            .collect()
    }

    /// A `return` statement with a value, owned by `node`'s own scope
    ///
    /// Nested functions, arrows and methods are not searched.
    pub fn find_non_void_return_in_scope(&self, node: Node<'a>) -> Option<Node<'a>> {
        let mut stack = Vec::new();
        push_children(&mut stack, node);

        while let Some(current) = stack.pop() {
            if current.kind() == "return_statement" {
                if returns_value(current) {
                    return Some(current);
                }
                continue;
            }

            if SCOPE_BOUNDARIES.contains(&current.kind()) {
                continue;
            }

            push_children(&mut stack, current);
        }

        None
    }

    /// Byte offset of a 1-indexed line/column, clamped to the line's length
    pub fn offset_for_position(&self, line: u32, column: u32) -> usize {
        offset_for_position(self.source, line, column)
    }
}

/// Byte offset of a 1-indexed line/column within `source`
///
/// Lines past the end resolve to the end of the text; columns past the end of
/// a line resolve to the end of that line.
pub fn offset_for_position(source: &str, line: u32, column: u32) -> usize {
    let target_line = line.max(1) as usize - 1;
    let column = column.max(1) as usize - 1;

    let mut line_start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index == target_line {
            let content_len = text.trim_end_matches(['\n', '\r']).len();
            return line_start + column.min(content_len);
        }
        line_start += text.len();
    }

    source.len()
}

fn collect_containing<'a>(node: Node<'a>, offset: usize, last_match: &mut Option<Node<'a>>) {
    if node.start_byte() > offset {
        return;
    }

    if node.end_byte() >= offset {
        *last_match = Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.start_byte() > offset {
            break;
        }
        collect_containing(child, offset, last_match);
    }
}

fn push_children<'a>(stack: &mut Vec<Node<'a>>, node: Node<'a>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
    stack.extend(children.into_iter().rev());
}

fn returns_value(return_statement: Node) -> bool {
    let mut cursor = return_statement.walk();
    let has_value = return_statement
        .named_children(&mut cursor)
        .any(|child| child.kind() != "comment");
    has_value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_code, Language};

    const SERVICE: &str = r#"import { Logger } from './logger';

export class OrderService {
  private cache: Map<string, number>;

  constructor(private logger: Logger) {}

  get size(): number {
    return this.cache.size;
  }

  total(items: number[]): number {
    const add = (a: number, b: number) => {
      return a + b;
    };
    return items.reduce(add, 0);
  }

  private reset(): void {
    [1, 2].forEach(function (n) {
      return n;
    });
    return;
  }
}

class Hidden {}

function helper() {}

export function exported() {}
"#;

    fn with_model<T>(source: &str, f: impl FnOnce(SourceModel) -> T) -> T {
        let tree = parse_code(source, Language::TypeScript).expect("Failed to parse");
        let model = SourceModel::new(&tree, source);
        f(model)
    }

    #[test]
    fn test_find_child_at_position_returns_innermost_node() {
        with_model(SERVICE, |model| {
            let offset = SERVICE.find("a + b").unwrap();
            let node = model.find_child_at_position(offset).expect("node");
            assert_eq!(node.kind(), "identifier");
            assert_eq!(model.text(node), "a");
        });
    }

    #[test]
    fn test_find_child_at_position_past_end_is_none() {
        with_model(SERVICE, |model| {
            assert!(model.find_child_at_position(SERVICE.len() + 10).is_none());
        });
    }

    #[test]
    fn test_find_descendants_of_kind_in_source_order() {
        with_model(SERVICE, |model| {
            let methods = model.find_descendants_of_kind(model.root(), DeclKind::TESTABLE);
            let names: Vec<_> = methods
                .iter()
                .filter_map(|node| model.name_of(*node))
                .collect();
            assert_eq!(names, vec!["total", "reset", "helper", "exported"]);
        });
    }

    #[test]
    fn test_kind_of_distinguishes_constructor_and_accessor() {
        with_model(SERVICE, |model| {
            let ctor = model
                .find_descendants_of_kind(model.root(), &[DeclKind::Constructor])
                .into_iter()
                .next()
                .expect("constructor");
            assert_eq!(model.name_of(ctor), Some("constructor"));

            let accessor = model
                .find_descendants_of_kind(model.root(), &[DeclKind::Accessor])
                .into_iter()
                .next()
                .expect("accessor");
            assert_eq!(model.name_of(accessor), Some("size"));
        });
    }

    #[test]
    fn test_find_nearest_ancestor_of_kind() {
        with_model(SERVICE, |model| {
            let offset = SERVICE.find("a + b").unwrap();
            let node = model.find_child_at_position(offset).unwrap();

            let arrow = model
                .find_nearest_ancestor_of_kind(node, DeclKind::ALL)
                .expect("arrow");
            assert_eq!(model.kind_of(arrow), Some(DeclKind::ArrowFunction));

            let method = model
                .find_nearest_ancestor_of_kind(node, DeclKind::METHODS)
                .expect("method");
            assert_eq!(model.name_of(method), Some("total"));
        });
    }

    #[test]
    fn test_find_visible_descendants_skips_private_and_unexported() {
        with_model(SERVICE, |model| {
            let visible =
                model.find_visible_descendants_of_kind(model.root(), &[
                    DeclKind::Class,
                    DeclKind::Function,
                    DeclKind::Method,
                    DeclKind::Property,
                ]);
            let names: Vec<_> = visible
                .iter()
                .filter_map(|node| model.name_of(*node))
                .collect();
            assert_eq!(names, vec!["OrderService", "total", "exported"]);
        });
    }

    #[test]
    fn test_non_void_return_ignores_nested_scopes() {
        with_model(SERVICE, |model| {
            let methods = model.find_descendants_of_kind(model.root(), &[DeclKind::Method]);
            let total = methods[0];
            let reset = methods[1];

            let found = model.find_non_void_return_in_scope(total).expect("return");
            assert_eq!(model.text(found), "return items.reduce(add, 0);");
            assert!(model.find_non_void_return_in_scope(reset).is_none());
        });
    }

    #[test]
    fn test_offset_for_position_clamps_column() {
        let source = "ab\ncdef\n";
        assert_eq!(offset_for_position(source, 1, 1), 0);
        assert_eq!(offset_for_position(source, 2, 3), 5);
        assert_eq!(offset_for_position(source, 1, 99), 2);
        assert_eq!(offset_for_position(source, 9, 1), source.len());
    }
}
