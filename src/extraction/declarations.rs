//! Declaration extraction
//!
//! Pulls the class name, constructor and classified methods out of a
//! [`SourceModel`], either for the declaration under a caret or for a whole
//! file.

use super::source_model::{DeclKind, SourceModel};
use super::types::{Constructor, Identifier, Parameter, TestMethod, TestMethodReturnValue};
use regex::Regex;
use std::sync::OnceLock;
use tree_sitter::Node;

/// Result of resolving a caret position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaretTarget {
    /// The caret is not on or inside any supported declaration
    NoDeclaration,
    /// The caret is inside a declaration, but not inside a method or function
    NoMethod,
    Method(TestMethod),
}

/// Which pattern a destructured name is bound in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    Array,
    Object,
}

/// Name of the first named class in the file; anonymous class expressions
/// are skipped
pub fn extract_class_name(model: &SourceModel) -> Option<String> {
    model
        .find_descendants_of_kind(model.root(), &[DeclKind::Class])
        .into_iter()
        .find_map(|class| model.name_of(class))
        .map(str::to_string)
}

/// First constructor that belongs to a class, named after that class
pub fn extract_constructor(model: &SourceModel) -> Option<Constructor> {
    model
        .find_descendants_of_kind(model.root(), &[DeclKind::Constructor])
        .into_iter()
        .find_map(|node| convert_constructor(model, node))
}

fn convert_constructor<'a>(model: &SourceModel<'a>, node: Node<'a>) -> Option<Constructor> {
    let class = model.find_nearest_ancestor_of_kind(node, &[DeclKind::Class])?;
    let name = model.name_of(class)?.to_string();

    Some(Constructor {
        name,
        params: convert_parameters(model, node),
    })
}

/// Build the test facts for one method, function or method signature
pub fn classify_method<'a>(model: &SourceModel<'a>, node: Node<'a>) -> TestMethod {
    let text = model.text(node);

    TestMethod {
        name: method_name(model, node),
        params: convert_parameters(model, node),
        return_value: classify_return_value(model, node),
        is_async: looks_asynchronous(text),
        is_private: model.has_modifier(node, "private"),
        is_static: model.has_modifier(node, "static"),
    }
}

/// Best-effort async detection from raw method text
///
/// Matches `Observable`, `.subscribe(`, `Promise` or `then` anywhere in the
/// text, comments and strings included.
pub fn looks_asynchronous(text: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"(Observable|\.subscribe\(|Promise|then)").expect("valid async pattern")
        })
        .is_match(text)
}

/// Resolve the declaration under `offset` to a test method
pub fn method_at_position(model: &SourceModel, offset: usize) -> CaretTarget {
    let Some(node) = model.find_child_at_position(offset) else {
        return CaretTarget::NoDeclaration;
    };

    let declaration = if model.is_of_kind(node, DeclKind::ALL) {
        Some(node)
    } else {
        model.find_nearest_ancestor_of_kind(node, DeclKind::ALL)
    };

    let Some(declaration) = declaration else {
        return CaretTarget::NoDeclaration;
    };

    let method = if model.is_of_kind(declaration, DeclKind::METHODS) {
        Some(declaration)
    } else {
        model.find_nearest_ancestor_of_kind(declaration, DeclKind::METHODS)
    };

    match method {
        Some(method) => CaretTarget::Method(classify_method(model, method)),
        None => CaretTarget::NoMethod,
    }
}

/// Every method, function and method signature in the file, in source order
///
/// With `exported_only`, private members and unexported functions are left
/// out.
pub fn collect_methods(model: &SourceModel, exported_only: bool) -> Vec<TestMethod> {
    let nodes = if exported_only {
        model.find_visible_descendants_of_kind(model.root(), DeclKind::TESTABLE)
    } else {
        model.find_descendants_of_kind(model.root(), DeclKind::TESTABLE)
    };

    nodes
        .into_iter()
        .map(|node| classify_method(model, node))
        .collect()
}

/// Names of exported top-level functions, for importing into a spec file
pub fn exported_function_names(model: &SourceModel) -> Vec<String> {
    model
        .find_visible_descendants_of_kind(model.root(), &[DeclKind::Function])
        .into_iter()
        .filter_map(|node| model.name_of(node).map(str::to_string))
        .fold(Vec::new(), |mut names, name| {
            if !names.contains(&name) {
                names.push(name);
            }
            names
        })
}

fn method_name<'a>(model: &SourceModel<'a>, node: Node<'a>) -> String {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if let Some(name) = model.name_of(candidate) {
            return name.to_string();
        }
        current = model.find_nearest_ancestor_of_kind(candidate, DeclKind::NAMED_CALLABLES);
    }
    "anonymous".to_string()
}

fn classify_return_value<'a>(
    model: &SourceModel<'a>,
    node: Node<'a>,
) -> Option<TestMethodReturnValue> {
    let declared = node
        .child_by_field_name("return_type")
        .map(|annotation| annotation_text(model, annotation))
        .filter(|text| !text.is_empty());

    let declares_value = declared.as_deref().is_some_and(|text| text != "void");
    if !declares_value && model.find_non_void_return_in_scope(node).is_none() {
        return None;
    }

    Some(
        declared
            .as_deref()
            .map(TestMethodReturnValue::from_type_text)
            .unwrap_or_default(),
    )
}

/// Type text of a `: Type` annotation without the colon
fn annotation_text<'a>(model: &SourceModel<'a>, annotation: Node<'a>) -> String {
    let text = model.text(annotation).trim();
    text.strip_prefix(':').unwrap_or(text).trim().to_string()
}

fn convert_parameters<'a>(model: &SourceModel<'a>, node: Node<'a>) -> Vec<Parameter> {
    let Some(parameters) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = parameters.walk();
    let params = parameters
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| convert_parameter(model, child))
        .collect();
    params
}

fn convert_parameter<'a>(model: &SourceModel<'a>, node: Node<'a>) -> Parameter {
    let (pattern, type_text) = match node.kind() {
        "required_parameter" | "optional_parameter" => (
            node.child_by_field_name("pattern").unwrap_or(node),
            node.child_by_field_name("type")
                .map(|annotation| annotation_text(model, annotation)),
        ),
        "assignment_pattern" => (node.child_by_field_name("left").unwrap_or(node), None),
        _ => (node, None),
    };

    let name = if pattern.kind() == "rest_pattern" {
        pattern
            .named_child(0)
            .map(|inner| model.text(inner))
            .unwrap_or_else(|| model.text(pattern))
    } else {
        model.text(pattern)
    };

    let mut identifiers = Vec::new();
    collect_bound_identifiers(model, pattern, None, &mut identifiers);

    Parameter {
        name: name.to_string(),
        type_text,
        identifiers,
    }
}

/// Walk a binding pattern, recording each bound name with the pattern it
/// sits in directly. A plain identifier outside any pattern records nothing.
fn collect_bound_identifiers<'a>(
    model: &SourceModel<'a>,
    node: Node<'a>,
    enclosing: Option<PatternKind>,
    result: &mut Vec<Identifier>,
) {
    match node.kind() {
        "object_pattern" | "array_pattern" => {
            let kind = if node.kind() == "object_pattern" {
                PatternKind::Object
            } else {
                PatternKind::Array
            };
            let mut cursor = node.walk();
            let children: Vec<Node<'a>> = node.named_children(&mut cursor).collect();
            for child in children {
                collect_bound_identifiers(model, child, Some(kind), result);
            }
        }
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                collect_bound_identifiers(model, value, enclosing, result);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_bound_identifiers(model, left, enclosing, result);
            }
        }
        "rest_pattern" => {
            if let Some(inner) = node.named_child(0) {
                collect_bound_identifiers(model, inner, enclosing, result);
            }
        }
        "identifier" | "shorthand_property_identifier_pattern" => {
            if let Some(kind) = enclosing {
                result.push(Identifier {
                    name: model.text(node).to_string(),
                    is_array_pattern: kind == PatternKind::Array,
                    is_object_pattern: kind == PatternKind::Object,
                });
            }
        }
        _ => {}
    }
}
