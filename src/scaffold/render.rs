//! Scaffold rendering
//!
//! Turns extracted declaration facts into Jasmine-style spec code. Rendering
//! is a pure function of its inputs: the same facts always produce the same
//! bytes.

use crate::extraction::{Constructor, Parameter, SpecConfig, TestMethod};

/// Import line for the Angular async test helpers used by the templates
pub const ASYNC_HELPERS_IMPORT: &str =
    "import { async, fakeAsync, tick } from '@angular/core/testing';";

const INDENT: &str = "  ";

/// Render tests, wrapping them in a `describe` group when there is more than
/// one
pub fn render(
    import_statement: Option<&str>,
    class_name: Option<&str>,
    constructor: Option<&Constructor>,
    tests: &[TestMethod],
) -> String {
    let layout = Layout {
        grouped: tests.len() > 1,
        group_title: class_name.unwrap_or_default(),
    };
    render_with(import_statement, class_name, constructor, tests, &layout)
}

/// Render a [`SpecConfig`], grouping under the class name (or the spec file's
/// base name) when there is more than one test
pub fn render_spec(spec: &SpecConfig) -> String {
    let fallback_title = spec
        .file_name
        .rsplit(['/', '\\'])
        .next()
        .and_then(|name| name.split('.').next())
        .unwrap_or_default();

    let layout = Layout {
        grouped: spec.tests.len() > 1,
        group_title: spec.class_name.as_deref().unwrap_or(fallback_title),
    };

    render_with(
        spec.import_statement.as_deref(),
        spec.class_name.as_deref(),
        spec.constructor.as_ref(),
        &spec.tests,
        &layout,
    )
}

struct Layout<'a> {
    grouped: bool,
    group_title: &'a str,
}

/// Opening/closing form of one `it` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TestForm {
    Sync,
    Async,
    /// `fakeAsync` with a trailing `tick()`
    FakeAsync,
}

impl TestForm {
    fn for_method(test: &TestMethod) -> Self {
        let streams = test
            .return_value
            .is_some_and(|value| value.is_promise || value.is_observable);

        if streams {
            TestForm::Async
        } else if test.is_async {
            TestForm::FakeAsync
        } else {
            TestForm::Sync
        }
    }

    fn opening(self) -> &'static str {
        match self {
            TestForm::Sync => "() => {",
            TestForm::Async => "async(() => {",
            TestForm::FakeAsync => "fakeAsync(() => {",
        }
    }

    fn closing(self) -> &'static str {
        match self {
            TestForm::Sync => "});",
            TestForm::Async | TestForm::FakeAsync => "}));",
        }
    }
}

/// Line writer that tracks indentation
#[derive(Default)]
struct CodeWriter {
    text: String,
    depth: usize,
}

impl CodeWriter {
    fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        for _ in 0..self.depth {
            self.text.push_str(INDENT);
        }
        self.text.push_str(line.as_ref());
        self.text.push('\n');
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.text.push('\n');
        self
    }

    fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }
}

fn render_with(
    import_statement: Option<&str>,
    class_name: Option<&str>,
    constructor: Option<&Constructor>,
    tests: &[TestMethod],
    layout: &Layout,
) -> String {
    let mut body = CodeWriter::default();
    let instance = class_name.map(lower_first);
    let class_ref = class_name.or(constructor.map(|ctor| ctor.name.as_str()));
    let ctor_params: &[Parameter] = constructor.map_or(&[], |ctor| ctor.params.as_slice());

    if layout.grouped {
        body.line(format!(
            "describe('{}', () => {{",
            split_words(layout.group_title)
        ))
        .indent();

        if let (Some(instance), Some(class_name)) = (instance.as_deref(), class_name) {
            body.line(format!("let {instance}: {class_name};"));
        }
        for param in ctor_params {
            body.line(format!("let {};", param.name));
        }
        body.blank();

        if let (Some(ctor), false) = (constructor, ctor_params.is_empty()) {
            let target = instance.as_deref().unwrap_or("instance");
            body.line("beforeEach(() => {").indent();
            for param in ctor_params {
                body.line(format!(
                    "{name} = jasmine.createSpyObj('{name}', ['']);",
                    name = param.name
                ));
            }
            let args = ctor_params
                .iter()
                .map(|param| param.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            body.line(format!("{target} = new {}({args});", ctor.name));
            body.dedent().line("});").blank();
        }
    }

    for (index, test) in tests.iter().enumerate() {
        render_test(&mut body, test, instance.as_deref(), class_ref, layout.grouped);
        if index + 1 < tests.len() {
            body.blank();
        }
    }

    if layout.grouped {
        body.dedent().line("});");
    }

    let mut output = String::new();
    output.push_str(ASYNC_HELPERS_IMPORT);
    output.push('\n');
    if let Some(import) = import_statement.map(str::trim_end).filter(|s| !s.is_empty()) {
        output.push_str(import);
        output.push('\n');
    }
    output.push('\n');
    output.push_str(&body.text);
    output
}

fn render_test(
    out: &mut CodeWriter,
    test: &TestMethod,
    instance: Option<&str>,
    class_ref: Option<&str>,
    force_failure: bool,
) {
    let form = TestForm::for_method(test);
    out.line(format!("it('{}', {}", split_words(&test.name), form.opening()))
        .indent();

    let bindings: Vec<ParamBinding> = test.params.iter().map(bind_parameter).collect();
    for (param, binding) in test.params.iter().zip(&bindings) {
        match &param.type_text {
            Some(type_text) => out.line(format!("let {}; // {type_text}", binding.declared)),
            None => out.line(format!("let {};", binding.declared)),
        };
    }

    let args = bindings
        .iter()
        .map(|binding| binding.argument.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let call = format!("{}({args})", call_target(test, instance, class_ref));

    match test.return_value {
        Some(value) if value.is_promise => {
            out.line(&call)
                .line(".then(result => {")
                .indent()
                .line("expect(result).toBeDefined();")
                .dedent()
                .line("});");
        }
        Some(value) if value.is_observable => {
            out.line(&call)
                .line(".subscribe(result => {")
                .indent()
                .line("expect(result).toBeDefined();")
                .dedent()
                .line("});");
        }
        Some(_) => {
            out.line(format!("let result = {call};"))
                .line("expect(result).toBeDefined();");
        }
        None => {
            out.line(format!("{call};"));
        }
    }

    if form == TestForm::FakeAsync {
        out.line("tick();");
    }

    if force_failure {
        out.line("fail('not implemented');");
    }

    out.dedent().line(form.closing());
}

/// How one parameter is declared in the test body and passed to the call
struct ParamBinding {
    declared: String,
    argument: String,
}

fn bind_parameter(param: &Parameter) -> ParamBinding {
    if !param.is_destructured() {
        return ParamBinding {
            declared: param.name.clone(),
            argument: param.name.clone(),
        };
    }
    let object_pattern = param
        .identifiers
        .first()
        .is_some_and(|identifier| identifier.is_object_pattern);

    let type_variable = param.type_text.as_deref().and_then(type_variable_name);

    let mut declared: Vec<String> = Vec::new();
    for identifier in &param.identifiers {
        let name = match (&type_variable, identifier.is_object_pattern) {
            (Some(variable), true) => variable.clone(),
            _ => identifier.name.clone(),
        };
        if !declared.contains(&name) {
            declared.push(name);
        }
    }

    let names = param
        .identifiers
        .iter()
        .map(|identifier| identifier.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let argument = match (object_pattern, type_variable) {
        (true, Some(variable)) => variable,
        (true, None) => format!("{{ {names} }}"),
        (false, _) => format!("[{names}]"),
    };

    ParamBinding {
        declared: declared.join(", "),
        argument,
    }
}

fn call_target(test: &TestMethod, instance: Option<&str>, class_ref: Option<&str>) -> String {
    let target = if test.is_private {
        instance.map(|instance| format!("{instance}['{}']", test.name))
    } else if test.is_static {
        class_ref.map(|class_name| format!("{class_name}.{}", test.name))
    } else {
        instance.map(|instance| format!("{instance}.{}", test.name))
    };

    target.unwrap_or_else(|| test.name.clone())
}

/// Variable name for an object-destructured parameter, from its type:
/// `Options` → `options`, `Partial<Foo>` → `partial`
fn type_variable_name(type_text: &str) -> Option<String> {
    let head: String = type_text
        .trim()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();

    if head.is_empty() || head.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(lower_first(&head))
}

/// `FooBar` → `foo bar`; every uppercase letter starts a new word
pub fn split_words(text: &str) -> String {
    let mut words = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if c.is_uppercase() && !words.is_empty() {
            words.push(' ');
        }
        words.extend(c.to_lowercase());
    }
    words
}

pub fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
