use mockthis_mcp::analysis::{mock_everything, MockSession};
use mockthis_mcp::config::MockConfig;
use serde_json::json;
use std::fs;

mod common;

use common::helpers::{assert_balanced, assert_error_contains, assert_occurrences};

const CALCULATOR_SPEC: &str = "\
import { async, fakeAsync, tick } from '@angular/core/testing';
import { Calculator } from './calculator';

describe('calculator', () => {
  let calculator: Calculator;
  let logger;

  beforeEach(() => {
    logger = jasmine.createSpyObj('logger', ['']);
    calculator = new Calculator(logger);
  });

  it('add', () => {
    let a; // number
    let b; // number
    let result = calculator.add(a, b);
    expect(result).toBeDefined();
    fail('not implemented');
  });

  it('reset', () => {
    calculator['reset']();
    fail('not implemented');
  });

  it('create', () => {
    let logger; // Logger
    let result = Calculator.create(logger);
    expect(result).toBeDefined();
    fail('not implemented');
  });

  it('fetch total', async(() => {
    calculator.fetchTotal()
    .then(result => {
      expect(result).toBeDefined();
    });
    fail('not implemented');
  }));
});
";

#[test]
fn test_mock_everything_calculator_end_to_end() {
    // Given: A class with a constructor dependency and four methods
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/calculator.ts");
    let mut session = MockSession::new(MockConfig::default());

    // When: mock_everything is called
    let result = mock_everything::execute(
        &mut session,
        &json!({ "file_path": common::path_str(&source) }),
    )
    .unwrap();

    // Then: A new spec file holds one group covering every method
    let outcome = common::get_result_json(&result);
    let target = workspace.path().join("src/calculator.spec.ts");
    assert_eq!(outcome["target_file"], common::path_str(&target));
    assert_eq!(outcome["line"], 0);
    assert_eq!(outcome["format_requested"], true);
    assert_eq!(outcome["class_name"], "Calculator");
    assert_eq!(outcome["tests"].as_array().unwrap().len(), 4);
    assert!(outcome["target_uri"].as_str().unwrap().starts_with("file://"));

    let written = fs::read_to_string(&target).unwrap();
    assert_eq!(written, CALCULATOR_SPEC);
    assert_eq!(outcome["inserted"], CALCULATOR_SPEC);
    assert_balanced(&written);
}

#[test]
fn test_mock_everything_appends_without_duplicate_imports() {
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/calculator.ts");
    let target = workspace.path().join("src/calculator.spec.ts");
    let mut session = MockSession::new(MockConfig::default());
    let arguments = json!({ "file_path": common::path_str(&source) });

    mock_everything::execute(&mut session, &arguments).unwrap();
    let result = mock_everything::execute(&mut session, &arguments).unwrap();

    let outcome = common::get_result_json(&result);
    assert_eq!(outcome["line"], CALCULATOR_SPEC.lines().count());

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.starts_with(CALCULATOR_SPEC));
    assert_occurrences(&written, "describe('calculator', () => {", 2);
    assert_occurrences(&written, "import { Calculator } from './calculator';", 1);
    assert_occurrences(&written, "@angular/core/testing", 1);
}

#[test]
fn test_mock_everything_single_method_is_not_grouped() {
    // Given: An anonymous class expression followed by a one-method class
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/greeter.ts");
    let mut session = MockSession::new(MockConfig::default());

    // When: mock_everything is called
    let result = mock_everything::execute(
        &mut session,
        &json!({ "file_path": common::path_str(&source) }),
    )
    .unwrap();

    // Then: The named class is imported and its one test stays ungrouped
    let outcome = common::get_result_json(&result);
    assert_eq!(outcome["class_name"], "Greeter");

    let inserted = outcome["inserted"].as_str().unwrap();
    assert_eq!(
        inserted,
        "import { async, fakeAsync, tick } from '@angular/core/testing';\n\
         import { Greeter } from './greeter';\n\
         \n\
         it('greet', () => {\n\
         \x20 let result = greeter.greet();\n\
         \x20 expect(result).toBeDefined();\n\
         });\n"
    );
    assert!(!inserted.contains("describe("));
    assert!(!inserted.contains("fail("));
}

#[test]
fn test_mock_everything_destructured_and_observable_methods() {
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/order_service.ts");
    let mut session = MockSession::new(MockConfig::default());

    let result = mock_everything::execute(
        &mut session,
        &json!({ "file_path": common::path_str(&source) }),
    )
    .unwrap();
    let inserted = common::get_result_json(&result)["inserted"]
        .as_str()
        .unwrap()
        .to_string();

    assert!(inserted.contains("import { OrderService } from './order_service';"));
    assert!(inserted.contains("describe('order service', () => {"));
    assert!(inserted.contains("    http = jasmine.createSpyObj('http', ['']);\n"));
    assert!(inserted.contains("    store = jasmine.createSpyObj('store', ['']);\n"));
    assert!(inserted.contains("    orderService = new OrderService(http, store);\n"));

    // Object pattern bound to a variable named after its type
    assert!(inserted.contains("  it('list', async(() => {\n"));
    assert!(inserted.contains("    let orderQuery; // OrderQuery\n"));
    assert!(inserted.contains("    orderService.list(orderQuery)\n    .subscribe(result => {\n"));

    // Array pattern passed back as an array literal
    assert!(inserted.contains("    let first, second; // number[]\n"));
    assert!(inserted.contains("    let result = orderService.total([first, second]);\n"));

    // Subscribing body without a return value gets fakeAsync + tick
    assert!(inserted.contains("  it('refresh', fakeAsync(() => {\n"));
    assert!(inserted.contains("    orderService.refresh();\n    tick();\n"));

    // Accessors are not testable methods
    assert!(!inserted.contains("it('count'"));
    assert_occurrences(&inserted, "fail('not implemented');", 3);
    assert_balanced(&inserted);
}

#[test]
fn test_mock_everything_free_functions() {
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/utils.ts");
    let mut session = MockSession::new(MockConfig::default());

    let result = mock_everything::execute(
        &mut session,
        &json!({ "file_path": common::path_str(&source) }),
    )
    .unwrap();
    let inserted = common::get_result_json(&result)["inserted"]
        .as_str()
        .unwrap()
        .to_string();

    assert!(inserted.contains("import { slugify, clamp } from './utils';"));
    assert!(inserted.contains("describe('utils', () => {"));
    assert!(!inserted.contains("beforeEach"));
    assert!(inserted.contains("    let text; // string\n    let result = slugify(text);\n"));
    assert!(inserted.contains("let result = clamp(value, min, max);"));
    assert!(inserted.contains("    internal();\n"));
}

#[test]
fn test_mock_everything_exported_only() {
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/utils.ts");
    let mut session = MockSession::new(MockConfig::default());

    let result = mock_everything::execute(
        &mut session,
        &json!({ "file_path": common::path_str(&source), "exported_only": true }),
    )
    .unwrap();
    let outcome = common::get_result_json(&result);

    let names: Vec<&str> = outcome["tests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|test| test["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["slugify", "clamp"]);
}

#[test]
fn test_mock_everything_javascript_class() {
    let workspace = common::fixture_workspace("javascript");
    let source = workspace.path().join("src/format.js");
    let mut session = MockSession::new(MockConfig::default());

    let result = mock_everything::execute(
        &mut session,
        &json!({ "file_path": common::path_str(&source) }),
    )
    .unwrap();
    let outcome = common::get_result_json(&result);
    assert_eq!(
        outcome["target_file"],
        common::path_str(&workspace.path().join("src/format.spec.js"))
    );

    let inserted = outcome["inserted"].as_str().unwrap();
    assert!(inserted.contains("    locale = jasmine.createSpyObj('locale', ['']);\n"));
    assert!(inserted.contains("    let amount;\n    let code;\n"));
    assert!(inserted.contains("let result = formatter.currency(amount, code);"));
    assert!(inserted.contains("  it('load', fakeAsync(() => {\n"));
}

#[test]
fn test_mock_everything_prefers_existing_test_suffix() {
    // Given: foo.ts with an existing foo.test.ts and suffixes ['.spec', '.test']
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/calculator.ts");
    let existing = workspace.path().join("src/calculator.test.ts");
    fs::write(&existing, "describe('existing', () => {\n});\n").unwrap();
    let mut session = MockSession::new(MockConfig::default());

    let result = mock_everything::execute(
        &mut session,
        &json!({
            "file_path": common::path_str(&source),
            "spec_suffix": [".spec", ".test"],
            "default_extension": ".spec"
        }),
    )
    .unwrap();

    // Then: The existing .test file receives the tests
    let outcome = common::get_result_json(&result);
    assert_eq!(outcome["target_file"], common::path_str(&existing));
    assert!(!workspace.path().join("src/calculator.spec.ts").exists());

    let written = fs::read_to_string(&existing).unwrap();
    assert!(written.starts_with("describe('existing', () => {\n});\n\n"));
    assert!(written.contains("import { Calculator } from './calculator';"));
}

#[test]
fn test_mock_everything_refuses_spec_files() {
    let workspace = common::fixture_workspace("typescript");
    let spec = workspace.path().join("src/calculator.spec.ts");
    fs::write(&spec, "").unwrap();
    let mut session = MockSession::new(MockConfig::default());

    let err = mock_everything::execute(&mut session, &json!({ "file_path": common::path_str(&spec) }))
        .unwrap_err();
    assert_error_contains(&err.to_string(), "Spec files cannot be mocked", "spec file");
    assert_eq!(fs::read_to_string(&spec).unwrap(), "");
}

#[test]
fn test_mock_everything_empty_extraction() {
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/models.ts");
    let mut session = MockSession::new(MockConfig::default());

    let err = mock_everything::execute(&mut session, &json!({ "file_path": common::path_str(&source) }))
        .unwrap_err();
    assert_error_contains(&err.to_string(), "No constructor or methods found", "interfaces only");
    assert!(!workspace.path().join("src/models.spec.ts").exists());
}

#[test]
fn test_mock_everything_unsupported_file() {
    let workspace = common::fixture_workspace("typescript");
    let source = workspace.path().join("src/notes.md");
    fs::write(&source, "# notes").unwrap();
    let mut session = MockSession::new(MockConfig::default());

    let err = mock_everything::execute(&mut session, &json!({ "file_path": common::path_str(&source) }))
        .unwrap_err();
    assert_error_contains(
        &err.to_string(),
        "only supports JavaScript or TypeScript files",
        "markdown",
    );
}

#[test]
fn test_mock_everything_missing_file_path() {
    let mut session = MockSession::new(MockConfig::default());
    let err = mock_everything::execute(&mut session, &json!({})).unwrap_err();
    assert_error_contains(&err.to_string(), "file_path", "missing argument");
}
