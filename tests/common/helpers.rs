#![allow(dead_code)]

//! Helper functions for common test assertions

pub fn assert_error_contains(err: &str, expected: &str, context: &str) {
    assert!(
        err.to_lowercase().contains(&expected.to_lowercase()),
        "{}: Error should contain '{}', got: {}",
        context,
        expected,
        err
    );
}

/// Assert that `needle` occurs exactly `expected` times in `text`
pub fn assert_occurrences(text: &str, needle: &str, expected: usize) {
    let actual = text.matches(needle).count();
    assert_eq!(
        actual, expected,
        "Expected '{}' {} time(s), found {} in:\n{}",
        needle, expected, actual, text
    );
}

/// Assert that the `{` / `}` and `(` / `)` pairs of generated code balance
pub fn assert_balanced(text: &str) {
    let braces = text.matches('{').count() as isize - text.matches('}').count() as isize;
    let parens = text.matches('(').count() as isize - text.matches(')').count() as isize;
    assert_eq!(braces, 0, "Unbalanced braces in:\n{}", text);
    assert_eq!(parens, 0, "Unbalanced parentheses in:\n{}", text);
}
