//! Structural facts extracted from source declarations

use serde::Serialize;

/// One name bound by a destructured parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub name: String,
    /// Bound directly inside an array pattern (`[a, b]`)
    pub is_array_pattern: bool,
    /// Bound directly inside an object pattern (`{ a, b }`)
    pub is_object_pattern: bool,
}

/// A constructor or method parameter
///
/// `identifiers` stays empty for a plain binding such as `x: number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: Option<String>,
    pub identifiers: Vec<Identifier>,
}

impl Parameter {
    pub fn is_destructured(&self) -> bool {
        !self.identifiers.is_empty()
    }
}

/// A class constructor; `name` is always the enclosing class name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constructor {
    pub name: String,
    pub params: Vec<Parameter>,
}

/// Return-shape flags inferred from the declared return type text
///
/// Each flag is matched independently, so `PromiseArray` sets both
/// `is_promise` and `is_array`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestMethodReturnValue {
    pub is_array: bool,
    pub is_string: bool,
    pub is_boolean: bool,
    pub is_number: bool,
    pub is_promise: bool,
    pub is_observable: bool,
}

/// Which flag of [`TestMethodReturnValue`] a keyword sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    Array,
    String,
    Boolean,
    Number,
    Promise,
    Observable,
}

/// Keyword table for return-shape classification, matched case-insensitively
/// as substrings of the declared type. A heuristic, not a type checker.
pub const RETURN_SHAPE_RULES: &[(&str, ReturnShape)] = &[
    ("array", ReturnShape::Array),
    ("string", ReturnShape::String),
    ("boolean", ReturnShape::Boolean),
    ("number", ReturnShape::Number),
    ("promise", ReturnShape::Promise),
    ("observable", ReturnShape::Observable),
];

impl TestMethodReturnValue {
    /// Classify a declared return type; an empty text yields all-false flags
    pub fn from_type_text(type_text: &str) -> Self {
        let lowered = type_text.to_lowercase();
        let mut value = Self::default();
        for (keyword, shape) in RETURN_SHAPE_RULES {
            if lowered.contains(keyword) {
                value.set(*shape);
            }
        }
        value
    }

    fn set(&mut self, shape: ReturnShape) {
        match shape {
            ReturnShape::Array => self.is_array = true,
            ReturnShape::String => self.is_string = true,
            ReturnShape::Boolean => self.is_boolean = true,
            ReturnShape::Number => self.is_number = true,
            ReturnShape::Promise => self.is_promise = true,
            ReturnShape::Observable => self.is_observable = true,
        }
    }
}

/// A method (or function) to generate one test case for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestMethod {
    pub name: String,
    pub params: Vec<Parameter>,
    /// `None` when the method is inferred to return nothing
    pub return_value: Option<TestMethodReturnValue>,
    pub is_async: bool,
    pub is_private: bool,
    pub is_static: bool,
}

/// Everything needed to render and insert one scaffold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecConfig {
    pub file_name: String,
    pub import_statement: Option<String>,
    pub class_name: Option<String>,
    pub constructor: Option<Constructor>,
    pub tests: Vec<TestMethod>,
    /// Single-method mode: the test joins an existing `describe` block
    pub inside_describe: bool,
}
