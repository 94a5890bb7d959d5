//! Declaration extraction
//!
//! Turns a parsed TypeScript/JavaScript tree into the structural facts the
//! scaffold renderer consumes: class name, constructor, and classified methods.

pub mod declarations;
pub mod source_model;
pub mod types;

pub use source_model::{DeclKind, SourceModel};
pub use types::{Constructor, Identifier, Parameter, SpecConfig, TestMethod, TestMethodReturnValue};
