//! mockthis-mcp
//!
//! Generates Jasmine/Angular test scaffolds for JavaScript and TypeScript
//! sources. Declarations are read from a tree-sitter parse, rendered into
//! `describe`/`it` blocks and inserted into the companion spec file.

pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extraction;
pub mod handler;
pub mod mcp_types;
pub mod parser;
pub mod scaffold;
pub mod tools;
