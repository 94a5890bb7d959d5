//! MCP Tool definitions and implementations
//!
//! This module defines the tools provided by the mockthis-mcp server using the
//! rust-mcp-sdk macros and conventions.

use rust_mcp_sdk::macros::{mcp_tool, JsonSchema};
use rust_mcp_sdk::schema::{schema_utils::CallToolError, CallToolResult};
use rust_mcp_sdk::tool_box;

use crate::analysis::{mock_everything, mock_this, resolve_spec_file, toggle_spec, MockSession};

/// Generate a test scaffold for the method under the caret
#[mcp_tool(
    name = "mock_this",
    description = "Generate a Jasmine/Angular test scaffold for the method or function at a caret position in a JavaScript or TypeScript file. Builds an `it` block that instantiates the class with spy-object stubs for its constructor dependencies, declares typed placeholders for the method's parameters, calls the method and expects a defined result (or subscribes/awaits it for observables and promises). The block is inserted into the last describe group of the companion spec file, which is created when missing. Returns the target file, insertion line and inserted text."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct MockThisTool {
    /// Path to the source file
    pub file_path: String,
    /// Caret line number (1-indexed)
    pub line: u32,
    /// Caret column number (1-indexed, default: 1)
    #[serde(default)]
    pub column: Option<u32>,
    /// Spec file suffixes, e.g. [".spec", ".test"] (default: [".spec"])
    #[serde(default)]
    pub spec_suffix: Option<Vec<String>>,
    /// Suffix used when creating a new spec file (default: ".spec")
    #[serde(default)]
    pub default_extension: Option<String>,
}

/// Generate a test scaffold for every method in a file
#[mcp_tool(
    name = "mock_everything",
    description = "Generate a complete Jasmine/Angular spec for a JavaScript or TypeScript file: an `it` block for every method or function, wrapped in a describe group named after the class (with constructor stubs in beforeEach) when there is more than one. Appends the group to the companion spec file (created when missing) together with the import of the class under test. Returns the target file, insertion line and inserted text."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct MockEverythingTool {
    /// Path to the source file
    pub file_path: String,
    /// Only generate tests for exported functions (default: false)
    #[serde(default)]
    pub exported_only: bool,
    /// Spec file suffixes, e.g. [".spec", ".test"] (default: [".spec"])
    #[serde(default)]
    pub spec_suffix: Option<Vec<String>>,
    /// Suffix used when creating a new spec file (default: ".spec")
    #[serde(default)]
    pub default_extension: Option<String>,
}

/// Switch between a source file and its spec files
#[mcp_tool(
    name = "toggle_spec",
    description = "Find the source file and spec files that share a base name with the given file (e.g. foo.ts, foo.spec.ts, foo.test.ts) and return the next one in sorted order, wrapping around. Use this to jump between an implementation and its tests."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct ToggleSpecTool {
    /// Path to the file currently open
    pub file_path: String,
    /// Directory to search (default: the file's directory)
    #[serde(default)]
    pub root: Option<String>,
    /// Glob patterns to skip (default: ["**/node_modules"])
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    /// Spec file suffixes, e.g. [".spec", ".test"] (default: [".spec"])
    #[serde(default)]
    pub spec_suffix: Option<Vec<String>>,
}

/// Report the spec file a source file's tests would be written to
#[mcp_tool(
    name = "resolve_spec_file",
    description = "Report which companion spec file the mock_this and mock_everything tools would write to for a source file, and whether it already exists. Nothing is generated or created."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct ResolveSpecFileTool {
    /// Path to the source file
    pub file_path: String,
    /// Spec file suffixes, e.g. [".spec", ".test"] (default: [".spec"])
    #[serde(default)]
    pub spec_suffix: Option<Vec<String>>,
    /// Suffix used when creating a new spec file (default: ".spec")
    #[serde(default)]
    pub default_extension: Option<String>,
}

// Implement tool execution logic for each tool
impl MockThisTool {
    pub fn call_tool(&self, session: &mut MockSession) -> Result<CallToolResult, CallToolError> {
        let args = serde_json::json!({
            "file_path": self.file_path,
            "line": self.line,
            "column": self.column,
            "spec_suffix": self.spec_suffix,
            "default_extension": self.default_extension
        });

        mock_this::execute(session, &args).map_err(CallToolError::new)
    }
}

impl MockEverythingTool {
    pub fn call_tool(&self, session: &mut MockSession) -> Result<CallToolResult, CallToolError> {
        let args = serde_json::json!({
            "file_path": self.file_path,
            "exported_only": self.exported_only,
            "spec_suffix": self.spec_suffix,
            "default_extension": self.default_extension
        });

        mock_everything::execute(session, &args).map_err(CallToolError::new)
    }
}

impl ToggleSpecTool {
    pub fn call_tool(&self, session: &mut MockSession) -> Result<CallToolResult, CallToolError> {
        let args = serde_json::json!({
            "file_path": self.file_path,
            "root": self.root,
            "exclude": self.exclude,
            "spec_suffix": self.spec_suffix
        });

        toggle_spec::execute(session, &args).map_err(CallToolError::new)
    }
}

impl ResolveSpecFileTool {
    pub fn call_tool(&self, session: &mut MockSession) -> Result<CallToolResult, CallToolError> {
        let args = serde_json::json!({
            "file_path": self.file_path,
            "spec_suffix": self.spec_suffix,
            "default_extension": self.default_extension
        });

        resolve_spec_file::execute(session, &args).map_err(CallToolError::new)
    }
}

// Generate an enum with all tools
tool_box!(
    MockThisTools,
    [
        MockThisTool,
        MockEverythingTool,
        ToggleSpecTool,
        ResolveSpecFileTool
    ]
);
