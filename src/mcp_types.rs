//! MCP types re-export
//!
//! Re-exports the rust-mcp-sdk result types the scaffold commands return.

pub use rust_mcp_sdk::schema::{CallToolResult, TextContent};

/// Build a successful tool result from serialized JSON
pub trait CallToolResultExt {
    fn success(text: String) -> Self;
}

impl CallToolResultExt for CallToolResult {
    fn success(text: String) -> Self {
        CallToolResult::text_content(vec![TextContent::from(text)])
    }
}
