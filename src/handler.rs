//! MCP Server Handler Implementation
//!
//! This module implements the ServerHandler trait to handle MCP protocol messages
//! and route tool calls to the scaffold commands.

use async_trait::async_trait;
use rust_mcp_sdk::schema::{
    schema_utils::CallToolError, CallToolRequestParams, CallToolResult, ListToolsResult,
    PaginatedRequestParams, RpcError,
};
use rust_mcp_sdk::{mcp_server::ServerHandler, McpServer};
use std::sync::{Arc, Mutex, PoisonError};

use crate::analysis::MockSession;
use crate::config::MockConfig;
use crate::tools::MockThisTools;

/// Handler for the mockthis MCP server
///
/// Commands run one at a time against a single session so the parse cache is
/// never observed half-updated.
pub struct MockThisServerHandler {
    session: Mutex<MockSession>,
}

impl Default for MockThisServerHandler {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

impl MockThisServerHandler {
    pub fn new(config: MockConfig) -> Self {
        Self {
            session: Mutex::new(MockSession::new(config)),
        }
    }

    /// Run a decoded tool call against the session
    pub fn dispatch(&self, tool: MockThisTools) -> Result<CallToolResult, CallToolError> {
        // A panicking command is already reported by the command boundary.
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);

        match tool {
            MockThisTools::MockThisTool(t) => t.call_tool(&mut session),
            MockThisTools::MockEverythingTool(t) => t.call_tool(&mut session),
            MockThisTools::ToggleSpecTool(t) => t.call_tool(&mut session),
            MockThisTools::ResolveSpecFileTool(t) => t.call_tool(&mut session),
        }
    }
}

#[async_trait]
impl ServerHandler for MockThisServerHandler {
    async fn handle_list_tools_request(
        &self,
        _request: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: MockThisTools::tools(),
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_call_tool_request(
        &self,
        request: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        log::info!("Calling tool: {}", request.name);

        // Convert request params into the MockThisTools enum
        let tool: MockThisTools = MockThisTools::try_from(request)?;

        self.dispatch(tool)
    }
}
