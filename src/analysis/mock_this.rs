//! Mock This Tool
//!
//! Generates a single test for the method under the caret and inserts it into
//! the last `describe` block of the companion spec file.

use crate::analysis::session::{MockSession, MOCK_THIS};
use crate::analysis::{file_path_argument, request_config};
use crate::diagnostics::run_command;
use crate::error::MockError;
use crate::mcp_types::{CallToolResult, CallToolResultExt};
use serde_json::Value;
use std::path::Path;

/// Execute the mock_this tool
///
/// # Arguments
/// * `arguments` - JSON object with:
///   - `file_path`: String - Path to the JavaScript or TypeScript source
///   - `line`: u32 - 1-indexed caret line
///   - `column`: Option<u32> - 1-indexed caret column (default: 1)
///   - `spec_suffix`: Option<Vec<String>> - Spec suffixes for this request
///   - `default_extension`: Option<String> - Suffix used for new spec files
///
/// # Returns
/// JSON describing the target file, the insertion line and the inserted text.
pub fn execute(session: &mut MockSession, arguments: &Value) -> Result<CallToolResult, MockError> {
    let file_path = file_path_argument(arguments)?;
    let line = arguments["line"]
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(MockError::InvalidArgument("line"))?;
    let column = match &arguments["column"] {
        Value::Null => 1,
        value => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(MockError::InvalidArgument("column"))?,
    };
    let config = request_config(session.config(), arguments);

    log::info!("Mocking method at {}:{}:{}", file_path, line, column);

    let outcome = run_command(MOCK_THIS, || {
        session.mock_this(Path::new(file_path), line, column, &config)
    })?;

    let json = serde_json::to_string(&outcome).map_err(|e| MockError::Unexpected {
        command: MOCK_THIS.to_string(),
        report: e.to_string(),
    })?;
    Ok(CallToolResult::success(json))
}
