//! Mock Everything Tool
//!
//! Generates tests for every method of a source file, wrapped in a `describe`
//! group with constructor setup when there is more than one, and appends them
//! to the companion spec file.

use crate::analysis::session::{MockSession, MOCK_EVERYTHING};
use crate::analysis::{file_path_argument, request_config};
use crate::diagnostics::run_command;
use crate::error::MockError;
use crate::mcp_types::{CallToolResult, CallToolResultExt};
use serde_json::Value;
use std::path::Path;

/// Execute the mock_everything tool
///
/// # Arguments
/// * `arguments` - JSON object with:
///   - `file_path`: String - Path to the JavaScript or TypeScript source
///   - `exported_only`: Option<bool> - Skip functions that are not exported (default: false)
///   - `spec_suffix`: Option<Vec<String>> - Spec suffixes for this request
///   - `default_extension`: Option<String> - Suffix used for new spec files
pub fn execute(session: &mut MockSession, arguments: &Value) -> Result<CallToolResult, MockError> {
    let file_path = file_path_argument(arguments)?;
    let exported_only = arguments["exported_only"].as_bool().unwrap_or(false);
    let config = request_config(session.config(), arguments);

    log::info!("Mocking everything in {}", file_path);

    let outcome = run_command(MOCK_EVERYTHING, || {
        session.mock_everything(Path::new(file_path), exported_only, &config)
    })?;

    let json = serde_json::to_string(&outcome).map_err(|e| MockError::Unexpected {
        command: MOCK_EVERYTHING.to_string(),
        report: e.to_string(),
    })?;
    Ok(CallToolResult::success(json))
}
