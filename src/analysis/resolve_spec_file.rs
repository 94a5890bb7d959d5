//! Resolve Spec File Tool
//!
//! Reports which spec file the scaffold commands would write to, without
//! generating or creating anything.

use crate::analysis::spec_files::{is_spec_file, resolve_target};
use crate::analysis::{file_path_argument, request_config, MockSession};
use crate::error::MockError;
use crate::mcp_types::{CallToolResult, CallToolResultExt};
use serde_json::{json, Value};
use std::path::Path;

/// Execute the resolve_spec_file tool
///
/// # Arguments
/// * `arguments` - JSON object with:
///   - `file_path`: String - Source file
///   - `spec_suffix`: Option<Vec<String>> - Spec suffixes for this request
///   - `default_extension`: Option<String> - Suffix used for new spec files
pub fn execute(session: &mut MockSession, arguments: &Value) -> Result<CallToolResult, MockError> {
    let file_path = Path::new(file_path_argument(arguments)?);
    let config = request_config(session.config(), arguments);

    if is_spec_file(file_path, &config) {
        return Err(MockError::SpecFileRefused {
            path: file_path.display().to_string(),
        });
    }

    let target = resolve_target(file_path, &config);
    let result = json!({
        "source_file": file_path.display().to_string(),
        "target_file": target.display().to_string(),
        "exists": target.exists(),
    });

    Ok(CallToolResult::success(result.to_string()))
}
