//! Toggle Spec Tool
//!
//! Switches between a source file and its spec files. All files named
//! `B.E`, `B<suffix>.E` under the search root form one family; the tool
//! returns the member after the current file, wrapping around.

use crate::analysis::spec_files::{find_family_files, next_in_family};
use crate::analysis::{file_path_argument, request_config, MockSession};
use crate::error::MockError;
use crate::mcp_types::{CallToolResult, CallToolResultExt};
use serde_json::{json, Value};
use std::path::Path;

const DEFAULT_EXCLUDE: &str = "**/node_modules";

/// Execute the toggle_spec tool
///
/// # Arguments
/// * `arguments` - JSON object with:
///   - `file_path`: String - The file currently open
///   - `root`: Option<String> - Directory to search (default: the file's directory)
///   - `exclude`: Option<Vec<String>> - Glob patterns to skip (default: `**/node_modules`)
///   - `spec_suffix`: Option<Vec<String>> - Spec suffixes for this request
///
/// # Returns
/// JSON with `current`, `next` (null when there is nothing to switch to) and
/// the sorted `family`.
pub fn execute(session: &mut MockSession, arguments: &Value) -> Result<CallToolResult, MockError> {
    let file_path = Path::new(file_path_argument(arguments)?);
    let config = request_config(session.config(), arguments);

    let root = match arguments["root"].as_str() {
        Some(root) => Path::new(root).to_path_buf(),
        None => file_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf(),
    };
    let exclude: Vec<String> = match arguments["exclude"].as_array() {
        Some(patterns) => patterns
            .iter()
            .filter_map(|p| p.as_str().map(str::to_string))
            .collect(),
        None => vec![DEFAULT_EXCLUDE.to_string()],
    };

    log::info!("Toggling spec for {} under {}", file_path.display(), root.display());

    let family = find_family_files(&root, file_path, &config, &exclude).map_err(|e| {
        log::warn!("Cannot list spec family: {e:#}");
        MockError::InvalidArgument("exclude")
    })?;
    let next = next_in_family(&family, file_path);

    let mut result = json!({
        "current": file_path.display().to_string(),
        "next": next.as_ref().map(|p| p.display().to_string()),
        "family": family.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
    });
    if next.is_none() {
        log::warn!("Nothing to toggle to from {}", file_path.display());
        result["message"] = json!("Spec or source file not found");
    }

    Ok(CallToolResult::success(result.to_string()))
}
