//! Scaffold commands
//!
//! Each tool module exposes an `execute` function taking the shared
//! [`MockSession`] and the tool's JSON arguments.

pub mod mock_everything;
pub mod mock_this;
pub mod resolve_spec_file;
pub mod session;
pub mod spec_files;
pub mod toggle_spec;

pub use session::{MockOutcome, MockSession};

use crate::config::MockConfig;
use crate::error::MockError;
use serde_json::Value;

/// Required `file_path` argument
pub(crate) fn file_path_argument(arguments: &Value) -> Result<&str, MockError> {
    arguments["file_path"]
        .as_str()
        .filter(|path| !path.is_empty())
        .ok_or(MockError::InvalidArgument("file_path"))
}

/// The session configuration with the request's `spec_suffix` and
/// `default_extension` overrides applied
pub(crate) fn request_config(base: &MockConfig, arguments: &Value) -> MockConfig {
    let spec_suffix: Option<Vec<String>> = arguments["spec_suffix"].as_array().map(|values| {
        values
            .iter()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect()
    });
    let default_extension = arguments["default_extension"].as_str();

    base.with_overrides(spec_suffix.as_deref(), default_extension)
}
