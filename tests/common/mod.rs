#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub mod helpers;

/// Get path to a fixture file
pub fn fixture_path(lang: &str, file: &str) -> PathBuf {
    fixture_dir(lang).join(file)
}

/// Get path to a fixture directory
pub fn fixture_dir(lang: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}_project", lang))
}

/// Copy a fixture project into a fresh temp directory, since the scaffold
/// commands write spec files next to their sources
pub fn fixture_workspace(lang: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let source = fixture_dir(lang);

    for entry in WalkDir::new(&source).into_iter().filter_map(|e| e.ok()) {
        let relative = entry.path().strip_prefix(&source).unwrap();
        let destination = dir.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).unwrap();
        } else {
            fs::copy(entry.path(), &destination).unwrap();
        }
    }

    dir
}

/// Build `tool` arguments with a `file_path` pointing at `path`
pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Helper to extract text from CallToolResult
pub fn get_result_text(result: &mockthis_mcp::mcp_types::CallToolResult) -> String {
    // The CallToolResult has a content field which is a Vec<ContentBlock>
    // We serialize and deserialize to extract the text field
    if let Some(first_content) = result.content.first() {
        let json_str = serde_json::to_string(first_content).unwrap();
        let json_val: serde_json::Value = serde_json::from_str(&json_str).unwrap();
        json_val["text"].as_str().unwrap().to_string()
    } else {
        panic!("No content in result");
    }
}

/// Parse the JSON payload of a successful tool result
pub fn get_result_json(result: &mockthis_mcp::mcp_types::CallToolResult) -> serde_json::Value {
    serde_json::from_str(&get_result_text(result)).unwrap()
}
