//! User-facing failures of the scaffold commands
//!
//! Every variant is local and non-fatal: the server keeps running and no
//! partial text is written to a target file.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("'{command}' only supports JavaScript or TypeScript files ({path}).")]
    UnsupportedFileKind { command: String, path: String },

    #[error("Spec files cannot be mocked ({path}).")]
    SpecFileRefused { path: String },

    #[error("Sorry! '{command}' wasn't able to produce spec at the current caret position.")]
    NoAnalyzableNode { command: String },

    #[error("No methods found.")]
    NoMethodsFound,

    #[error("No constructor or methods found in {path}.")]
    EmptyExtraction { path: String },

    #[error("Sorry! '{command}' could not write specs to {target}: {source}\n\nDiagnostic report:\n{report}")]
    TargetWriteFailure {
        command: String,
        target: String,
        #[source]
        source: io::Error,
        report: String,
    },

    #[error("Missing or invalid '{0}' argument")]
    InvalidArgument(&'static str),

    #[error("Failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Sorry! '{command}' encountered an error.\n\nDiagnostic report:\n{report}")]
    Unexpected { command: String, report: String },
}

impl MockError {
    /// Informational outcomes that are not faults of the server
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            MockError::SpecFileRefused { .. }
                | MockError::NoAnalyzableNode { .. }
                | MockError::NoMethodsFound
                | MockError::EmptyExtraction { .. }
        )
    }
}
