//! Outer command boundary and diagnostic reports
//!
//! Commands run under [`run_command`], which turns panics into
//! [`MockError::Unexpected`] carrying a serialized [`DiagnosticReport`] so a
//! fault in analysis never takes the server down.

use crate::error::MockError;
use serde::Serialize;
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::{self, AssertUnwindSafe};

/// Platform details plus the failure, suitable for pasting into an issue
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub platform: String,
    pub arch: String,
    pub version: String,
    pub command: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl DiagnosticReport {
    pub fn capture(command: &str, error: &str) -> Self {
        let backtrace = Backtrace::capture();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.to_string(),
            error: error.to_string(),
            backtrace,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Run one command, converting panics into [`MockError::Unexpected`]
pub fn run_command<T, F>(command: &str, f: F) -> Result<T, MockError>
where
    F: FnOnce() -> Result<T, MockError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => {
            if error.is_informational() {
                log::info!("'{command}': {error}");
            } else {
                log::error!("'{command}' failed: {error}");
            }
            Err(error)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("'{command}' panicked: {message}");
            Err(MockError::Unexpected {
                command: command.to_string(),
                report: DiagnosticReport::capture(command, &message).to_json(),
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
