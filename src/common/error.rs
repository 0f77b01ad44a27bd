//! Error types for the smoke-test harness
//!
//! Per-call failures are never errors: the executor turns them into
//! `CallRecord`s. Only conditions that make the rest of the run meaningless
//! (unreachable server, unwritable report) surface as `Error` values.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test harness
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot reach server at {url}: {reason}")]
    Preflight { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to write report '{path}': {error}")]
    ReportWrite { path: String, error: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a preflight error for the given probe URL
    pub fn preflight(url: &str, reason: impl ToString) -> Self {
        Self::Preflight {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
