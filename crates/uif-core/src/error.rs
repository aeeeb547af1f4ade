//! Error kinds for a single fetch attempt.
//!
//! Every failure inside the fetch pipeline is one of these; the orchestrator
//! turns them into `FetchOutcome::Failed` so nothing escapes a single URL.

use thiserror::Error;

/// Why a response was refused before its content was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Declared `Content-Type` missing or not `image/*`.
    #[error("URL does not point to an image (Content-Type: {content_type})")]
    InvalidContentType { content_type: String },

    /// Declared `Content-Length` above the configured ceiling.
    #[error("Image is too large ({:.1} MB)", mib(.declared))]
    ContentTooLarge { declared: u64, limit: u64 },

    /// More bytes arrived than the ceiling allows, whatever the server declared.
    #[error("Image exceeded the {limit} byte limit while downloading")]
    BodyTooLarge { limit: u64 },
}

fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / 1_048_576.0
}

/// Failure of one fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Invalid URL, network failure, timeout, or a non-2xx status.
    #[error("{message} for url: {url}")]
    Connection { url: String, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Filesystem failure (directory creation, write).
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn connection<S: Into<String>>(url: &str, message: S) -> Self {
        FetchError::Connection {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Short label the console uses as a status-line prefix.
    pub fn label(&self) -> &'static str {
        match self {
            FetchError::Connection { .. } => "Connection error",
            FetchError::Validation(_) => "Validation error",
            FetchError::Io(_) => "An unexpected error occurred",
        }
    }
}
