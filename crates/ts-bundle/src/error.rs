//! Error types for bundle assembly.

use thiserror::Error;

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Errors that can occur while assembling or writing a bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The preparation result is blocked by residue warnings and the
    /// caller did not pass an explicit override.
    #[error("preparation result is blocked by {warnings} residue warning(s); export requires an explicit override")]
    Blocked { warnings: usize },

    /// A record failed structural validation.
    #[error("invalid bundle record: {0}")]
    InvalidRecord(String),

    /// A session's redacted payload could not be re-parsed.
    #[error("unreadable redacted payload for session {session_id}: {reason}")]
    BadPayload { session_id: String, reason: String },

    /// Unsupported schema version on read.
    #[error("unsupported bundle schema version {version} (supported: {supported})")]
    UnsupportedVersion { version: String, supported: String },

    /// I/O error while writing bundle lines.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
