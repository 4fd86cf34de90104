//! Error types for Transcript Scrub.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for the dashboard
//! - Partial-batch results so one bad session never aborts its siblings
//!
//! Errors serialize to structured JSON for the surrounding system:
//! ```json
//! {
//!   "code": 30,
//!   "category": "session",
//!   "message": "session corr-9: invalid JSON: expected value at line 1",
//!   "recoverable": false,
//!   "context": { "correlation_id": "corr-9" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Transcript Scrub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration and profile errors.
    Config,
    /// Detection pattern errors (builtin or caller-supplied).
    Pattern,
    /// Per-session input errors.
    Session,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Pattern => write!(f, "pattern"),
            ErrorCategory::Session => write!(f, "session"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the preparation engine.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown profile: {profile_id}")]
    UnknownProfile { profile_id: String },

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    // Pattern errors (20-29)
    //
    // An invalid caller-supplied pattern fails the whole call: it changes
    // detection semantics for every session in the batch.
    #[error("invalid custom pattern '{pattern}': {reason}")]
    InvalidCustomPattern { pattern: String, reason: String },

    #[error("builtin pattern '{name}' failed to compile: {reason}")]
    PatternCompile { name: String, reason: String },

    // Session errors (30-39)
    #[error("session {correlation_id}: invalid JSON: {reason}")]
    SessionParse {
        correlation_id: String,
        reason: String,
    },

    #[error("session {correlation_id}: document is not a JSON object")]
    SessionShape { correlation_id: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Codes are grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Pattern errors
    /// - 30-39: Session errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::UnknownProfile { .. } => 11,
            Error::InvalidProfile(_) => 12,
            Error::InvalidCustomPattern { .. } => 20,
            Error::PatternCompile { .. } => 21,
            Error::SessionParse { .. } => 30,
            Error::SessionShape { .. } => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::UnknownProfile { .. } | Error::InvalidProfile(_) => {
                ErrorCategory::Config
            }
            Error::InvalidCustomPattern { .. } | Error::PatternCompile { .. } => {
                ErrorCategory::Pattern
            }
            Error::SessionParse { .. } | Error::SessionShape { .. } => ErrorCategory::Session,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Fixable by correcting the request
            Error::Config(_) => true,
            Error::UnknownProfile { .. } => true,
            Error::InvalidProfile(_) => true,
            Error::InvalidCustomPattern { .. } => true,

            // Shipped-pattern failure is a programming error
            Error::PatternCompile { .. } => false,

            // The captured bytes are what they are
            Error::SessionParse { .. } => false,
            Error::SessionShape { .. } => false,

            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::UnknownProfile { .. } => "Unknown Profile",
            Error::InvalidProfile(_) => "Invalid Profile",
            Error::InvalidCustomPattern { .. } => "Invalid Custom Pattern",
            Error::PatternCompile { .. } => "Pattern Compilation Failed",
            Error::SessionParse { .. } => "Session Parse Error",
            Error::SessionShape { .. } => "Unexpected Session Shape",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g. correlation id, pattern).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::UnknownProfile { profile_id } => {
                context.insert("profile_id".to_string(), serde_json::json!(profile_id));
            }
            Error::InvalidCustomPattern { pattern, .. } => {
                context.insert("pattern".to_string(), serde_json::json!(pattern));
            }
            Error::PatternCompile { name, .. } => {
                context.insert("pattern_name".to_string(), serde_json::json!(name));
            }
            Error::SessionParse { correlation_id, .. }
            | Error::SessionShape { correlation_id } => {
                context.insert(
                    "correlation_id".to_string(),
                    serde_json::json!(correlation_id),
                );
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Result of a batch operation that may have partial success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult<T> {
    /// Successfully completed items.
    pub succeeded: Vec<T>,

    /// Failed items with their errors.
    pub failed: Vec<BatchError>,

    /// Summary statistics.
    pub summary: BatchSummary,
}

/// A single error in a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Identifier of the failed item (correlation id).
    pub item_id: String,

    /// The structured error.
    pub error: StructuredError,
}

/// Summary of batch operation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Total items attempted.
    pub total: usize,

    /// Number of successful items.
    pub succeeded: usize,

    /// Number of failed items.
    pub failed: usize,

    /// Whether all items succeeded.
    pub all_succeeded: bool,

    /// Whether any items succeeded.
    pub any_succeeded: bool,
}

impl<T> BatchResult<T> {
    /// Create a new batch result from succeeded and failed items.
    pub fn new(succeeded: Vec<T>, failed: Vec<BatchError>) -> Self {
        let total = succeeded.len() + failed.len();
        let succeeded_count = succeeded.len();
        let failed_count = failed.len();

        BatchResult {
            succeeded,
            failed,
            summary: BatchSummary {
                total,
                succeeded: succeeded_count,
                failed: failed_count,
                all_succeeded: failed_count == 0,
                any_succeeded: succeeded_count > 0,
            },
        }
    }

    /// Add a failure to the batch result.
    pub fn add_failure(&mut self, item_id: impl Into<String>, error: &Error) {
        self.failed.push(BatchError {
            item_id: item_id.into(),
            error: StructuredError::from(error),
        });
        self.summary.failed += 1;
        self.summary.total += 1;
        self.summary.all_succeeded = false;
    }

    /// Add a success to the batch result.
    pub fn add_success(&mut self, item: T) {
        self.succeeded.push(item);
        self.summary.succeeded += 1;
        self.summary.total += 1;
        self.summary.any_succeeded = true;
    }
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::Config("test".into()).code(), 10);
        assert_eq!(
            Error::UnknownProfile {
                profile_id: "x".into()
            }
            .code(),
            11
        );
        assert_eq!(
            Error::SessionParse {
                correlation_id: "c".into(),
                reason: "bad".into()
            }
            .code(),
            30
        );
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::InvalidCustomPattern {
                pattern: "(".into(),
                reason: "unclosed".into()
            }
            .category(),
            ErrorCategory::Pattern
        );
        assert_eq!(
            Error::SessionShape {
                correlation_id: "c".into()
            }
            .category(),
            ErrorCategory::Session
        );
    }

    #[test]
    fn test_error_recoverable() {
        assert!(Error::UnknownProfile {
            profile_id: "x".into()
        }
        .is_recoverable());
        assert!(!Error::PatternCompile {
            name: "aws_access_key".into(),
            reason: "boom".into()
        }
        .is_recoverable());
        assert!(!Error::SessionParse {
            correlation_id: "c".into(),
            reason: "bad".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_structured_error_context() {
        let err = Error::SessionParse {
            correlation_id: "corr-9".into(),
            reason: "expected value".into(),
        };
        let structured = StructuredError::from(&err);

        assert_eq!(structured.code, 30);
        assert_eq!(structured.category, ErrorCategory::Session);
        assert!(!structured.recoverable);
        assert_eq!(
            structured.context.get("correlation_id"),
            Some(&serde_json::json!("corr-9"))
        );
    }

    #[test]
    fn test_structured_error_json() {
        let err = Error::UnknownProfile {
            profile_id: "nope".into(),
        };
        let json = StructuredError::from(&err).to_json();

        assert!(json.contains(r#""code":11"#));
        assert!(json.contains(r#""category":"config""#));
        assert!(json.contains(r#""recoverable":true"#));
    }

    #[test]
    fn test_batch_result() {
        let mut batch: BatchResult<String> = BatchResult::default();

        batch.add_success("item1".to_string());
        batch.add_success("item2".to_string());
        batch.add_failure(
            "item3",
            &Error::SessionParse {
                correlation_id: "item3".into(),
                reason: "truncated".into(),
            },
        );

        assert_eq!(batch.summary.total, 3);
        assert_eq!(batch.summary.succeeded, 2);
        assert_eq!(batch.summary.failed, 1);
        assert!(!batch.summary.all_succeeded);
        assert!(batch.summary.any_succeeded);
    }
}
