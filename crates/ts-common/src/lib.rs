//! Transcript Scrub common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the preparation
//! engine crates:
//! - Session and correlation identity types
//! - Redaction categories with a fixed priority order
//! - Capture source classification
//! - Contributor passthrough metadata
//! - Common error types and partial-batch result plumbing

pub mod category;
pub mod contributor;
pub mod error;
pub mod id;

pub use category::{RedactionCategory, SourceType};
pub use contributor::Contributor;
pub use error::{BatchError, BatchResult, Error, ErrorCategory, Result, StructuredError};
pub use id::{CorrelationId, SessionId};

/// Schema version for engine output structures.
pub const SCHEMA_VERSION: &str = "1.0.0";
