//! Contribution bundle records for Transcript Scrub.
//!
//! The export transport consumes one JSONL line per contributed session.
//! Each line embeds the engine's redacted payload under a `data` key
//! alongside the envelope metadata (`schema_version`, `bundle_id`,
//! `source`, `contributor`).
//!
//! # Example
//!
//! ```
//! use ts_bundle::BundleWriter;
//! use ts_common::Contributor;
//!
//! let contributor = Contributor {
//!     contributor_id: "c1".to_string(),
//!     license: "CC0-1.0".to_string(),
//!     ai_preference: None,
//!     rights_confirmed: true,
//!     reviewed_confirmed: true,
//! };
//! let writer = BundleWriter::new(contributor);
//! assert_eq!(writer.record_count(), 0);
//! ```

pub mod error;
pub mod record;
pub mod writer;

pub use error::{BundleError, Result};
pub use record::{BundleRecord, BUNDLE_SCHEMA_VERSION, DEFAULT_SOURCE};
pub use writer::{BundleSummary, BundleWriter, RecordEntry};
