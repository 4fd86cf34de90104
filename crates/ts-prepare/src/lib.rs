//! Session preparation orchestrator for Transcript Scrub.
//!
//! Combines the field schema stripper, the detector pipeline, and the
//! residue checker into the per-session pipeline that turns raw captured
//! transcripts into publishable [`PreparedSession`]s with a verifiable
//! [`RedactionReport`].
//!
//! The engine is a stateless, synchronous, CPU-bound transformation with
//! no I/O: fetching raw session bytes and persisting results both belong
//! to the caller. Running the same request twice produces byte-identical
//! output, so re-previewing after a UI-only change can never flip a
//! redaction outcome.
//!
//! # Example
//!
//! ```
//! use ts_common::{Contributor, CorrelationId, SessionId, SourceType};
//! use ts_config::RedactionConfig;
//! use ts_prepare::{PreparationRequest, Preparer, SessionInput};
//! use ts_redact::PatternLibrary;
//!
//! let library = PatternLibrary::builtin().unwrap();
//! let preparer = Preparer::new(&library);
//!
//! let request = PreparationRequest {
//!     sessions: vec![SessionInput {
//!         correlation_id: CorrelationId::from("corr-1"),
//!         session_id: SessionId::from("sess-1"),
//!         source: SourceType::CcTranscript,
//!         raw_json: r#"{"session": {"model": "agent-large"}}"#.to_string(),
//!     }],
//!     redaction: RedactionConfig::default(),
//!     profile_id: "full-content".to_string(),
//!     profiles: vec![],
//!     selected_fields: None,
//!     contributor: Contributor {
//!         contributor_id: "c1".to_string(),
//!         license: "CC0-1.0".to_string(),
//!         ai_preference: None,
//!         rights_confirmed: true,
//!         reviewed_confirmed: true,
//!     },
//! };
//!
//! let result = preparer.prepare(&request).unwrap();
//! assert_eq!(result.sessions.len(), 1);
//! ```

pub mod path;
pub mod prepare;
pub mod report;
pub mod session;
pub mod strip;

pub use path::FieldMatcher;
pub use prepare::{PreparationRequest, PreparationResult, Preparer};
pub use report::{FieldCoverage, PreparationStats, RedactionReport, SessionRedactionInfo};
pub use session::{PreparedSession, SessionInput, PREVIEW_MAX_CHARS};
pub use strip::{strip, StripOutcome};
