//! Detection and redaction engine for Transcript Scrub.
//!
//! This crate turns a text blob that may contain API keys, personal data,
//! file-system paths, and high-entropy tokens into a publishable version
//! plus an auditable list of what changed.
//!
//! # Key properties
//!
//! - **Deterministic**: fixed input and configuration always produce
//!   byte-identical output; there is no randomness and no wall-clock
//!   dependence anywhere in the pipeline.
//! - **Stable placeholders**: repeated occurrences of the same raw value
//!   reuse the same `<PREFIX_N>` token within a scope.
//! - **Priority overlap resolution**: a specific high-risk rule is never
//!   hidden by a permissive one matching the same span.
//! - **Verified**: a residue pass re-scans the redacted output with the
//!   strictest rules and reports anything that slipped through.
//!
//! # Example
//!
//! ```
//! use ts_redact::{Detector, PatternLibrary, PlaceholderAssigner};
//! use ts_config::RedactionConfig;
//!
//! let library = PatternLibrary::builtin().unwrap();
//! let detector = Detector::new(&library, &RedactionConfig::default()).unwrap();
//!
//! let mut assigner = PlaceholderAssigner::new();
//! let (redacted, events) = detector.detect("token=sk-ABCDEF1234", &mut assigner);
//! assert_eq!(redacted, "<SECRET_1>");
//! assert_eq!(events.len(), 1);
//! ```

pub mod detect;
pub mod entropy;
pub mod pattern;
pub mod placeholder;
pub mod residue;

pub use detect::{Detector, RedactionEvent, HIGH_ENTROPY_RULE};
pub use entropy::{shannon_entropy, EntropyScanner};
pub use pattern::{PatternLibrary, PatternRule, BUILTIN_RULES};
pub use placeholder::PlaceholderAssigner;
pub use residue::ResidueChecker;
