//! Transcript Scrub configuration and sensitivity profiles.
//!
//! This crate provides:
//! - Typed redaction configuration with serde field defaults
//! - Builtin and user-supplied sensitivity profiles (kept-field sets)
//! - Semantic validation of caller-supplied patterns and profiles
//!
//! Nothing here persists anything; profiles and configuration are supplied
//! by the caller per request and validated before the engine runs.

pub mod profile;
pub mod redaction;
pub mod validate;

pub use profile::{
    builtin_profiles, resolve_profile, Profile, KEEP_ALL, PROFILE_FULL_CONTENT,
    PROFILE_METADATA_ONLY, PROFILE_MODERATE,
};
pub use redaction::{PlaceholderScope, RedactionConfig};
pub use validate::{validate_config, validate_profile, ValidationError, ValidationResult};

/// Schema version for configuration structures.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
