//! Semantic validation of redaction configuration and profiles.
//!
//! Validation runs before any session work: an invalid custom pattern
//! changes detection semantics for every session in the batch, so it fails
//! the whole call rather than being skipped.

use crate::profile::{Profile, KEEP_ALL};
use crate::redaction::RedactionConfig;
use thiserror::Error;
use ts_common::Error as EngineError;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid custom pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("profile '{profile_id}': {message}")]
    InvalidProfile { profile_id: String, message: String },
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidPattern { pattern, message } => {
                EngineError::InvalidCustomPattern {
                    pattern,
                    reason: message,
                }
            }
            ValidationError::InvalidValue { .. } => EngineError::Config(err.to_string()),
            ValidationError::InvalidProfile { .. } => EngineError::InvalidProfile(err.to_string()),
        }
    }
}

/// Validate a redaction configuration semantically.
///
/// Every custom pattern must compile; an empty pattern is rejected because
/// it would match at every position and replace nothing.
pub fn validate_config(config: &RedactionConfig) -> ValidationResult<()> {
    for pattern in &config.custom_patterns {
        if pattern.is_empty() {
            return Err(ValidationError::InvalidPattern {
                pattern: pattern.clone(),
                message: "empty pattern".to_string(),
            });
        }
        if let Err(e) = regex::Regex::new(pattern) {
            return Err(ValidationError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            });
        }
    }

    if config.residue_block_threshold == 0 {
        return Err(ValidationError::InvalidValue {
            field: "residue_block_threshold".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validate a profile's kept-field paths.
pub fn validate_profile(profile: &Profile) -> ValidationResult<()> {
    if profile.kept_fields.is_empty() {
        return Err(ValidationError::InvalidProfile {
            profile_id: profile.id.clone(),
            message: "kept_fields is empty; output would always be empty".to_string(),
        });
    }

    for field in &profile.kept_fields {
        if field == KEEP_ALL {
            continue;
        }
        if let Err(message) = check_field_path(field) {
            return Err(ValidationError::InvalidProfile {
                profile_id: profile.id.clone(),
                message: format!("bad field path '{}': {}", field, message),
            });
        }
    }

    Ok(())
}

/// Check one dot/bracket field path for well-formedness.
fn check_field_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("empty path".to_string());
    }
    for segment in path.split('.') {
        let segment = segment.strip_suffix("[]").unwrap_or(segment);
        if segment.is_empty() {
            return Err("empty path segment".to_string());
        }
        if segment.contains(['[', ']']) {
            return Err("brackets are only valid as a trailing [] suffix".to_string());
        }
        if segment.chars().any(|c| c.is_whitespace()) {
            return Err("whitespace in path segment".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin_profiles;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RedactionConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_custom_pattern_rejected() {
        let config = RedactionConfig {
            custom_patterns: vec![r"\b192\.168\.\d+\.\d+\b".to_string(), "(".to_string()],
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let config = RedactionConfig {
            custom_patterns: vec![String::new()],
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_block_threshold_rejected() {
        let config = RedactionConfig {
            residue_block_threshold: 0,
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn test_builtin_profiles_validate() {
        for profile in builtin_profiles() {
            assert!(validate_profile(&profile).is_ok(), "profile {}", profile.id);
        }
    }

    #[test]
    fn test_empty_kept_fields_rejected() {
        let profile = Profile {
            id: "empty".to_string(),
            name: "Empty".to_string(),
            kept_fields: vec![],
            is_builtin: false,
            redaction_config: None,
        };
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_bad_field_paths_rejected() {
        for bad in ["", "a..b", "a[0].b", "a b", "tool_usages[].  "] {
            let profile = Profile {
                id: "p".to_string(),
                name: "P".to_string(),
                kept_fields: vec![bad.to_string()],
                is_builtin: false,
                redaction_config: None,
            };
            assert!(validate_profile(&profile).is_err(), "path '{}'", bad);
        }
    }

    #[test]
    fn test_bracket_paths_accepted() {
        let profile = Profile {
            id: "p".to_string(),
            name: "P".to_string(),
            kept_fields: vec![
                "tool_usages[].tool_name".to_string(),
                "messages[].role".to_string(),
                "session.start_time".to_string(),
            ],
            is_builtin: false,
            redaction_config: None,
        };
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn test_validation_error_converts_to_engine_error() {
        let err = ValidationError::InvalidPattern {
            pattern: "(".to_string(),
            message: "unclosed group".to_string(),
        };
        let engine: EngineError = err.into();
        assert!(matches!(engine, EngineError::InvalidCustomPattern { .. }));
    }
}
