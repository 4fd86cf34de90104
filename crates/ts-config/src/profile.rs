//! Sensitivity profiles: named, reusable sets of field paths to retain.
//!
//! Three builtin profiles are always resolvable even when the caller has no
//! profile store. User profiles are opaque beyond their kept-field list.
//!
//! Field paths use dot notation for object keys and a `[]` suffix to mean
//! "for every element of this array, descend": `tool_usages[].tool_name`.

use crate::redaction::RedactionConfig;
use serde::{Deserialize, Serialize};
use ts_common::{Error, Result};

/// Sentinel kept-field entry that retains every discovered field.
///
/// Selecting a profile containing this is a maximum-exposure decision and
/// must be an explicit, logged choice upstream.
pub const KEEP_ALL: &str = "*";

/// Builtin profile id: keep everything.
pub const PROFILE_FULL_CONTENT: &str = "full-content";
/// Builtin profile id: message text and tool names, no raw tool output.
pub const PROFILE_MODERATE: &str = "moderate";
/// Builtin profile id: session metadata and tool names only.
pub const PROFILE_METADATA_ONLY: &str = "metadata-only";

/// A named sensitivity tier: the set of field paths to retain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable profile identifier.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Field-path patterns to retain; everything else is stripped.
    pub kept_fields: Vec<String>,

    /// Whether this is one of the three builtin profiles.
    #[serde(default)]
    pub is_builtin: bool,

    /// Redaction configuration bundled with a stored profile record.
    /// The engine itself takes its configuration from the request; this
    /// rides along for callers that persist profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redaction_config: Option<RedactionConfig>,
}

impl Profile {
    /// Whether this profile retains every discovered field.
    pub fn keeps_everything(&self) -> bool {
        self.kept_fields.iter().any(|f| f == KEEP_ALL)
    }
}

/// The three builtin profiles, most permissive first.
pub fn builtin_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: PROFILE_FULL_CONTENT.to_string(),
            name: "Full content".to_string(),
            kept_fields: vec![KEEP_ALL.to_string()],
            is_builtin: true,
            redaction_config: None,
        },
        Profile {
            id: PROFILE_MODERATE.to_string(),
            name: "Moderate".to_string(),
            kept_fields: vec![
                "session".to_string(),
                "messages".to_string(),
                "tool_usages[].tool_name".to_string(),
                "tool_usages[].duration_ms".to_string(),
                "summary".to_string(),
            ],
            is_builtin: true,
            redaction_config: None,
        },
        Profile {
            id: PROFILE_METADATA_ONLY.to_string(),
            name: "Metadata only".to_string(),
            kept_fields: vec![
                "session".to_string(),
                "tool_usages[].tool_name".to_string(),
                "tool_usages[].duration_ms".to_string(),
            ],
            is_builtin: true,
            redaction_config: None,
        },
    ]
}

/// Resolve a profile id against user-supplied profiles, falling back to the
/// builtin set. User profiles shadow builtins with the same id.
pub fn resolve_profile(id: &str, user_profiles: &[Profile]) -> Result<Profile> {
    if let Some(p) = user_profiles.iter().find(|p| p.id == id) {
        return Ok(p.clone());
    }
    if let Some(p) = builtin_profiles().into_iter().find(|p| p.id == id) {
        return Ok(p);
    }
    Err(Error::UnknownProfile {
        profile_id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_always_resolve() {
        for id in [PROFILE_FULL_CONTENT, PROFILE_MODERATE, PROFILE_METADATA_ONLY] {
            let profile = resolve_profile(id, &[]).unwrap();
            assert_eq!(profile.id, id);
            assert!(profile.is_builtin);
        }
    }

    #[test]
    fn test_unknown_profile_errors() {
        let err = resolve_profile("does-not-exist", &[]).unwrap_err();
        assert!(matches!(err, Error::UnknownProfile { .. }));
    }

    #[test]
    fn test_user_profile_shadows_builtin() {
        let custom = Profile {
            id: PROFILE_MODERATE.to_string(),
            name: "My moderate".to_string(),
            kept_fields: vec!["session".to_string()],
            is_builtin: false,
            redaction_config: None,
        };
        let resolved = resolve_profile(PROFILE_MODERATE, &[custom.clone()]).unwrap();
        assert_eq!(resolved, custom);
    }

    #[test]
    fn test_full_content_keeps_everything() {
        let profile = resolve_profile(PROFILE_FULL_CONTENT, &[]).unwrap();
        assert!(profile.keeps_everything());

        let metadata = resolve_profile(PROFILE_METADATA_ONLY, &[]).unwrap();
        assert!(!metadata.keeps_everything());
    }

    #[test]
    fn test_metadata_only_excludes_messages() {
        let profile = resolve_profile(PROFILE_METADATA_ONLY, &[]).unwrap();
        assert!(!profile.kept_fields.iter().any(|f| f.starts_with("messages")));
    }

    #[test]
    fn test_profile_record_roundtrip() {
        let profile = Profile {
            id: "team-default".to_string(),
            name: "Team default".to_string(),
            kept_fields: vec!["session".to_string(), "messages[].role".to_string()],
            is_builtin: false,
            redaction_config: Some(RedactionConfig::default()),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }
}
