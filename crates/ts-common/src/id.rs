//! Session and correlation identity types.
//!
//! Identifiers are assigned by the capture layer (the watcher daemon) and
//! treated as opaque strings by the engine. Newtypes keep the two id spaces
//! from being mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a captured agent session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

/// Correlation id linking a capture across hook events and transcript files.
///
/// A preparation request addresses sessions by correlation id; the id also
/// keys the per-session entries of the batch result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CorrelationId {
    fn from(s: String) -> Self {
        CorrelationId(s)
    }
}

impl From<&str> for CorrelationId {
    fn from(s: &str) -> Self {
        CorrelationId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display() {
        let id = SessionId::from("sess-42");
        assert_eq!(id.to_string(), "sess-42");
        assert_eq!(id.as_str(), "sess-42");
    }

    #[test]
    fn test_correlation_id_transparent_serde() {
        let id = CorrelationId::from("corr-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"corr-7\"");

        let parsed: CorrelationId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
