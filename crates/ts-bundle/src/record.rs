//! Bundle line records.
//!
//! One record per contributed session, serialized as one JSONL line. The
//! engine's redacted payload is embedded verbatim under the `data` key;
//! everything else is envelope metadata for the export transport.

use crate::{BundleError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_common::Contributor;
use ts_prepare::PreparedSession;
use uuid::Uuid;

/// Current bundle schema version.
pub const BUNDLE_SCHEMA_VERSION: &str = "1.0.0";

/// Default source label for records produced by this tool.
pub const DEFAULT_SOURCE: &str = "transcript-scrub";

/// One contribution line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleRecord {
    /// Bundle line format version.
    pub schema_version: String,

    /// Unique id for this contribution line.
    pub bundle_id: String,

    /// Producing system label.
    pub source: String,

    /// Contributor metadata, embedded unchanged.
    pub contributor: Contributor,

    /// The redacted payload.
    pub data: Value,
}

impl BundleRecord {
    /// Build a record from a prepared session.
    ///
    /// The session's redacted JSON is re-parsed so the payload embeds as
    /// structure rather than as an escaped string.
    pub fn from_session(
        session: &PreparedSession,
        source: impl Into<String>,
        contributor: &Contributor,
    ) -> Result<Self> {
        let content: Value =
            serde_json::from_str(&session.raw_json).map_err(|e| BundleError::BadPayload {
                session_id: session.session_id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            schema_version: BUNDLE_SCHEMA_VERSION.to_string(),
            bundle_id: Uuid::new_v4().to_string(),
            source: source.into(),
            contributor: contributor.clone(),
            data: serde_json::json!({
                "session_id": &session.session_id,
                "content": content,
                "sha256": &session.raw_sha256,
                "approx_chars": session.approx_chars,
                "score": session.score,
            }),
        })
    }

    /// Structural validation before write.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != BUNDLE_SCHEMA_VERSION {
            return Err(BundleError::UnsupportedVersion {
                version: self.schema_version.clone(),
                supported: BUNDLE_SCHEMA_VERSION.to_string(),
            });
        }
        if self.bundle_id.is_empty() {
            return Err(BundleError::InvalidRecord("bundle_id is empty".to_string()));
        }
        if self.source.is_empty() {
            return Err(BundleError::InvalidRecord("source is empty".to_string()));
        }
        if !self.data.is_object() {
            return Err(BundleError::InvalidRecord(
                "data is not a JSON object".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse one JSONL line.
    pub fn from_json_line(line: &str) -> Result<Self> {
        let record: BundleRecord = serde_json::from_str(line)?;
        record.validate()?;
        Ok(record)
    }
}
