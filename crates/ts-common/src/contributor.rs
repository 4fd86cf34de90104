//! Contributor passthrough metadata.
//!
//! The engine never interprets these fields; they are embedded unchanged
//! into downstream bundle records so the export layer can attribute and
//! license the contributed data.

use serde::{Deserialize, Serialize};

/// Metadata about the person contributing a batch of sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Stable pseudonymous contributor identifier.
    pub contributor_id: String,

    /// License the contribution is offered under (e.g. SPDX id).
    pub license: String,

    /// Contributor's stated preference on AI training use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_preference: Option<String>,

    /// Contributor confirmed they hold the rights to the content.
    pub rights_confirmed: bool,

    /// Contributor confirmed they reviewed the redacted output.
    pub reviewed_confirmed: bool,
}

impl Contributor {
    /// Whether both required confirmations were given.
    pub fn is_confirmed(&self) -> bool {
        self.rights_confirmed && self.reviewed_confirmed
    }
}
