//! Redaction categories and capture source classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a detection rule and of the redaction events it produces.
///
/// Categories carry a fixed priority order used to resolve overlapping
/// matches: a higher-priority match always wins over a lower-priority one
/// covering the same span. The order is secrets > pii > paths >
/// high_entropy > custom, so a specific high-risk rule can never be hidden
/// by a token-boundary accident of a more permissive rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionCategory {
    /// API keys, tokens, credentials, private keys.
    Secrets,
    /// Personal data: emails, phone numbers, addresses.
    Pii,
    /// File-system paths that identify a user or machine.
    Paths,
    /// Strings whose character distribution suggests randomness.
    HighEntropy,
    /// Caller-supplied patterns.
    Custom,
}

impl RedactionCategory {
    /// All categories, highest priority first.
    pub const ALL: &'static [RedactionCategory] = &[
        RedactionCategory::Secrets,
        RedactionCategory::Pii,
        RedactionCategory::Paths,
        RedactionCategory::HighEntropy,
        RedactionCategory::Custom,
    ];

    /// Overlap tie-break priority; higher wins.
    pub fn priority(&self) -> u8 {
        match self {
            RedactionCategory::Secrets => 4,
            RedactionCategory::Pii => 3,
            RedactionCategory::Paths => 2,
            RedactionCategory::HighEntropy => 1,
            RedactionCategory::Custom => 0,
        }
    }

    /// Category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionCategory::Secrets => "secrets",
            RedactionCategory::Pii => "pii",
            RedactionCategory::Paths => "paths",
            RedactionCategory::HighEntropy => "high_entropy",
            RedactionCategory::Custom => "custom",
        }
    }

    /// Parse a category from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "secrets" => Some(RedactionCategory::Secrets),
            "pii" => Some(RedactionCategory::Pii),
            "paths" => Some(RedactionCategory::Paths),
            "high_entropy" => Some(RedactionCategory::HighEntropy),
            "custom" => Some(RedactionCategory::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for RedactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capture surface a session document originated from.
///
/// Field coverage is reported per source so the dashboard can show
/// "N of M fields kept" for hook captures and transcript captures
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Hook events captured from the agent process.
    CcHook,
    /// Transcript files written by the agent.
    CcTranscript,
    /// Source could not be determined by the capture layer.
    Unknown,
}

impl SourceType {
    /// Source name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::CcHook => "cc_hook",
            SourceType::CcTranscript => "cc_transcript",
            SourceType::Unknown => "unknown",
        }
    }

    /// Parse a source type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cc_hook" => Some(SourceType::CcHook),
            "cc_transcript" => Some(SourceType::CcTranscript),
            "unknown" => Some(SourceType::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
