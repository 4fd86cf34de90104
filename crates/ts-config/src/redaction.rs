//! Redaction configuration.
//!
//! The configuration is fully specified at the engine boundary: every field
//! has a concrete value after deserialization, so the engine's contract is
//! total and default-filling stays a caller concern. The serde defaults
//! below exist for callers that deserialize partial JSON before invoking.

use serde::{Deserialize, Serialize};
use ts_common::RedactionCategory;

/// Scope of placeholder suffix allocation.
///
/// Per-session scoping keeps sessions independent so a batch can fan out to
/// workers without coordination. Per-batch scoping reuses one assigner
/// across all sessions, so the same raw secret gets the same placeholder
/// number everywhere, at the cost of serializing the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderScope {
    /// Counters reset for every session.
    #[default]
    PerSession,
    /// Counters are shared across the whole batch.
    PerBatch,
}

/// Per-request redaction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Apply the secrets rule set.
    #[serde(default = "default_true")]
    pub redact_secrets: bool,

    /// Apply the PII rule set.
    #[serde(default = "default_true")]
    pub redact_pii: bool,

    /// Apply the file-system path rule set.
    #[serde(default = "default_true")]
    pub redact_paths: bool,

    /// Apply the high-entropy scan. Off by caller choice when the
    /// false-positive rate is unacceptable.
    #[serde(default = "default_true")]
    pub enable_high_entropy: bool,

    /// Caller-supplied regex patterns, applied whenever non-empty and
    /// tagged with the `custom` category. An invalid entry fails the whole
    /// preparation call.
    #[serde(default)]
    pub custom_patterns: Vec<String>,

    /// Number of residue warnings at which the report is marked blocked.
    #[serde(default = "default_block_threshold")]
    pub residue_block_threshold: usize,

    /// Placeholder suffix allocation scope.
    #[serde(default)]
    pub placeholder_scope: PlaceholderScope,
}

fn default_true() -> bool {
    true
}

fn default_block_threshold() -> usize {
    1
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_secrets: true,
            redact_pii: true,
            redact_paths: true,
            enable_high_entropy: true,
            custom_patterns: Vec::new(),
            residue_block_threshold: 1,
            placeholder_scope: PlaceholderScope::PerSession,
        }
    }
}

impl RedactionConfig {
    /// Whether a builtin category is enabled by this configuration.
    ///
    /// `Custom` is driven by the presence of patterns, not a toggle.
    pub fn category_enabled(&self, category: RedactionCategory) -> bool {
        match category {
            RedactionCategory::Secrets => self.redact_secrets,
            RedactionCategory::Pii => self.redact_pii,
            RedactionCategory::Paths => self.redact_paths,
            RedactionCategory::HighEntropy => self.enable_high_entropy,
            RedactionCategory::Custom => !self.custom_patterns.is_empty(),
        }
    }

    /// Categories enabled by this configuration, highest priority first.
    pub fn enabled_categories(&self) -> Vec<RedactionCategory> {
        RedactionCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.category_enabled(*c))
            .collect()
    }
}
