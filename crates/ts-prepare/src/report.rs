//! Redaction reporting and batch statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_common::RedactionCategory;
use ts_redact::RedactionEvent;

/// Batch-level summary of everything the detector changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionReport {
    /// Total substitutions across all sessions.
    pub total_redactions: u64,

    /// Substitutions per category.
    pub counts_by_category: BTreeMap<RedactionCategory, u64>,

    /// Categories that were enabled for this run, highest priority first.
    pub enabled_categories: Vec<RedactionCategory>,

    /// Residue warnings from all sessions, shown to the user verbatim.
    pub residue_warnings: Vec<String>,

    /// Whether the warning count reached the blocking threshold. The
    /// caller must not allow export while this is set, short of an
    /// explicit override.
    pub blocked: bool,
}

impl RedactionReport {
    /// Empty report for a run with the given enabled categories.
    pub fn new(enabled_categories: Vec<RedactionCategory>) -> Self {
        Self {
            total_redactions: 0,
            counts_by_category: BTreeMap::new(),
            enabled_categories,
            residue_warnings: Vec::new(),
            blocked: false,
        }
    }

    /// Fold one session's events into the totals.
    pub fn record_events(&mut self, events: &[RedactionEvent]) {
        for event in events {
            self.total_redactions += 1;
            *self.counts_by_category.entry(event.category).or_insert(0) += 1;
        }
    }

    /// Append residue warnings and re-evaluate the blocking threshold.
    pub fn record_residue(&mut self, warnings: Vec<String>, block_threshold: usize) {
        self.residue_warnings.extend(warnings);
        self.blocked = self.residue_warnings.len() >= block_threshold;
    }

    /// Substitution count for one category.
    pub fn count(&self, category: RedactionCategory) -> u64 {
        self.counts_by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Per-session redaction summary, keyed by session id in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRedactionInfo {
    /// Substitutions applied to this session.
    pub total_redactions: u64,

    /// Substitutions per category for this session.
    pub counts_by_category: BTreeMap<RedactionCategory, u64>,

    /// Distinct placeholders issued for this session's scope.
    pub placeholders_issued: u32,

    /// Residue warnings for this session.
    pub residue_warnings: Vec<String>,

    /// Whether this session alone reached the blocking threshold.
    pub blocked: bool,
}

impl SessionRedactionInfo {
    /// Summarize one session's pipeline output.
    pub fn from_events(
        events: &[RedactionEvent],
        placeholders_issued: u32,
        residue_warnings: Vec<String>,
        block_threshold: usize,
    ) -> Self {
        let mut counts: BTreeMap<RedactionCategory, u64> = BTreeMap::new();
        for event in events {
            *counts.entry(event.category).or_insert(0) += 1;
        }
        let blocked = residue_warnings.len() >= block_threshold;
        Self {
            total_redactions: events.len() as u64,
            counts_by_category: counts,
            placeholders_issued,
            residue_warnings,
            blocked,
        }
    }
}

/// Field coverage for one capture source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldCoverage {
    /// All paths discovered in documents from this source.
    pub present: std::collections::BTreeSet<String>,

    /// Paths retained by the profile.
    pub kept: std::collections::BTreeSet<String>,

    /// Paths deleted by the profile.
    pub stripped: std::collections::BTreeSet<String>,
}

impl FieldCoverage {
    /// "N of M kept" numerator.
    pub fn kept_count(&self) -> usize {
        self.kept.len()
    }

    /// "N of M kept" denominator.
    pub fn present_count(&self) -> usize {
        self.present.len()
    }
}

/// Aggregate batch statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationStats {
    /// Sessions in the request.
    pub requested: usize,

    /// Sessions successfully prepared.
    pub prepared: usize,

    /// Sessions that failed.
    pub failed: usize,

    /// Characters of redacted content across prepared sessions.
    pub total_chars: u64,

    /// Substitutions across prepared sessions.
    pub total_redactions: u64,

    /// Prepared sessions whose own residue warnings reached the threshold.
    pub blocked_sessions: usize,
}
