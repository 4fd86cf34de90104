//! Preparation orchestrator.
//!
//! Per-session pipeline, linear and retry-free:
//! parse, strip fields, redact string leaves, residue-check the serialized
//! output, assemble the prepared session. A failed session is recorded and
//! the batch continues; request-level problems (bad custom pattern,
//! unknown profile) fail the whole call before any session is touched.

use crate::path::FieldMatcher;
use crate::report::{FieldCoverage, PreparationStats, RedactionReport, SessionRedactionInfo};
use crate::session::{
    contribution_score, sha256_hex, truncate_preview, PreparedSession, SessionInput,
};
use crate::strip;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};
use ts_common::{
    BatchError, Contributor, Error, Result, SessionId, SourceType, StructuredError,
};
use ts_config::{
    resolve_profile, validate_config, validate_profile, PlaceholderScope, Profile, RedactionConfig,
};
use ts_redact::{Detector, PatternLibrary, PlaceholderAssigner, RedactionEvent, ResidueChecker};

/// A batch preparation request.
#[derive(Debug, Clone)]
pub struct PreparationRequest {
    /// Sessions to prepare, already fetched by the caller.
    pub sessions: Vec<SessionInput>,

    /// Redaction configuration for the whole batch.
    pub redaction: RedactionConfig,

    /// Profile id; the three builtin ids always resolve.
    pub profile_id: String,

    /// Caller-supplied profile store, possibly empty.
    pub profiles: Vec<Profile>,

    /// Overrides the profile's kept fields when present.
    pub selected_fields: Option<Vec<String>>,

    /// Passthrough contributor metadata.
    pub contributor: Contributor,
}

/// Everything the caller needs to preview, persist, or export a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparationResult {
    /// Prepared sessions, in request order.
    pub sessions: Vec<PreparedSession>,

    /// Batch-level redaction summary.
    pub redaction_report: RedactionReport,

    /// Union of stripped paths across all sessions.
    pub stripped_fields: BTreeSet<String>,

    /// Union of discovered paths across all sessions.
    pub fields_present: BTreeSet<String>,

    /// Field coverage grouped by capture source.
    pub fields_by_source: BTreeMap<SourceType, FieldCoverage>,

    /// Per-session redaction summaries, keyed by session id.
    pub redaction_info_map: BTreeMap<SessionId, SessionRedactionInfo>,

    /// Aggregate statistics.
    pub stats: PreparationStats,

    /// Sessions that could not be prepared.
    pub errors: Vec<BatchError>,

    /// Contributor metadata, unchanged from the request.
    pub contributor: Contributor,
}

/// The preparation engine: a pattern library plus the per-call pipeline.
///
/// Holds no per-call state. Sessions are processed sequentially here, but
/// with per-session placeholder scope each session's pipeline is a pure
/// function of its input, so callers may fan sessions out to workers and
/// merge the outcomes instead.
pub struct Preparer<'lib> {
    library: &'lib PatternLibrary,
}

struct SessionOutcome {
    session: PreparedSession,
    events: Vec<RedactionEvent>,
    residue: Vec<String>,
    kept: BTreeSet<String>,
    stripped: BTreeSet<String>,
}

impl<'lib> Preparer<'lib> {
    /// Engine over an injected pattern library.
    pub fn new(library: &'lib PatternLibrary) -> Self {
        Self { library }
    }

    /// Prepare a batch of sessions.
    pub fn prepare(&self, request: &PreparationRequest) -> Result<PreparationResult> {
        validate_config(&request.redaction).map_err(Error::from)?;

        let profile = resolve_profile(&request.profile_id, &request.profiles)?;
        let effective = effective_profile(profile, request.selected_fields.as_deref());
        validate_profile(&effective).map_err(Error::from)?;

        let detector = Detector::new(self.library, &request.redaction)?;
        let checker = ResidueChecker::new(self.library);
        let matcher = FieldMatcher::new(&effective.kept_fields);
        let threshold = request.redaction.residue_block_threshold;

        let mut report = RedactionReport::new(request.redaction.enabled_categories());
        let mut sessions = Vec::new();
        let mut errors: Vec<BatchError> = Vec::new();
        let mut redaction_info_map = BTreeMap::new();
        let mut fields_by_source: BTreeMap<SourceType, FieldCoverage> = BTreeMap::new();
        let mut stripped_fields = BTreeSet::new();
        let mut fields_present = BTreeSet::new();
        let mut stats = PreparationStats {
            requested: request.sessions.len(),
            prepared: 0,
            failed: 0,
            total_chars: 0,
            total_redactions: 0,
            blocked_sessions: 0,
        };

        let mut batch_assigner = PlaceholderAssigner::new();

        for input in &request.sessions {
            let mut session_assigner;
            let assigner = match request.redaction.placeholder_scope {
                PlaceholderScope::PerBatch => &mut batch_assigner,
                PlaceholderScope::PerSession => {
                    session_assigner = PlaceholderAssigner::new();
                    &mut session_assigner
                }
            };

            let issued_before = assigner.total_issued();
            match self.process_session(input, &matcher, &detector, &checker, assigner) {
                Ok(outcome) => {
                    let issued = assigner.total_issued() - issued_before;
                    let info = SessionRedactionInfo::from_events(
                        &outcome.events,
                        issued,
                        outcome.residue.clone(),
                        threshold,
                    );
                    debug!(
                        session_id = %input.session_id,
                        redactions = info.total_redactions,
                        kept = outcome.kept.len(),
                        stripped = outcome.stripped.len(),
                        "session prepared"
                    );

                    report.record_events(&outcome.events);
                    report.record_residue(
                        outcome
                            .residue
                            .iter()
                            .map(|w| format!("session {}: {}", input.session_id, w))
                            .collect(),
                        threshold,
                    );

                    let coverage = fields_by_source.entry(input.source).or_default();
                    coverage.present.extend(outcome.kept.iter().cloned());
                    coverage.present.extend(outcome.stripped.iter().cloned());
                    coverage.kept.extend(outcome.kept.iter().cloned());
                    coverage.stripped.extend(outcome.stripped.iter().cloned());

                    fields_present.extend(outcome.kept.iter().cloned());
                    fields_present.extend(outcome.stripped.iter().cloned());
                    stripped_fields.extend(outcome.stripped.iter().cloned());

                    stats.prepared += 1;
                    stats.total_chars += outcome.session.approx_chars as u64;
                    stats.total_redactions += info.total_redactions;
                    if info.blocked {
                        stats.blocked_sessions += 1;
                    }

                    redaction_info_map.insert(input.session_id.clone(), info);
                    sessions.push(outcome.session);
                }
                Err(err) => {
                    warn!(
                        correlation_id = %input.correlation_id,
                        error = %err,
                        "session preparation failed"
                    );
                    stats.failed += 1;
                    errors.push(BatchError {
                        item_id: input.correlation_id.to_string(),
                        error: StructuredError::from(&err),
                    });
                }
            }
        }

        info!(
            requested = stats.requested,
            prepared = stats.prepared,
            failed = stats.failed,
            redactions = stats.total_redactions,
            blocked = report.blocked,
            "batch prepared"
        );

        Ok(PreparationResult {
            sessions,
            redaction_report: report,
            stripped_fields,
            fields_present,
            fields_by_source,
            redaction_info_map,
            stats,
            errors,
            contributor: request.contributor.clone(),
        })
    }

    fn process_session(
        &self,
        input: &SessionInput,
        matcher: &FieldMatcher,
        detector: &Detector<'_>,
        checker: &ResidueChecker<'_>,
        assigner: &mut PlaceholderAssigner,
    ) -> Result<SessionOutcome> {
        let original: Value =
            serde_json::from_str(&input.raw_json).map_err(|e| Error::SessionParse {
                correlation_id: input.correlation_id.to_string(),
                reason: e.to_string(),
            })?;
        if !original.is_object() {
            return Err(Error::SessionShape {
                correlation_id: input.correlation_id.to_string(),
            });
        }

        let outcome = strip::strip(&original, matcher);
        let mut document = outcome.document;

        let mut events = Vec::new();
        redact_strings(&mut document, detector, assigner, &mut events);

        let raw_json = serde_json::to_string(&document)?;
        let residue = checker.check(&raw_json);

        let raw_json_original = serde_json::to_string(&original)?;
        let preview_original = truncate_preview(&serde_json::to_string_pretty(&original)?);
        let preview_redacted = truncate_preview(&serde_json::to_string_pretty(&document)?);

        let approx_chars = raw_json.chars().count();
        let raw_sha256 = sha256_hex(&raw_json);
        let score = contribution_score(approx_chars, events.len() as u64);

        Ok(SessionOutcome {
            session: PreparedSession {
                session_id: input.session_id.clone(),
                preview_original,
                preview_redacted,
                raw_json_original,
                raw_json,
                approx_chars,
                raw_sha256,
                score,
            },
            events,
            residue,
            kept: outcome.kept,
            stripped: outcome.stripped,
        })
    }
}

/// Apply the request's field selection on top of the resolved profile.
fn effective_profile(profile: Profile, selected_fields: Option<&[String]>) -> Profile {
    match selected_fields {
        Some(fields) if !fields.is_empty() => Profile {
            kept_fields: fields.to_vec(),
            ..profile
        },
        _ => profile,
    }
}

/// Redact every string leaf in place, accumulating events.
///
/// Object keys are deliberately left alone; a secret hiding in a field
/// name is caught by the residue pass over the serialized document.
fn redact_strings(
    value: &mut Value,
    detector: &Detector<'_>,
    assigner: &mut PlaceholderAssigner,
    events: &mut Vec<RedactionEvent>,
) {
    match value {
        Value::String(text) => {
            let (redacted, mut leaf_events) = detector.detect(text, assigner);
            if !leaf_events.is_empty() {
                *text = redacted;
                events.append(&mut leaf_events);
            }
        }
        Value::Array(items) => {
            for item in items {
                redact_strings(item, detector, assigner, events);
            }
        }
        Value::Object(map) => {
            for (_key, child) in map.iter_mut() {
                redact_strings(child, detector, assigner, events);
            }
        }
        _ => {}
    }
}
