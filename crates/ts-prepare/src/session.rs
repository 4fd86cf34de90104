//! Prepared-session assembly.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ts_common::{CorrelationId, SessionId, SourceType};

/// Maximum preview length in characters.
pub const PREVIEW_MAX_CHARS: usize = 2000;

/// One session handed to the orchestrator. Fetching the raw bytes is the
/// caller's job; the engine performs no I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInput {
    /// Correlation id from the capture layer; keys per-session errors.
    pub correlation_id: CorrelationId,

    /// Session id carried through to the prepared output.
    pub session_id: SessionId,

    /// Capture surface the document came from.
    pub source: SourceType,

    /// The raw session document as captured.
    pub raw_json: String,
}

/// A session ready for contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedSession {
    /// Session id from the input.
    pub session_id: SessionId,

    /// Truncated pretty-printed original document.
    pub preview_original: String,

    /// Truncated pretty-printed redacted document.
    pub preview_redacted: String,

    /// Canonical serialization of the original document.
    pub raw_json_original: String,

    /// Canonical serialization of the stripped, redacted document.
    pub raw_json: String,

    /// Character count of the redacted content.
    pub approx_chars: usize,

    /// SHA-256 of the redacted content, for dedup and integrity. Hashing
    /// the redacted bytes (not the original) keeps the digest publishable.
    pub raw_sha256: String,

    /// Contribution-quality heuristic in [0, 1].
    pub score: f64,
}

/// Hex SHA-256 of a string's bytes.
pub fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Truncate a preview at a char boundary.
pub fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_MAX_CHARS) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Contribution-quality score.
///
/// Larger sessions score higher up to a saturation point; heavy redaction
/// pulls the score down. Pure function of its inputs, so re-preparing the
/// same session always reproduces the same score.
pub fn contribution_score(approx_chars: usize, redactions: u64) -> f64 {
    if approx_chars == 0 {
        return 0.0;
    }
    let size_component = (approx_chars as f64 / 20_000.0).min(1.0);
    let per_hundred_chars = approx_chars as f64 / 100.0;
    let density = (redactions as f64 / per_hundred_chars.max(1.0)).min(1.0);
    size_component * (1.0 - density)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_value() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_is_stable() {
        assert_eq!(sha256_hex("same input"), sha256_hex("same input"));
        assert_ne!(sha256_hex("one"), sha256_hex("two"));
    }

    #[test]
    fn test_truncate_preview_short_input() {
        assert_eq!(truncate_preview("short"), "short");
    }

    #[test]
    fn test_truncate_preview_long_input() {
        let long = "x".repeat(PREVIEW_MAX_CHARS + 500);
        let preview = truncate_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS);
    }

    #[test]
    fn test_truncate_preview_multibyte_boundary() {
        let long = "é".repeat(PREVIEW_MAX_CHARS + 10);
        let preview = truncate_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS);
    }

    #[test]
    fn test_score_monotonic_in_size() {
        let small = contribution_score(1_000, 0);
        let large = contribution_score(10_000, 0);
        assert!(large > small);
        assert_eq!(contribution_score(0, 0), 0.0);
    }

    #[test]
    fn test_score_penalizes_redaction_density() {
        let clean = contribution_score(10_000, 0);
        let noisy = contribution_score(10_000, 50);
        assert!(noisy < clean);
    }

    #[test]
    fn test_score_saturates() {
        assert_eq!(contribution_score(20_000, 0), 1.0);
        assert_eq!(contribution_score(200_000, 0), 1.0);
    }

    #[test]
    fn test_score_bounds() {
        for (chars, redactions) in [(10usize, 1000u64), (50_000, 0), (1, 0), (100, 100)] {
            let s = contribution_score(chars, redactions);
            assert!((0.0..=1.0).contains(&s), "score {} out of bounds", s);
        }
    }
}
