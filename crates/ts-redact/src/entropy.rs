//! High-entropy token scanning.
//!
//! Catches secrets with no known format (random API keys, hashes encoded
//! as base64) by measuring the Shannon entropy of candidate token runs.
//! This is the least precise detection layer and is intentionally the
//! lowest priority and the one callers can switch off.

/// Default minimum candidate length in bytes.
///
/// Shorter runs cannot carry enough entropy to clear the threshold: a run
/// of n distinct bytes tops out at log2(n) bits per byte.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 20;

/// Default entropy threshold in bits per byte.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 4.0;

/// Scanner configuration for high-entropy candidates.
#[derive(Debug, Clone, Copy)]
pub struct EntropyScanner {
    min_length: usize,
    threshold: f64,
}

impl EntropyScanner {
    /// Scanner with default tuning.
    pub fn new() -> Self {
        Self {
            min_length: DEFAULT_MIN_TOKEN_LEN,
            threshold: DEFAULT_ENTROPY_THRESHOLD,
        }
    }

    /// Scanner with explicit tuning.
    pub fn with_tuning(min_length: usize, threshold: f64) -> Self {
        Self {
            min_length,
            threshold,
        }
    }

    /// Byte spans of high-entropy tokens in `text`, in order.
    ///
    /// A candidate is a maximal run of base64-alphabet bytes (plus `_` and
    /// `-`) of at least the minimum length. Runs of purely alphabetic
    /// characters, underscores, and dashes are skipped so ordinary
    /// identifiers never reach the entropy test.
    pub fn scan(&self, text: &str) -> Vec<(usize, usize)> {
        let bytes = text.as_bytes();
        let mut spans = Vec::new();
        let mut start = None;

        for (i, &b) in bytes.iter().enumerate() {
            if is_token_byte(b) {
                if start.is_none() {
                    start = Some(i);
                }
            } else if let Some(s) = start.take() {
                self.consider(text, s, i, &mut spans);
            }
        }
        if let Some(s) = start {
            self.consider(text, s, bytes.len(), &mut spans);
        }

        spans
    }

    /// Whether a single token is high-entropy.
    pub fn is_high_entropy(&self, token: &str) -> bool {
        if token.len() < self.min_length {
            return false;
        }
        if looks_like_identifier(token) {
            return false;
        }
        shannon_entropy(token) > self.threshold
    }

    fn consider(&self, text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
        let token = &text[start..end];
        if self.is_high_entropy(token) {
            spans.push((start, end));
        }
    }
}

impl Default for EntropyScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=' | b'_' | b'-')
}

fn looks_like_identifier(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == '_' || c == '-')
}

/// Shannon entropy of a string in bits per byte.
///
/// Base64-encoded secrets typically land well above 4.0; English words and
/// identifiers stay below it.
pub fn shannon_entropy(value: &str) -> f64 {
    if value.is_empty() {
        return 0.0;
    }

    let mut freq = [0u32; 256];
    let len = value.len() as f64;

    for byte in value.bytes() {
        freq[byte as usize] += 1;
    }

    let mut entropy = 0.0;
    for &count in &freq {
        if count > 0 {
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }
    }

    entropy
}
