//! Stable, category-scoped placeholder assignment.
//!
//! Each detected raw value maps to exactly one placeholder token within the
//! assigner's scope (one session, or one batch when the caller opts into
//! batch-scoped placeholders). Lookup is by exact string identity; there is
//! no fuzzy matching.

use std::collections::HashMap;
use ts_common::RedactionCategory;

/// Allocates `<PREFIX_N>` placeholder tokens.
///
/// Suffix counters run per category, so a suffix is never reused across
/// categories and never reused for a different raw value. A collision is a
/// logic error, not a recoverable condition.
#[derive(Debug, Default)]
pub struct PlaceholderAssigner {
    assigned: HashMap<RedactionCategory, HashMap<String, String>>,
    counters: HashMap<RedactionCategory, u32>,
}

impl PlaceholderAssigner {
    /// Create an empty assigner for a fresh scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the placeholder for `raw`, allocating the category's next
    /// suffix on first sight of the value.
    pub fn assign(&mut self, category: RedactionCategory, prefix: &str, raw: &str) -> String {
        let by_value = self.assigned.entry(category).or_default();
        if let Some(existing) = by_value.get(raw) {
            return existing.clone();
        }

        let counter = self.counters.entry(category).or_insert(0);
        *counter += 1;
        let placeholder = format!("<{}_{}>", prefix, counter);

        debug_assert!(
            !by_value.values().any(|p| p == &placeholder),
            "placeholder collision for category {}",
            category
        );
        by_value.insert(raw.to_string(), placeholder.clone());
        placeholder
    }

    /// Number of distinct placeholders issued for a category.
    pub fn issued(&self, category: RedactionCategory) -> u32 {
        self.counters.get(&category).copied().unwrap_or(0)
    }

    /// Number of distinct placeholders issued across all categories.
    pub fn total_issued(&self) -> u32 {
        self.counters.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_allocates() {
        let mut assigner = PlaceholderAssigner::new();
        let p = assigner.assign(RedactionCategory::Secrets, "SECRET", "sk-abc123def456");
        assert_eq!(p, "<SECRET_1>");
        assert_eq!(assigner.issued(RedactionCategory::Secrets), 1);
    }

    #[test]
    fn test_repeat_value_reuses_placeholder() {
        let mut assigner = PlaceholderAssigner::new();
        let first = assigner.assign(RedactionCategory::Secrets, "SECRET", "same-value");
        let second = assigner.assign(RedactionCategory::Secrets, "SECRET", "same-value");
        assert_eq!(first, second);
        assert_eq!(assigner.issued(RedactionCategory::Secrets), 1);
    }

    #[test]
    fn test_distinct_values_distinct_placeholders() {
        let mut assigner = PlaceholderAssigner::new();
        let a = assigner.assign(RedactionCategory::Pii, "EMAIL", "a@example.com");
        let b = assigner.assign(RedactionCategory::Pii, "EMAIL", "b@example.com");
        assert_ne!(a, b);
        assert_eq!(a, "<EMAIL_1>");
        assert_eq!(b, "<EMAIL_2>");
    }

    #[test]
    fn test_counters_are_per_category() {
        let mut assigner = PlaceholderAssigner::new();
        assigner.assign(RedactionCategory::Secrets, "SECRET", "v1");
        let custom = assigner.assign(RedactionCategory::Custom, "CUSTOM", "v2");
        // A fresh category starts at 1 regardless of other categories.
        assert_eq!(custom, "<CUSTOM_1>");
        assert_eq!(assigner.total_issued(), 2);
    }

    #[test]
    fn test_mixed_prefixes_share_category_counter() {
        let mut assigner = PlaceholderAssigner::new();
        let a = assigner.assign(RedactionCategory::Secrets, "API_KEY", "sk-one-11111111");
        let b = assigner.assign(RedactionCategory::Secrets, "TOKEN", "ghp_two222222222");
        assert_eq!(a, "<API_KEY_1>");
        assert_eq!(b, "<TOKEN_2>");
    }
}
