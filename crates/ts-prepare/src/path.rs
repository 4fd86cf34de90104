//! Field paths over JSON documents.
//!
//! Paths use dot notation for object keys and a `[]` suffix to denote
//! "for every element of this array, descend": `tool_usages[].tool_name`.
//! Array indices are never part of a path; all elements of an array share
//! one shape as far as profiles are concerned.

use serde_json::Value;
use std::collections::BTreeSet;

/// Append one object key to a display path.
pub fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Strip `[]` markers for matching; `a[].b` and `a.b` are value-equal.
pub fn normalize(path: &str) -> String {
    path.replace("[]", "")
}

/// Discover every object-key path in a document, in sorted order.
pub fn discover(document: &Value) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    walk(document, "", &mut paths);
    paths
}

/// Record every object-key path under `value`, rooted at `path`.
pub(crate) fn walk(value: &Value, path: &str, paths: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = join(path, key);
                paths.insert(child_path.clone());
                walk(child, &child_path, paths);
            }
        }
        Value::Array(items) => {
            let element_path = format!("{}[]", path);
            for item in items {
                walk(item, &element_path, paths);
            }
        }
        _ => {}
    }
}

/// Compiled keep-decision for one profile's kept-field patterns.
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    keep_all: bool,
    normalized: Vec<String>,
}

impl FieldMatcher {
    /// Build a matcher from kept-field patterns.
    pub fn new(kept_fields: &[String]) -> Self {
        let keep_all = kept_fields.iter().any(|f| f == ts_config::KEEP_ALL);
        let normalized = kept_fields
            .iter()
            .filter(|f| f.as_str() != ts_config::KEEP_ALL)
            .map(|f| normalize(f))
            .collect();
        Self {
            keep_all,
            normalized,
        }
    }

    /// Whether a discovered field is retained: exact match against a
    /// pattern, or a dot-descendant of one (`session` keeps
    /// `session.start_time`).
    pub fn keeps(&self, path: &str) -> bool {
        if self.keep_all {
            return true;
        }
        let path = normalize(path);
        self.normalized
            .iter()
            .any(|kept| path == *kept || is_descendant(&path, kept))
    }

    /// Whether some kept pattern lies strictly below this field, so the
    /// container must be descended into rather than dropped outright.
    pub fn is_ancestor_of_kept(&self, path: &str) -> bool {
        if self.keep_all {
            return true;
        }
        let path = normalize(path);
        self.normalized.iter().any(|kept| is_descendant(kept, &path))
    }
}

fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join() {
        assert_eq!(join("", "session"), "session");
        assert_eq!(join("session", "start_time"), "session.start_time");
    }

    #[test]
    fn test_normalize_strips_brackets() {
        assert_eq!(normalize("tool_usages[].tool_name"), "tool_usages.tool_name");
        assert_eq!(normalize("session.start_time"), "session.start_time");
    }

    #[test]
    fn test_discover_nested_paths() {
        let doc = json!({
            "session": { "start_time": "2026-01-01", "model": "m" },
            "messages": [ { "role": "user", "content": "hi" } ],
        });
        let paths = discover(&doc);

        assert!(paths.contains("session"));
        assert!(paths.contains("session.start_time"));
        assert!(paths.contains("messages"));
        assert!(paths.contains("messages[].role"));
        assert!(paths.contains("messages[].content"));
    }

    #[test]
    fn test_discover_merges_array_element_shapes() {
        let doc = json!({
            "items": [ { "a": 1 }, { "b": 2 } ],
        });
        let paths = discover(&doc);
        assert!(paths.contains("items[].a"));
        assert!(paths.contains("items[].b"));
    }

    #[test]
    fn test_matcher_exact_and_descendant() {
        let matcher = FieldMatcher::new(&["session".to_string()]);
        assert!(matcher.keeps("session"));
        assert!(matcher.keeps("session.start_time"));
        assert!(!matcher.keeps("messages"));
        assert!(!matcher.keeps("session_extra"));
    }

    #[test]
    fn test_matcher_bracket_patterns() {
        let matcher = FieldMatcher::new(&["tool_usages[].tool_name".to_string()]);
        assert!(matcher.keeps("tool_usages[].tool_name"));
        assert!(!matcher.keeps("tool_usages[].output"));
    }

    #[test]
    fn test_matcher_keep_all_sentinel() {
        let matcher = FieldMatcher::new(&["*".to_string()]);
        assert!(matcher.keeps("anything.at.all"));
        assert!(matcher.is_ancestor_of_kept("anything"));
    }

    #[test]
    fn test_matcher_ancestor_of_kept() {
        let matcher = FieldMatcher::new(&["tool_usages[].tool_name".to_string()]);
        assert!(matcher.is_ancestor_of_kept("tool_usages"));
        assert!(!matcher.is_ancestor_of_kept("messages"));
        // The kept path itself is not its own ancestor.
        assert!(!matcher.is_ancestor_of_kept("tool_usages[].tool_name"));
    }
}
