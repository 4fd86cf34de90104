//! Field schema stripping.
//!
//! Stripping is structural and value-destructive: a field not retained by
//! the profile is deleted from the document, not masked. This is the
//! opposite of redaction's substitution approach and is irreversible by
//! design, so the outcome reports exactly which discovered paths were kept
//! and which were stripped.

use crate::path::{self, FieldMatcher};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Result of stripping one document.
#[derive(Debug, Clone)]
pub struct StripOutcome {
    /// The reduced document.
    pub document: Value,

    /// Discovered paths present in the reduced document.
    pub kept: BTreeSet<String>,

    /// Discovered paths deleted from the document.
    pub stripped: BTreeSet<String>,
}

/// Reduce a document to the fields a matcher retains.
///
/// Containers on the way to a kept field survive; containers left with no
/// kept descendants are pruned rather than emitted empty. Every discovered
/// path lands in exactly one of the two outcome sets.
pub fn strip(document: &Value, matcher: &FieldMatcher) -> StripOutcome {
    let mut kept = BTreeSet::new();
    let mut stripped = BTreeSet::new();

    let reduced = match document {
        Value::Object(map) => {
            strip_object(map, "", matcher, &mut kept, &mut stripped).unwrap_or_default()
        }
        _ => Map::new(),
    };

    StripOutcome {
        document: Value::Object(reduced),
        kept,
        stripped,
    }
}

fn strip_object(
    map: &Map<String, Value>,
    base: &str,
    matcher: &FieldMatcher,
    kept: &mut BTreeSet<String>,
    stripped: &mut BTreeSet<String>,
) -> Option<Map<String, Value>> {
    let mut out = Map::new();

    for (key, child) in map {
        let child_path = path::join(base, key);

        if matcher.keeps(&child_path) {
            kept.insert(child_path.clone());
            path::walk(child, &child_path, kept);
            out.insert(key.clone(), child.clone());
        } else if matcher.is_ancestor_of_kept(&child_path) {
            match strip_child(child, &child_path, matcher, kept, stripped) {
                Some(reduced) => {
                    kept.insert(child_path);
                    out.insert(key.clone(), reduced);
                }
                None => {
                    stripped.insert(child_path);
                }
            }
        } else {
            stripped.insert(child_path.clone());
            path::walk(child, &child_path, stripped);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn strip_child(
    child: &Value,
    child_path: &str,
    matcher: &FieldMatcher,
    kept: &mut BTreeSet<String>,
    stripped: &mut BTreeSet<String>,
) -> Option<Value> {
    match child {
        Value::Object(map) => {
            strip_object(map, child_path, matcher, kept, stripped).map(Value::Object)
        }
        Value::Array(items) => {
            let element_path = format!("{}[]", child_path);
            let reduced: Vec<Value> = items
                .iter()
                .filter_map(|item| strip_child(item, &element_path, matcher, kept, stripped))
                .collect();
            if reduced.is_empty() {
                None
            } else {
                Some(Value::Array(reduced))
            }
        }
        // A scalar cannot contain the kept descendant this branch is
        // looking for.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matcher(fields: &[&str]) -> FieldMatcher {
        let owned: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        FieldMatcher::new(&owned)
    }

    fn sample_doc() -> Value {
        json!({
            "session": {
                "start_time": "2026-01-05T10:00:00Z",
                "model": "agent-large",
                "total_input_tokens": 4200
            },
            "messages": [
                { "role": "user", "content": "hello", "timestamp": "t1" },
                { "role": "assistant", "content": "hi", "timestamp": "t2" }
            ],
            "tool_usages": [
                { "tool_name": "read_file", "output": "file contents", "duration_ms": 12 }
            ]
        })
    }

    #[test]
    fn test_keep_all_retains_everything() {
        let doc = sample_doc();
        let outcome = strip(&doc, &matcher(&["*"]));
        assert_eq!(outcome.document, doc);
        assert!(outcome.stripped.is_empty());
        assert_eq!(outcome.kept, crate::path::discover(&doc));
    }

    #[test]
    fn test_metadata_profile_drops_messages() {
        let doc = sample_doc();
        let outcome = strip(&doc, &matcher(&["session", "tool_usages[].tool_name"]));

        assert!(outcome.document.get("messages").is_none());
        assert!(outcome.document.get("session").is_some());
        assert_eq!(
            outcome.document["session"]["total_input_tokens"],
            json!(4200)
        );
        assert!(outcome.stripped.contains("messages"));
        assert!(outcome.stripped.contains("messages[].content"));
        assert!(outcome.kept.contains("session.total_input_tokens"));
    }

    #[test]
    fn test_partial_array_keeps_named_fields_only() {
        let doc = sample_doc();
        let outcome = strip(&doc, &matcher(&["tool_usages[].tool_name"]));

        let usages = outcome.document["tool_usages"].as_array().unwrap();
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0], json!({ "tool_name": "read_file" }));
        assert!(outcome.kept.contains("tool_usages"));
        assert!(outcome.kept.contains("tool_usages[].tool_name"));
        assert!(outcome.stripped.contains("tool_usages[].output"));
    }

    #[test]
    fn test_containers_without_kept_descendants_are_pruned() {
        let doc = sample_doc();
        let outcome = strip(&doc, &matcher(&["session.model"]));

        assert!(outcome.document.get("messages").is_none());
        assert!(outcome.document.get("tool_usages").is_none());
        assert_eq!(
            outcome.document,
            json!({ "session": { "model": "agent-large" } })
        );
    }

    #[test]
    fn test_every_discovered_path_is_accounted_for() {
        let doc = sample_doc();
        let discovered = crate::path::discover(&doc);
        let outcome = strip(&doc, &matcher(&["session", "messages[].role"]));

        let mut union = outcome.kept.clone();
        union.extend(outcome.stripped.iter().cloned());
        assert_eq!(union, discovered);
        assert!(outcome.kept.is_disjoint(&outcome.stripped));
    }

    #[test]
    fn test_stripping_is_deterministic() {
        let doc = sample_doc();
        let m = matcher(&["session", "tool_usages[].tool_name"]);
        let a = strip(&doc, &m);
        let b = strip(&doc, &m);
        assert_eq!(
            serde_json::to_string(&a.document).unwrap(),
            serde_json::to_string(&b.document).unwrap()
        );
        assert_eq!(a.kept, b.kept);
        assert_eq!(a.stripped, b.stripped);
    }
}
