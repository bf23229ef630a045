use std::collections::HashSet;

use crate::shared::constants::DOT;
use crate::shared::quoting::is_identifier_segment;
use crate::value::{Object, Value};

/// Collapse chains of single-key objects into dotted keys (`a.b.c: …`),
/// at most `flatten_depth` segments per chain.
///
/// A chain folds only when every segment is an identifier and the folded
/// key collides neither with a sibling key nor with a literal dotted key
/// already present at the document root.
#[must_use]
pub(crate) fn fold_keys(value: Value, flatten_depth: usize) -> Value {
    let root_dotted = match &value {
        Value::Object(entries) => entries
            .keys()
            .filter(|key| key.contains(DOT))
            .cloned()
            .collect(),
        _ => HashSet::new(),
    };
    fold_value(value, flatten_depth, &root_dotted, "")
}

fn fold_value(value: Value, budget: usize, root_dotted: &HashSet<String>, path: &str) -> Value {
    match value {
        Value::Object(entries) => Value::Object(fold_object(entries, budget, root_dotted, path)),
        Value::Array(items) => {
            // Array elements start a new folding scope.
            let empty = HashSet::new();
            Value::Array(
                items
                    .into_iter()
                    .map(|item| fold_value(item, budget, &empty, ""))
                    .collect(),
            )
        }
        primitive => primitive,
    }
}

fn fold_object(
    entries: Object,
    budget: usize,
    root_dotted: &HashSet<String>,
    path: &str,
) -> Object {
    let sibling_keys: HashSet<String> = entries.keys().cloned().collect();
    let mut out = Object::with_capacity(entries.len());

    for (key, value) in entries {
        let segments = chain_segments(&key, &value, budget);
        let foldable = segments.len() >= 2
            && segments.iter().all(|segment| is_identifier_segment(segment));

        if foldable {
            let segment_count = segments.len();
            let folded = segments.join(".");
            let absolute = join_path(path, &folded);
            if !sibling_keys.contains(&folded) && !root_dotted.contains(&absolute) {
                let leaf = unwrap_chain(value, segment_count - 1);
                let child_budget = budget.saturating_sub(segment_count);
                out.insert(folded, fold_value(leaf, child_budget, root_dotted, &absolute));
                continue;
            }
        }

        let absolute = join_path(path, &key);
        out.insert(key, fold_value(value, budget, root_dotted, &absolute));
    }

    out
}

/// Walk single-key objects from `key` downward, collecting the key chain
/// without consuming the tree. Stops at the first multi-key object,
/// non-object, or the budget.
fn chain_segments<'a>(key: &'a str, value: &'a Value, budget: usize) -> Vec<&'a str> {
    let mut segments = vec![key];
    let mut current = value;
    while segments.len() < budget {
        let Value::Object(entries) = current else {
            break;
        };
        if entries.len() != 1 {
            break;
        }
        let Some((next_key, next_value)) = entries.first() else {
            break;
        };
        segments.push(next_key.as_str());
        current = next_value;
    }
    segments
}

/// Consume `hops` levels of single-key objects, returning the leaf value.
fn unwrap_chain(value: Value, hops: usize) -> Value {
    let mut current = value;
    for _ in 0..hops {
        let mut entries = match current {
            Value::Object(entries) => entries,
            other => {
                current = other;
                break;
            }
        };
        let Some((_, inner)) = entries.shift_remove_index(0) else {
            current = Value::Object(entries);
            break;
        };
        current = inner;
    }
    current
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}{DOT}{key}")
    }
}
