use crate::error::{Result, ToonError};
use crate::options::ExpandPaths;
use crate::shared::constants::DOT;
use crate::shared::quoting::is_identifier_segment;
use crate::value::{Object, Value};

/// Insert a decoded entry into an object under the active expansion policy.
///
/// With expansion off this is a plain insert. In `Safe` mode an unquoted
/// dotted key whose segments are all identifiers is expanded into nested
/// objects; everything else inserts literally, merging object-into-object
/// on collision.
pub(crate) fn insert_entry(
    entries: &mut Object,
    key: String,
    was_quoted: bool,
    value: Value,
    expand: ExpandPaths,
    strict: bool,
) -> Result<()> {
    if expand == ExpandPaths::Off {
        entries.insert(key, value);
        return Ok(());
    }

    if !was_quoted && key.contains(DOT) {
        let segments: Vec<&str> = key.split(DOT).collect();
        if segments.iter().all(|segment| is_identifier_segment(segment)) {
            return insert_path(entries, &key, &segments, value, strict);
        }
    }

    insert_literal(entries, key, value, strict)
}

fn insert_path(
    entries: &mut Object,
    full_path: &str,
    segments: &[&str],
    value: Value,
    strict: bool,
) -> Result<()> {
    let [head, rest @ ..] = segments else {
        return Ok(());
    };
    if rest.is_empty() {
        return insert_literal(entries, (*head).to_string(), value, strict);
    }

    match entries.get_mut(*head) {
        Some(Value::Object(_)) => {}
        Some(existing) => {
            if strict {
                return Err(ToonError::expand_conflict(
                    full_path,
                    format!(
                        "segment '{head}' conflicts with existing {}",
                        value_kind(existing)
                    ),
                ));
            }
            entries.insert((*head).to_string(), Value::Object(Object::new()));
        }
        None => {
            entries.insert((*head).to_string(), Value::Object(Object::new()));
        }
    }

    match entries.get_mut(*head) {
        Some(Value::Object(child)) => insert_path(child, full_path, rest, value, strict),
        _ => Ok(()),
    }
}

fn insert_literal(entries: &mut Object, key: String, value: Value, strict: bool) -> Result<()> {
    let Some(existing) = entries.get_mut(&key) else {
        entries.insert(key, value);
        return Ok(());
    };

    match (existing, value) {
        (Value::Object(target), Value::Object(source)) => merge_objects(target, source, strict),
        (existing, value) => {
            if strict {
                return Err(ToonError::expand_conflict(
                    &key,
                    format!(
                        "cannot merge {} with {}",
                        value_kind(existing),
                        value_kind(&value)
                    ),
                ));
            }
            *existing = value;
            Ok(())
        }
    }
}

fn merge_objects(target: &mut Object, source: Object, strict: bool) -> Result<()> {
    for (key, value) in source {
        insert_literal(target, key, value, strict)?;
    }
    Ok(())
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        _ => "primitive",
    }
}
