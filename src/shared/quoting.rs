use crate::options::Delimiter;
use crate::shared::constants::LIST_ITEM_MARKER;
use crate::shared::literals::{is_bool_or_null_literal, is_numeric_like};

/// Keys matching `[A-Za-z_][A-Za-z0-9_.]*` are emitted bare.
#[must_use]
pub fn is_valid_unquoted_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.')
}

/// A single dotted-path segment: `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// The unquoted-safety predicate for string values: a string is emitted bare
/// iff nothing about it could be re-read as structure or as another literal.
#[must_use]
pub fn is_safe_unquoted(value: &str, delimiter: Delimiter) -> bool {
    if value.is_empty() || value.trim() != value {
        return false;
    }
    if is_bool_or_null_literal(value) || is_numeric_like(value) {
        return false;
    }
    if value.starts_with(LIST_ITEM_MARKER) {
        return false;
    }
    if value.contains(delimiter.as_char()) {
        return false;
    }
    !value.chars().any(|ch| {
        matches!(
            ch,
            ':' | '"' | '\\' | '[' | ']' | '{' | '}' | '\n' | '\r' | '\t'
        )
    })
}
