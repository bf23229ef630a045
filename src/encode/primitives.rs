use std::fmt::Write;

use crate::options::{Delimiter, EncodeOptions};
use crate::shared::constants::{DOUBLE_QUOTE, LENGTH_MARKER};
use crate::shared::quoting::{is_safe_unquoted, is_valid_unquoted_key};
use crate::shared::strings::escape_string;
use crate::value::Value;

/// Text form of a primitive, or `None` for arrays and objects (the
/// classifier never routes containers here).
#[must_use]
pub(crate) fn primitive_text(value: &Value, delimiter: Delimiter) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(value) => Some(value.to_string()),
        Value::Number(value) => Some(format_number(*value)),
        Value::String(value) => Some(encode_string(value, delimiter)),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[must_use]
pub(crate) fn encode_string(value: &str, delimiter: Delimiter) -> String {
    if is_safe_unquoted(value, delimiter) {
        return value.to_string();
    }
    format!("{DOUBLE_QUOTE}{}{DOUBLE_QUOTE}", escape_string(value))
}

#[must_use]
pub(crate) fn encode_key(key: &str) -> String {
    if is_valid_unquoted_key(key) {
        return key.to_string();
    }
    format!("{DOUBLE_QUOTE}{}{DOUBLE_QUOTE}", escape_string(key))
}

#[must_use]
pub(crate) fn join_primitives<'a>(
    values: impl IntoIterator<Item = &'a Value>,
    delimiter: Delimiter,
) -> String {
    let mut out = String::new();
    for (idx, text) in values
        .into_iter()
        .filter_map(|value| primitive_text(value, delimiter))
        .enumerate()
    {
        if idx > 0 {
            out.push(delimiter.as_char());
        }
        out.push_str(&text);
    }
    out
}

/// Render an array header: `key?[#?N delim?]{fields}?:`.
#[must_use]
pub(crate) fn format_header(
    key: Option<&str>,
    length: usize,
    fields: Option<&[String]>,
    options: &EncodeOptions,
) -> String {
    let mut header = String::new();

    if let Some(key) = key {
        header.push_str(&encode_key(key));
    }

    header.push('[');
    if options.length_marker {
        header.push(LENGTH_MARKER);
    }
    let _ = write!(header, "{length}");
    if options.delimiter != Delimiter::Comma {
        header.push(options.delimiter.as_char());
    }
    header.push(']');

    if let Some(fields) = fields {
        header.push('{');
        for (idx, field) in fields.iter().enumerate() {
            if idx > 0 {
                header.push(options.delimiter.as_char());
            }
            header.push_str(&encode_key(field));
        }
        header.push('}');
    }

    header.push(':');
    header
}

#[must_use]
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return "null".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_shortest_form() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn headers_carry_marker_and_delimiter() {
        let plain = EncodeOptions::default();
        assert_eq!(format_header(Some("tags"), 3, None, &plain), "tags[3]:");

        let piped = EncodeOptions::default()
            .with_delimiter(Delimiter::Pipe)
            .with_length_marker(true);
        assert_eq!(format_header(Some("scores"), 3, None, &piped), "scores[#3|]:");

        let fields = vec!["id".to_string(), "name".to_string()];
        assert_eq!(
            format_header(Some("users"), 2, Some(&fields), &plain),
            "users[2]{id,name}:"
        );
        assert_eq!(
            format_header(None, 2, Some(&fields), &piped),
            "[#2|]{id|name}:"
        );
    }
}
