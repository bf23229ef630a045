use crate::shared::constants::{BACKSLASH, DOUBLE_QUOTE};

/// Escape a string for emission inside double quotes. The escape set is
/// exactly `\\`, `\"`, `\n`, `\r`, `\t`.
#[must_use]
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Unescape the body of a quoted string literal.
///
/// # Errors
///
/// Returns a message when the body contains an escape outside the supported
/// set or ends with a dangling backslash.
pub fn unescape_string(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != BACKSLASH {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            return Err("Invalid escape sequence: backslash at end of string".to_string());
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '\\' => out.push(BACKSLASH),
            '"' => out.push(DOUBLE_QUOTE),
            other => return Err(format!("Invalid escape sequence: \\{other}")),
        }
    }

    Ok(out)
}

/// Index of the quote closing the literal that opens at `start`, honoring
/// backslash escapes. `start` must point at the opening quote.
#[must_use]
pub fn find_closing_quote(content: &str, start: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' if pos + 1 < bytes.len() => pos += 2,
            b'"' => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}

/// First occurrence of an ASCII `target` outside of quoted regions, starting
/// at byte offset `from`.
#[must_use]
pub fn find_unquoted_char(content: &str, target: char, from: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let target = target as u8;
    let mut in_quotes = false;
    let mut pos = from;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' if in_quotes && pos + 1 < bytes.len() => {
                pos += 2;
                continue;
            }
            b'"' => in_quotes = !in_quotes,
            byte if byte == target && !in_quotes => return Some(pos),
            _ => {}
        }
        pos += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_roundtrips() {
        let raw = "a\\b\"c\nd\re\tf";
        assert_eq!(unescape_string(&escape_string(raw)).unwrap(), raw);
    }

    #[test]
    fn rejects_unknown_escape() {
        assert!(unescape_string("\\q").is_err());
        assert!(unescape_string("trailing\\").is_err());
    }

    #[test]
    fn finds_chars_outside_quotes() {
        assert_eq!(find_unquoted_char("\"a:b\": c", ':', 0), Some(5));
        assert_eq!(find_unquoted_char("\"a,b\",c", ',', 0), Some(5));
        assert_eq!(find_unquoted_char("\"a,b\"", ',', 0), None);
        assert_eq!(find_closing_quote("\"a\\\"b\"", 0), Some(5));
    }
}
