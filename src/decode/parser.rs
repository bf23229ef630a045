use crate::error::{Result, ToonError};
use crate::options::Delimiter;
use crate::shared::constants::{
    CLOSE_BRACE, CLOSE_BRACKET, COLON, DOUBLE_QUOTE, LENGTH_MARKER, OPEN_BRACE, OPEN_BRACKET,
    PIPE, TAB,
};
use crate::shared::literals::{is_bool_or_null_literal, is_numeric_literal};
use crate::shared::strings::{find_closing_quote, find_unquoted_char, unescape_string};
use crate::value::Value;

/// Parsed form of `key?[#?N delim?]{fields}?:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArrayHeader {
    pub key: Option<String>,
    pub length: usize,
    pub delimiter: Delimiter,
    pub fields: Option<Vec<String>>,
    /// The `#` sigil was present. Accepted and otherwise ignored.
    pub has_length_marker: bool,
}

/// An array header line together with its inline tail, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderLine {
    pub header: ArrayHeader,
    pub inline: Option<String>,
}

/// Recognize an array header line. Returns `Ok(None)` when the line is not
/// header-shaped (no unquoted `[` before the first unquoted colon); a line
/// that is header-shaped but malformed is a grammar error.
pub(crate) fn parse_header_line(content: &str, line: usize) -> Result<Option<HeaderLine>> {
    let Some(bracket_start) = find_unquoted_char(content, OPEN_BRACKET, 0) else {
        return Ok(None);
    };
    if let Some(colon) = find_unquoted_char(content, COLON, 0) {
        if colon < bracket_start {
            return Ok(None);
        }
    }

    let Some(close_offset) = content[bracket_start..].find(CLOSE_BRACKET) else {
        return Err(ToonError::grammar(
            line,
            "Malformed array header: missing ']'",
        ));
    };
    let bracket_end = bracket_start + close_offset;

    let (length, delimiter, has_length_marker) =
        parse_bracket_body(&content[bracket_start + 1..bracket_end], line)?;

    let key = if bracket_start == 0 {
        None
    } else {
        let raw_key = content[..bracket_start].trim();
        if raw_key.is_empty() {
            None
        } else if raw_key.starts_with(DOUBLE_QUOTE) {
            Some(parse_string_literal(raw_key, line)?)
        } else {
            Some(raw_key.to_string())
        }
    };

    let mut cursor = bracket_end + 1;
    let mut fields = None;
    if content[cursor..].starts_with(OPEN_BRACE) {
        let Some(close) = find_unquoted_char(content, CLOSE_BRACE, cursor) else {
            return Err(ToonError::grammar(
                line,
                "Malformed array header: missing '}'",
            ));
        };
        let body = &content[cursor + 1..close];
        let parsed = split_delimited(body, delimiter)
            .iter()
            .map(|field| parse_string_literal(field, line))
            .collect::<Result<Vec<_>>>()?;
        if !parsed.is_empty() {
            fields = Some(parsed);
        }
        cursor = close + 1;
    }

    if !content[cursor..].starts_with(COLON) {
        return Err(ToonError::grammar(
            line,
            "Missing colon after array header",
        ));
    }

    let tail = content[cursor + 1..].trim();
    Ok(Some(HeaderLine {
        header: ArrayHeader {
            key,
            length,
            delimiter,
            fields,
            has_length_marker,
        },
        inline: if tail.is_empty() {
            None
        } else {
            Some(tail.to_string())
        },
    }))
}

/// Parse the bracket body: optional `#`, base-10 digits, optional trailing
/// `|` or tab selecting the delimiter.
fn parse_bracket_body(body: &str, line: usize) -> Result<(usize, Delimiter, bool)> {
    let mut rest = body;

    let has_length_marker = rest.starts_with(LENGTH_MARKER);
    if has_length_marker {
        rest = &rest[LENGTH_MARKER.len_utf8()..];
    }

    let delimiter = if rest.ends_with(TAB) {
        Delimiter::Tab
    } else if rest.ends_with(PIPE) {
        Delimiter::Pipe
    } else {
        Delimiter::Comma
    };
    if delimiter != Delimiter::Comma {
        rest = &rest[..rest.len() - 1];
    }

    let length = rest
        .parse::<usize>()
        .map_err(|_| ToonError::invalid_array_length(line, body))?;

    Ok((length, delimiter, has_length_marker))
}

/// Split on the delimiter outside of quoted regions, trimming each token.
pub(crate) fn split_delimited(input: &str, delimiter: Delimiter) -> Vec<String> {
    let delimiter = delimiter.as_char();
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if in_quotes && ch == '\\' {
            buffer.push(ch);
            if let Some(next) = chars.next() {
                buffer.push(next);
            }
            continue;
        }
        if ch == DOUBLE_QUOTE {
            in_quotes = !in_quotes;
            buffer.push(ch);
            continue;
        }
        if ch == delimiter && !in_quotes {
            tokens.push(buffer.trim().to_string());
            buffer.clear();
            continue;
        }
        buffer.push(ch);
    }

    if !buffer.is_empty() || !tokens.is_empty() {
        tokens.push(buffer.trim().to_string());
    }

    tokens
}

/// Parse one primitive token: quoted string, literal, number, or bare string.
pub(crate) fn parse_primitive_token(token: &str, line: usize) -> Result<Value> {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return Ok(Value::String(String::new()));
    }

    if trimmed.starts_with(DOUBLE_QUOTE) {
        return Ok(Value::String(parse_string_literal(trimmed, line)?));
    }

    if is_bool_or_null_literal(trimmed) {
        return Ok(match trimmed {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Null,
        });
    }

    if is_numeric_literal(trimmed) {
        let number = trimmed.parse::<f64>().unwrap_or(f64::NAN);
        return Ok(Value::number(number));
    }

    Ok(Value::String(trimmed.to_string()))
}

/// Parse a string token: a quoted literal must close at the end of the
/// token; anything else is returned verbatim (trimmed).
pub(crate) fn parse_string_literal(token: &str, line: usize) -> Result<String> {
    let trimmed = token.trim();

    if !trimmed.starts_with(DOUBLE_QUOTE) {
        return Ok(trimmed.to_string());
    }

    let closing =
        find_closing_quote(trimmed, 0).ok_or_else(|| ToonError::unterminated_string(line))?;
    if closing != trimmed.len() - 1 {
        return Err(ToonError::grammar(
            line,
            "Unexpected characters after closing quote",
        ));
    }
    unescape_string(&trimmed[1..closing]).map_err(|message| ToonError::grammar(line, message))
}

/// Parse the key of a key-value line. Returns the key, the byte offset just
/// past the colon, and whether the key was quoted.
pub(crate) fn parse_key_token(content: &str, line: usize) -> Result<(String, usize, bool)> {
    if content.starts_with(DOUBLE_QUOTE) {
        let closing =
            find_closing_quote(content, 0).ok_or_else(|| ToonError::grammar(line, "Unterminated quoted key"))?;
        let key = unescape_string(&content[1..closing])
            .map_err(|message| ToonError::grammar(line, message))?;
        let after = closing + 1;
        if content[after..].starts_with(COLON) {
            return Ok((key, after + 1, true));
        }
        return Err(ToonError::missing_colon(line));
    }

    let Some(colon) = content.find(COLON) else {
        return Err(ToonError::missing_colon(line));
    };
    Ok((content[..colon].trim().to_string(), colon + 1, false))
}

/// A keyless array header starts the line with `[` and carries a colon.
pub(crate) fn is_keyless_header(content: &str) -> bool {
    content.starts_with(OPEN_BRACKET) && find_unquoted_char(content, COLON, 0).is_some()
}

pub(crate) fn looks_like_key_value(content: &str) -> bool {
    find_unquoted_char(content, COLON, 0).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(content: &str) -> HeaderLine {
        parse_header_line(content, 1).unwrap().unwrap()
    }

    #[test]
    fn parses_keyed_headers_with_tails() {
        let parsed = header("tags[3]: a,b,c");
        assert_eq!(parsed.header.key.as_deref(), Some("tags"));
        assert_eq!(parsed.header.length, 3);
        assert_eq!(parsed.header.delimiter, Delimiter::Comma);
        assert!(!parsed.header.has_length_marker);
        assert_eq!(parsed.inline.as_deref(), Some("a,b,c"));
    }

    #[test]
    fn parses_marker_delimiter_and_fields() {
        let parsed = header("users[#2|]{id|name}:");
        assert!(parsed.header.has_length_marker);
        assert_eq!(parsed.header.delimiter, Delimiter::Pipe);
        assert_eq!(
            parsed.header.fields,
            Some(vec!["id".to_string(), "name".to_string()])
        );
        assert_eq!(parsed.inline, None);
    }

    #[test]
    fn key_value_lines_are_not_headers() {
        assert_eq!(parse_header_line("a: b", 1).unwrap(), None);
        assert_eq!(parse_header_line("note: \"x[1]: y\"", 1).unwrap(), None);
        assert_eq!(parse_header_line("key: [oops", 1).unwrap(), None);
    }

    #[test]
    fn malformed_headers_are_grammar_errors() {
        assert!(parse_header_line("items[abc]: x", 1).is_err());
        assert!(parse_header_line("items[2", 1).is_err());
        assert!(parse_header_line("items[2]{a,b", 1).is_err());
        assert!(parse_header_line("items[2] x: y", 1).is_err());
    }

    #[test]
    fn primitive_tokens_follow_literal_rules() {
        assert_eq!(parse_primitive_token("true", 1).unwrap(), Value::Bool(true));
        assert_eq!(parse_primitive_token("null", 1).unwrap(), Value::Null);
        assert_eq!(
            parse_primitive_token("-2.5", 1).unwrap(),
            Value::Number(-2.5)
        );
        assert_eq!(
            parse_primitive_token("007", 1).unwrap(),
            Value::String("007".to_string())
        );
        assert_eq!(
            parse_primitive_token("\"a,b\"", 1).unwrap(),
            Value::String("a,b".to_string())
        );
        assert!(parse_primitive_token("\"open", 1).is_err());
    }

    #[test]
    fn splits_outside_quotes_only() {
        assert_eq!(
            split_delimited("1,\"Hello, world\",x", Delimiter::Comma),
            vec!["1", "\"Hello, world\"", "x"]
        );
        assert_eq!(split_delimited("", Delimiter::Comma), Vec::<String>::new());
    }
}
