use crate::decode::parser::ArrayHeader;
use crate::decode::scanner::{BlankLine, ParsedLine};
use crate::error::{Result, ToonError};
use crate::options::Delimiter;
use crate::shared::constants::{COLON, LIST_ITEM_MARKER, LIST_ITEM_PREFIX};
use crate::shared::strings::find_unquoted_char;

pub(crate) fn is_list_item(content: &str) -> bool {
    content.starts_with(LIST_ITEM_PREFIX) || content == LIST_ITEM_MARKER
}

/// Strict mode: the consumed count must equal the declared length.
pub(crate) fn check_count(
    actual: usize,
    expected: usize,
    what: &str,
    line: impl Into<Option<usize>>,
    strict: bool,
) -> Result<()> {
    if strict && actual != expected {
        return Err(ToonError::count_mismatch(line, what, expected, actual));
    }
    Ok(())
}

/// Strict mode: no further list item may follow a completed list block.
pub(crate) fn check_no_surplus_list_items(
    next: Option<&ParsedLine>,
    item_depth: usize,
    expected: usize,
    strict: bool,
) -> Result<()> {
    if !strict {
        return Ok(());
    }
    if let Some(line) = next {
        if line.depth == item_depth && is_list_item(&line.content) {
            return Err(ToonError::surplus_items(
                line.line_number,
                "list array items",
                expected,
            ));
        }
    }
    Ok(())
}

/// Strict mode: no further data row may follow a completed tabular block.
pub(crate) fn check_no_surplus_rows(
    next: Option<&ParsedLine>,
    row_depth: usize,
    header: &ArrayHeader,
    strict: bool,
) -> Result<()> {
    if !strict {
        return Ok(());
    }
    if let Some(line) = next {
        if line.depth == row_depth
            && !is_list_item(&line.content)
            && is_data_row(&line.content, header.delimiter)
        {
            return Err(ToonError::surplus_items(
                line.line_number,
                "tabular rows",
                header.length,
            ));
        }
    }
    Ok(())
}

/// Strict mode: blank lines may not appear between the first and last line
/// of an array block.
pub(crate) fn check_no_blank_lines(
    start_line: usize,
    end_line: usize,
    blanks: &[BlankLine],
    context: &str,
    strict: bool,
) -> Result<()> {
    if !strict {
        return Ok(());
    }
    if let Some(blank) = blanks
        .iter()
        .find(|blank| blank.line_number > start_line && blank.line_number < end_line)
    {
        return Err(ToonError::blank_line_in_block(blank.line_number, context));
    }
    Ok(())
}

/// Data row vs key-value tie-break: a line with no unquoted colon, or with
/// an unquoted delimiter before its first unquoted colon, is a data row.
fn is_data_row(content: &str, delimiter: Delimiter) -> bool {
    let colon = find_unquoted_char(content, COLON, 0);
    let Some(colon) = colon else {
        return true;
    };
    find_unquoted_char(content, delimiter.as_char(), 0)
        .is_some_and(|delimiter_pos| delimiter_pos < colon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_row_tie_break() {
        assert!(is_data_row("1,Ann", Delimiter::Comma));
        assert!(is_data_row("42", Delimiter::Comma));
        assert!(!is_data_row("key: value", Delimiter::Comma));
        // Delimiter before the colon wins.
        assert!(is_data_row("a,b: c", Delimiter::Comma));
        // Quoted delimiters and colons do not count.
        assert!(!is_data_row("\"a,b\": c", Delimiter::Comma));
    }
}
