use crate::error::{Result, ToonError};
use crate::shared::constants::{SPACE, TAB};

/// A non-blank input line with its indentation resolved to a depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedLine {
    pub content: String,
    pub depth: usize,
    /// 1-based position in the original input.
    pub line_number: usize,
}

/// Position of a whitespace-only line, kept for strict-mode validation.
/// Blank lines never enter the parsed stream and their own indentation is
/// advisory, so strict indentation rules are not applied to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlankLine {
    pub line_number: usize,
}

/// Split the input into parsed lines, recording blank lines on the side.
///
/// Strict mode rejects tabs in leading whitespace and indents that are not
/// an exact multiple of `indent_size`.
pub(crate) fn scan(
    input: &str,
    indent_size: usize,
    strict: bool,
) -> Result<(Vec<ParsedLine>, Vec<BlankLine>)> {
    let mut lines = Vec::new();
    let mut blanks = Vec::new();

    for (idx, raw) in input.split('\n').enumerate() {
        let line_number = idx + 1;

        let indent = raw.len() - raw.trim_start_matches(SPACE).len();
        let content = &raw[indent..];

        if content.trim().is_empty() {
            blanks.push(BlankLine { line_number });
            continue;
        }

        if strict {
            if content.starts_with(TAB) {
                return Err(ToonError::tabs_in_indentation(line_number));
            }
            if indent_size == 0 {
                if indent > 0 {
                    return Err(ToonError::invalid_indentation(line_number, indent_size, indent));
                }
            } else if indent % indent_size != 0 {
                return Err(ToonError::invalid_indentation(line_number, indent_size, indent));
            }
        }

        lines.push(ParsedLine {
            content: content.to_string(),
            depth: depth_of(indent, indent_size),
            line_number,
        });
    }

    Ok((lines, blanks))
}

pub(crate) const fn depth_of(indent_spaces: usize, indent_size: usize) -> usize {
    if indent_size == 0 {
        return 0;
    }
    indent_spaces / indent_size
}

/// Forward-only view over the parsed lines.
#[derive(Debug)]
pub(crate) struct LineCursor {
    lines: Vec<ParsedLine>,
    blanks: Vec<BlankLine>,
    index: usize,
}

impl LineCursor {
    pub(crate) const fn new(lines: Vec<ParsedLine>, blanks: Vec<BlankLine>) -> Self {
        Self {
            lines,
            blanks,
            index: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<&ParsedLine> {
        self.lines.get(self.index)
    }

    pub(crate) fn advance(&mut self) {
        if self.index < self.lines.len() {
            self.index += 1;
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.index >= self.lines.len()
    }

    /// Line number of the most recently consumed line.
    pub(crate) fn last_line_number(&self) -> Option<usize> {
        self.index
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(|line| line.line_number)
    }

    pub(crate) fn blank_lines(&self) -> &[BlankLine] {
        &self.blanks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_depth_and_collects_blanks() {
        let (lines, blanks) = scan("a: 1\n\n  b: 2", 2, true).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].depth, 0);
        assert_eq!(lines[1].depth, 1);
        assert_eq!(lines[1].line_number, 3);
        assert_eq!(blanks, vec![BlankLine { line_number: 2 }]);
    }

    #[test]
    fn strict_rejects_tabs_and_ragged_indents() {
        assert!(matches!(
            scan("\ta: 1", 2, true),
            Err(ToonError::Layout { .. })
        ));
        assert!(matches!(
            scan("   a: 1", 2, true),
            Err(ToonError::Layout { .. })
        ));
        assert!(scan("   a: 1", 2, false).is_ok());
    }

    #[test]
    fn whitespace_only_input_has_no_lines() {
        let (lines, blanks) = scan("  \n\t\n", 2, true).unwrap();
        assert!(lines.is_empty());
        assert_eq!(blanks.len(), 3);
    }
}
