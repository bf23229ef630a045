use thiserror::Error;

/// Errors surfaced by [`decode`](crate::decode) and the JSON interop
/// helpers. Every error is fatal for the call; the codec never returns
/// partial results.
#[derive(Debug, Error)]
pub enum ToonError {
    /// Decode was called on empty or whitespace-only input.
    #[error("Input error: {message}")]
    Input { message: String },

    /// The text does not conform to the TOON grammar.
    #[error("{}{message}", line_prefix(*line))]
    Grammar {
        line: Option<usize>,
        message: String,
    },

    /// Strict mode: an element count differs from its declared length.
    #[error("{}expected {expected} {what}, found {found}", line_prefix(*line))]
    CountMismatch {
        line: Option<usize>,
        what: String,
        expected: usize,
        found: usize,
    },

    /// Strict mode: indentation, blank-line, or surplus-item rules violated.
    #[error("{}{message}", line_prefix(*line))]
    Layout {
        line: Option<usize>,
        message: String,
    },

    /// Path expansion hit a conflicting key.
    #[error("Path expansion error for '{path}': {message}")]
    Expand { path: String, message: String },

    /// JSON (de)serialization failed in a convenience wrapper.
    #[error("JSON error: {message}")]
    Json { message: String },
}

pub type Result<T> = std::result::Result<T, ToonError>;

fn line_prefix(line: Option<usize>) -> String {
    line.map_or_else(String::new, |line| format!("Line {line}: "))
}

impl ToonError {
    #[must_use]
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn grammar(line: impl Into<Option<usize>>, message: impl Into<String>) -> Self {
        Self::Grammar {
            line: line.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unterminated_string(line: impl Into<Option<usize>>) -> Self {
        Self::grammar(line, "Unterminated string: missing closing quote")
    }

    #[must_use]
    pub fn missing_colon(line: impl Into<Option<usize>>) -> Self {
        Self::grammar(line, "Missing colon after key")
    }

    #[must_use]
    pub fn invalid_array_length(line: impl Into<Option<usize>>, body: &str) -> Self {
        Self::grammar(line, format!("Invalid array length: {body}"))
    }

    #[must_use]
    pub fn count_mismatch(
        line: impl Into<Option<usize>>,
        what: impl Into<String>,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::CountMismatch {
            line: line.into(),
            what: what.into(),
            expected,
            found,
        }
    }

    #[must_use]
    pub fn layout(line: impl Into<Option<usize>>, message: impl Into<String>) -> Self {
        Self::Layout {
            line: line.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn tabs_in_indentation(line: usize) -> Self {
        Self::layout(line, "Tabs are not allowed in indentation in strict mode")
    }

    #[must_use]
    pub fn invalid_indentation(line: usize, indent_size: usize, found: usize) -> Self {
        Self::layout(
            line,
            format!(
                "Indentation must be an exact multiple of {indent_size}, but found {found} spaces"
            ),
        )
    }

    #[must_use]
    pub fn blank_line_in_block(line: usize, context: &str) -> Self {
        Self::layout(
            line,
            format!("Blank lines inside {context} are not allowed in strict mode"),
        )
    }

    #[must_use]
    pub fn surplus_items(line: impl Into<Option<usize>>, what: &str, expected: usize) -> Self {
        Self::layout(line, format!("expected {expected} {what}, found more"))
    }

    #[must_use]
    pub fn expand_conflict(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Expand {
            path: path.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ToonError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}
