use std::fmt;

/// Delimiter separating inline array values, tabular row cells, and header
/// field lists. Comma is the default and is never written inside `[…]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Pipe,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Pipe => '|',
            Self::Tab => '\t',
        }
    }

    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Self::Comma),
            '|' => Some(Self::Pipe),
            '\t' => Some(Self::Tab),
            _ => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Key-folding policy for the encoder.
///
/// In `Safe` mode a chain of single-key objects whose keys are plain
/// identifier segments collapses into one dotted key (`a.b.c: …`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFolding {
    #[default]
    Off,
    Safe,
}

/// Path-expansion policy for the decoder, the inverse of [`KeyFolding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandPaths {
    #[default]
    Off,
    Safe,
}

/// Options accepted by [`encode`](crate::encode).
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Spaces per depth level.
    pub indent: usize,
    pub delimiter: Delimiter,
    /// Emit the `#` sigil before array lengths (`[#3]`).
    pub length_marker: bool,
    pub key_folding: KeyFolding,
    /// Maximum number of segments a folded key may span.
    pub flatten_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            delimiter: Delimiter::Comma,
            length_marker: false,
            key_folding: KeyFolding::Off,
            flatten_depth: usize::MAX,
        }
    }
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_length_marker(mut self, length_marker: bool) -> Self {
        self.length_marker = length_marker;
        self
    }

    #[must_use]
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }

    #[must_use]
    pub fn with_flatten_depth(mut self, flatten_depth: usize) -> Self {
        self.flatten_depth = flatten_depth;
        self
    }
}

/// Options accepted by [`decode`](crate::decode).
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Spaces per depth level.
    pub indent: usize,
    /// Enforce declared lengths, indentation rules, and blank-line policy.
    pub strict: bool,
    pub expand_paths: ExpandPaths,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            strict: true,
            expand_paths: ExpandPaths::Off,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_expand_paths(mut self, expand_paths: ExpandPaths) -> Self {
        self.expand_paths = expand_paths;
        self
    }
}
