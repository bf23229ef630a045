use crate::shared::constants::LIST_ITEM_PREFIX;

/// Accumulates output lines at explicit depths. The final document is the
/// lines joined by `\n` with no trailing newline.
pub(crate) struct LineWriter {
    lines: Vec<String>,
    indent_size: usize,
}

impl LineWriter {
    pub(crate) const fn new(indent_size: usize) -> Self {
        Self {
            lines: Vec::new(),
            indent_size,
        }
    }

    pub(crate) fn push(&mut self, depth: usize, content: &str) {
        let mut line = String::with_capacity(self.indent_size * depth + content.len());
        for _ in 0..self.indent_size * depth {
            line.push(' ');
        }
        line.push_str(content);
        self.lines.push(line);
    }

    pub(crate) fn push_list_item(&mut self, depth: usize, content: &str) {
        let mut line = String::with_capacity(LIST_ITEM_PREFIX.len() + content.len());
        line.push_str(LIST_ITEM_PREFIX);
        line.push_str(content);
        self.push(depth, &line);
    }

    pub(crate) fn finish(self) -> String {
        self.lines.join("\n")
    }
}
