//! Line storage and the forward-only read position shared by block parsers.

/// Input text split into lines with `\r\n` and `\r` normalized to `\n`.
#[derive(Clone, Debug, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split markdown text into lines.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        Self {
            lines: normalized.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Build a document from already-split lines.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cursor positioned at the first line.
    #[must_use]
    pub fn cursor(&self) -> LineCursor<'_> {
        LineCursor {
            lines: &self.lines,
            pos: 0,
        }
    }
}

/// Read position over a [`Document`].
///
/// The position only moves forward. Nested parses take the same cursor by
/// `&mut` so they continue exactly where the parent stopped.
#[derive(Debug)]
pub struct LineCursor<'d> {
    lines: &'d [String],
    pos: usize,
}

impl<'d> LineCursor<'d> {
    /// Current line without consuming it, or `None` past the end.
    #[must_use]
    pub fn peek(&self) -> Option<&'d str> {
        self.lines.get(self.pos).map(String::as_str)
    }

    /// The line after the current one, without consuming anything.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'d str> {
        self.lines.get(self.pos + 1).map(String::as_str)
    }

    /// Consume and return the current line.
    ///
    /// # Panics
    ///
    /// Panics when called past the end. Callers check [`peek`](Self::peek) first.
    pub fn advance(&mut self) -> &'d str {
        assert!(
            self.pos < self.lines.len(),
            "advance past end of input (line {} of {})",
            self.pos,
            self.lines.len()
        );
        let line = self.lines[self.pos].as_str();
        self.pos += 1;
        line
    }

    /// Whether every line has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Zero-based index of the current line.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_line_endings() {
        let doc = Document::parse("a\r\nb\rc\nd");
        let mut cursor = doc.cursor();
        assert_eq!(cursor.advance(), "a");
        assert_eq!(cursor.advance(), "b");
        assert_eq!(cursor.advance(), "c");
        assert_eq!(cursor.advance(), "d");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let doc = Document::parse("first\nsecond");
        let cursor = doc.cursor();
        assert_eq!(cursor.peek(), Some("first"));
        assert_eq!(cursor.peek(), Some("first"));
        assert_eq!(cursor.peek_next(), Some("second"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_peek_past_end() {
        let doc = Document::parse("only");
        let mut cursor = doc.cursor();
        assert_eq!(cursor.peek_next(), None);
        cursor.advance();
        assert_eq!(cursor.peek(), None);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_trailing_newline_yields_empty_line() {
        let doc = Document::parse("a\n");
        assert_eq!(doc.len(), 2);
    }

    #[test]
    #[should_panic(expected = "advance past end of input")]
    fn test_advance_past_end_panics() {
        let doc = Document::from_lines(vec!["x".to_owned()]);
        let mut cursor = doc.cursor();
        cursor.advance();
        cursor.advance();
    }
}
