//! Per-render state shared by the block parsers.

use crate::code_block::CodeBlockProcessor;
use crate::inline::render_inline;
use crate::style::StyleTable;

/// State for one call to [`Renderer::render`](crate::Renderer::render).
///
/// Created fresh per document, so a renderer can be reused and shared.
pub(crate) struct RenderState<'r> {
    pub styles: &'r StyleTable,
    /// Custom processors first, then the diagram placeholder if enabled.
    pub processors: Vec<&'r dyn CodeBlockProcessor>,
    max_nesting: usize,
    /// Line number of the first line of the document being parsed, relative
    /// to the outermost document. Non-zero inside nested quotes.
    line_offset: usize,
    /// Text of the first level-1 heading, once seen.
    pub title: Option<String>,
    pub warnings: Vec<String>,
}

impl<'r> RenderState<'r> {
    pub fn new(
        styles: &'r StyleTable,
        processors: Vec<&'r dyn CodeBlockProcessor>,
        max_nesting: usize,
    ) -> Self {
        Self {
            styles,
            processors,
            max_nesting,
            line_offset: 0,
            title: None,
            warnings: Vec::new(),
        }
    }

    /// Run the inline pipeline with this render's styles.
    pub fn inline(&self, text: &str) -> String {
        render_inline(text, self.styles)
    }

    /// Whether a construct at `depth` may open a nested one.
    pub fn can_nest(&self, depth: usize) -> bool {
        depth + 1 < self.max_nesting
    }

    /// Record a degradation at a zero-based line of the current document.
    pub fn warn(&mut self, line: usize, message: &str) {
        let line = self.line_offset + line + 1;
        tracing::warn!(line, "{message}");
        self.warnings.push(format!("line {line}: {message}"));
    }

    /// Run `f` with line numbers shifted by `offset`, for a nested document
    /// whose first line is `offset` lines into the current one.
    pub fn with_line_offset<T>(&mut self, offset: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.line_offset;
        self.line_offset += offset;
        let result = f(self);
        self.line_offset = saved;
        result
    }
}
