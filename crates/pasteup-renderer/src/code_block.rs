//! Hook for custom handling of fenced code blocks.

use crate::style::StyleTable;

/// Result of offering a fenced code block to a processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// Use this markup as the block's fragment.
    Inline(String),
    /// Not handled; fall through to the next processor or normal rendering.
    PassThrough,
}

/// Processes fenced code blocks before the default `<pre>` rendering.
///
/// Processors registered with [`Renderer::with_processor`](crate::Renderer::with_processor)
/// are tried in registration order, then the built-in diagram placeholder.
/// The first result other than [`ProcessResult::PassThrough`] wins.
///
/// # Example
///
/// ```
/// use pasteup_renderer::{CodeBlockProcessor, ProcessResult, Renderer, StyleTable, escape_html};
///
/// struct Shout;
///
/// impl CodeBlockProcessor for Shout {
///     fn process(&self, language: &str, source: &str, _styles: &StyleTable) -> ProcessResult {
///         if language == "shout" {
///             ProcessResult::Inline(format!("<p>{}</p>", escape_html(&source.to_uppercase())))
///         } else {
///             ProcessResult::PassThrough
///         }
///     }
/// }
///
/// let renderer = Renderer::default().with_processor(Shout);
/// let result = renderer.render("```shout\nhi\n```");
/// assert_eq!(result.fragments, vec!["<p>HI</p>".to_owned()]);
/// ```
pub trait CodeBlockProcessor {
    /// Offer a code block.
    ///
    /// `language` is the fence tag (possibly empty) and `source` the raw,
    /// unescaped block content joined with `\n`.
    fn process(&self, language: &str, source: &str, styles: &StyleTable) -> ProcessResult;
}
