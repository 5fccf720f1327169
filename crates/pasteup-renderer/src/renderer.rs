//! Top-level renderer: builder configuration and the render entry point.

use crate::blocks::parse_blocks;
use crate::code_block::CodeBlockProcessor;
use crate::cursor::Document;
use crate::diagram::DiagramPlaceholder;
use crate::state::RenderState;
use crate::style::{StyleKey, StyleTable};

/// Default bound on nested lists and blockquotes.
pub const DEFAULT_MAX_NESTING: usize = 32;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Root container wrapping every fragment.
    pub html: String,
    /// One rendered fragment per block, in source order.
    pub fragments: Vec<String>,
    /// Plain text of the first level-1 heading.
    pub title: Option<String>,
    /// Degradations noticed while rendering (e.g. an unterminated fence).
    pub warnings: Vec<String>,
}

/// Markdown to inline-styled HTML renderer.
///
/// The renderer holds configuration only. Every [`render`](Self::render)
/// call gets its own cursor and state, so one renderer can serve any number
/// of documents.
///
/// # Example
///
/// ```
/// use pasteup_renderer::Renderer;
///
/// let result = Renderer::default().render("# Title\n\nHello *world*");
/// assert_eq!(result.fragments.len(), 2);
/// assert_eq!(result.title.as_deref(), Some("Title"));
/// assert!(result.html.starts_with(r#"<section class="container""#));
/// ```
pub struct Renderer {
    styles: StyleTable,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    max_nesting: usize,
    diagrams: bool,
}

impl Renderer {
    /// Create a renderer with diagram placeholders enabled.
    #[must_use]
    pub fn new(styles: StyleTable) -> Self {
        Self {
            styles,
            processors: Vec::new(),
            max_nesting: DEFAULT_MAX_NESTING,
            diagrams: true,
        }
    }

    /// Bound nesting of lists and blockquotes. Deeper content is flattened
    /// into the innermost allowed level. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting.max(1);
        self
    }

    /// Enable or disable diagram placeholders.
    ///
    /// When disabled, diagram fences render as ordinary code blocks.
    #[must_use]
    pub fn with_diagrams(mut self, enabled: bool) -> Self {
        self.diagrams = enabled;
        self
    }

    /// Add a code block processor.
    ///
    /// Processors run in registration order, before the diagram
    /// placeholder. The first one returning
    /// [`ProcessResult::Inline`](crate::ProcessResult::Inline) wins.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Style table used for every element.
    #[must_use]
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Render a markdown document.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let document = Document::parse(markdown);

        let mut processors: Vec<&dyn CodeBlockProcessor> =
            self.processors.iter().map(|processor| processor.as_ref()).collect();
        if self.diagrams {
            processors.push(&DiagramPlaceholder);
        }

        let mut state = RenderState::new(&self.styles, processors, self.max_nesting);
        let mut cursor = document.cursor();
        let fragments = parse_blocks(&mut cursor, &mut state, 0);

        tracing::debug!(
            lines = document.len(),
            blocks = fragments.len(),
            warnings = state.warnings.len(),
            "Rendered markdown"
        );

        let html = format!(
            "<section class=\"container\" style=\"{}\">\n{}\n</section>",
            &self.styles[StyleKey::Container],
            fragments.join("\n")
        );

        RenderResult {
            html,
            fragments,
            title: state.title,
            warnings: state.warnings,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(StyleTable::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::classify::{BlockKind, classify};
    use crate::code_block::ProcessResult;
    use crate::inline::render_inline;
    use crate::style::Theme;

    struct Upper;

    impl CodeBlockProcessor for Upper {
        fn process(&self, language: &str, source: &str, _styles: &StyleTable) -> ProcessResult {
            if language == "upper" || language == "mermaid" {
                ProcessResult::Inline(source.to_uppercase())
            } else {
                ProcessResult::PassThrough
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let result = Renderer::default().render("");
        assert!(result.fragments.is_empty());
        assert_eq!(
            result.html,
            format!(
                "<section class=\"container\" style=\"{}\">\n\n</section>",
                &StyleTable::default()[StyleKey::Container]
            )
        );
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_blank_lines_only() {
        assert!(Renderer::default().render("\n \n\t\n").fragments.is_empty());
    }

    #[test]
    fn test_html_joins_fragments() {
        let result = Renderer::default().render("a\n\nb");
        assert_eq!(result.fragments.len(), 2);
        assert!(result.html.contains(&result.fragments.join("\n")));
    }

    #[test]
    fn test_custom_processor_runs_before_diagrams() {
        let renderer = Renderer::default().with_processor(Upper);
        assert_eq!(renderer.render("```upper\nabc\n```").fragments, vec!["ABC".to_owned()]);
        assert_eq!(renderer.render("```mermaid\nabc\n```").fragments, vec!["ABC".to_owned()]);
        assert!(renderer.render("```rust\nabc\n```").fragments[0].starts_with("<pre "));
    }

    #[test]
    fn test_renderer_is_reusable() {
        let renderer = Renderer::default();
        let first = renderer.render("# A\n```\nx");
        let second = renderer.render("# B");
        assert_eq!(first.title.as_deref(), Some("A"));
        assert_eq!(second.title.as_deref(), Some("B"));
        assert_eq!(first.warnings.len(), 1);
        assert!(second.warnings.is_empty());
    }

    #[test]
    fn test_theme_reaches_output() {
        let theme = Theme {
            primary: "#00ff00".to_owned(),
            ..Theme::default()
        };
        let result = Renderer::new(StyleTable::new(&theme)).render("**x**");
        assert!(result.html.contains("#00ff00"));
    }

    #[test]
    fn test_max_nesting_floor() {
        let result = Renderer::default().with_max_nesting(0).render("- a\n  - b");
        assert_eq!(result.fragments[0].matches("<li ").count(), 2);
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let markdown: String = (0..500).map(|level| format!("{}- item\n", "  ".repeat(level))).collect();
        let result = Renderer::default().render(&markdown);
        assert_eq!(result.fragments.len(), 1);
        assert_eq!(result.fragments[0].matches("<ul ").count(), DEFAULT_MAX_NESTING);
        assert!(!result.warnings.is_empty());

        let quotes = format!("{} deep", ">".repeat(500));
        let result = Renderer::default().render(&quotes);
        assert_eq!(result.fragments[0].matches("<blockquote").count(), DEFAULT_MAX_NESTING);
    }

    fn render(markdown: &str) -> RenderResult {
        Renderer::default().render(markdown)
    }

    #[test]
    fn test_plain_text_is_one_paragraph() {
        let result = render("just some words\nacross two lines, with *emphasis*");
        assert_eq!(result.fragments.len(), 1);
        let html = &result.fragments[0];
        assert!(html.starts_with(&format!(
            r#"<p style="{}">just some words across two lines"#,
            &StyleTable::default()[StyleKey::Paragraph]
        )));
        assert!(html.ends_with("emphasis</em></p>"));
    }

    #[test]
    fn test_code_span_content_is_escaped_and_inert() {
        let result = render("Try `<script>a && b</script> *not em* $x$` now");
        assert_eq!(result.fragments.len(), 1);
        let html = &result.fragments[0];
        assert!(html.contains("&lt;script&gt;a &amp;&amp; b&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<em"));
        assert!(!html.contains("math-inline"));
    }

    #[test]
    fn test_fragment_order_matches_block_scan() {
        let markdown = "# Title\n\nIntro text\n\n- a\n- b\n\n| x | y |\n|---|---|\n| 1 | 2 |\n\n\
                        > quoted\n\n```rust\nfn f() {}\n```\n\n---\n\n$$\nx^2\n$$\n\n<div>raw</div>\n\n1. one";
        let result = render(markdown);

        let expected = [
            "<h1 ",
            "<p ",
            "<ul ",
            "<section style=",
            "<blockquote ",
            "<pre ",
            "<hr ",
            "<section class=\"math-block\"",
            "<div>raw</div>",
            "<ol ",
        ];
        assert_eq!(result.fragments.len(), expected.len());
        for (fragment, prefix) in result.fragments.iter().zip(expected) {
            assert!(fragment.starts_with(prefix), "expected {prefix}, got {fragment}");
        }
    }

    #[test]
    fn test_block_starts_classified_in_priority_order() {
        let lines = [
            ("# h", BlockKind::Heading),
            ("```", BlockKind::CodeFence),
            ("$$", BlockKind::MathBlock),
            ("|a|", BlockKind::Table),
            ("> q", BlockKind::Blockquote),
            ("- ---", BlockKind::UnorderedList),
            ("1. a", BlockKind::OrderedList),
            ("***", BlockKind::ThematicBreak),
            ("<p>", BlockKind::Html),
            ("words", BlockKind::Paragraph),
        ];
        for (line, kind) in lines {
            assert_eq!(classify(line), Some(kind), "{line}");
        }
    }

    #[test]
    fn test_nested_list_fidelity() {
        let result = render("- first\n  - nested\n- second");
        assert_eq!(result.fragments.len(), 1);
        let html = &result.fragments[0];

        assert_eq!(html.matches("<ul ").count(), 2);
        let outer_items: Vec<&str> = html
            .lines()
            .filter(|line| line.starts_with("<li ") && !line.contains("nested"))
            .collect();
        assert_eq!(outer_items.len(), 2);
        assert!(outer_items[0].ends_with("• first"));
        assert!(outer_items[1].ends_with("• second</li>"));
        assert!(html.contains("• nested</li>\n</ul></li>"));
    }

    #[test]
    fn test_table_separator_is_discarded() {
        let result = render("| h1 | h2 |\n|---|---|\n| a | b |\n| c | d |");
        assert_eq!(result.fragments.len(), 1);
        let html = &result.fragments[0];

        let (head, body) = html.split_once("<tbody>").unwrap();
        assert_eq!(head.matches("<tr>").count(), 1);
        assert_eq!(body.matches("<tr>").count(), 2);
        assert!(!html.contains("---"));
    }

    #[test]
    fn test_heading_then_paragraph() {
        let result = render("# Title\n\nHello *world*");
        let styles = StyleTable::default();
        assert_eq!(
            result.fragments,
            vec![
                format!(
                    r#"<h1 style="{} {}">Title</h1>"#,
                    &styles[StyleKey::H1],
                    &styles[StyleKey::LeadingHeading]
                ),
                format!(
                    r#"<p style="{}">Hello <em style="{}">world</em></p>"#,
                    &styles[StyleKey::Paragraph],
                    &styles[StyleKey::Emphasis]
                ),
            ]
        );
    }

    #[test]
    fn test_ordered_list_renumbers() {
        let result = render("1. a\n5. b\n2. c");
        let html = &result.fragments[0];
        let ordinals: Vec<&str> = html
            .lines()
            .filter_map(|line| line.split_once("\">").map(|(_, rest)| rest))
            .filter_map(|rest| rest.split_once(". ").map(|(n, _)| n))
            .collect();
        assert_eq!(ordinals, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unterminated_fence_keeps_lines() {
        let result = render("```\nlet a = 1 < 2;\nlet b = 3;");
        assert_eq!(result.fragments.len(), 1);
        assert!(result.fragments[0].contains("let a = 1 &lt; 2;\nlet b = 3;</code></pre>"));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_blockquote_blank_line_stays_one_quote() {
        let result = render("> line1\n\n> line2");
        assert_eq!(result.fragments.len(), 1);
        let html = &result.fragments[0];
        assert_eq!(html.matches("<blockquote").count(), 1);
        assert_eq!(html.matches("<p ").count(), 1);
        assert!(html.contains("line1"));
        assert!(html.contains("line2"));
    }

    #[test]
    fn test_rerendering_inline_output_is_stable() {
        let result = render("A [link](http://x.org/a_b) with `co*de*` and $a_1$ and ~~old~~ **new**");
        let once = &result.fragments[0];
        let inner = once
            .split_once("\">")
            .and_then(|(_, rest)| rest.strip_suffix("</p>"))
            .unwrap();
        let twice = render_inline(inner, &StyleTable::default());
        assert_eq!(twice, inner);
    }

    #[test]
    fn test_windows_line_endings() {
        let unix = render("# T\n\n- a\n- b\n");
        let windows = render("# T\r\n\r\n- a\r\n- b\r\n");
        assert_eq!(unix.fragments, windows.fragments);
    }
}
