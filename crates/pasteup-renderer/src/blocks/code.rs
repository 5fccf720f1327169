use crate::classify::fence_language;
use crate::code_block::ProcessResult;
use crate::cursor::LineCursor;
use crate::state::RenderState;
use crate::style::{StyleKey, StyleTable};
use crate::util::escape_html;

/// Three window-control dots drawn above the code.
const WINDOW_DOTS: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="45px" height="13px" viewBox="0 0 450 130">"#,
    r#"<ellipse cx="50" cy="65" rx="50" ry="52" stroke="rgb(220,60,54)" stroke-width="2" fill="rgb(237,108,96)"></ellipse>"#,
    r#"<ellipse cx="225" cy="65" rx="50" ry="52" stroke="rgb(218,151,33)" stroke-width="2" fill="rgb(247,193,81)"></ellipse>"#,
    r#"<ellipse cx="400" cy="65" rx="50" ry="52" stroke="rgb(27,161,37)" stroke-width="2" fill="rgb(100,200,86)"></ellipse>"#,
    "</svg>",
);

/// Fenced code block. Runs to the closing fence or the end of input.
pub(super) fn parse(cursor: &mut LineCursor<'_>, state: &mut RenderState<'_>) -> String {
    let start = cursor.position();
    let language = fence_language(cursor.advance());

    let mut lines = Vec::new();
    let mut closed = false;
    while !cursor.is_at_end() {
        let line = cursor.advance();
        if line.trim() == "```" {
            closed = true;
            break;
        }
        lines.push(line);
    }

    if !closed {
        // The empty line after the document's final newline is not content.
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        state.warn(start, "unterminated code fence closed at end of input");
    }

    let source = lines.join("\n");
    for processor in &state.processors {
        if let ProcessResult::Inline(html) = processor.process(language, &source, state.styles) {
            return html;
        }
    }

    render_code(language, &source, state.styles)
}

/// Default rendering: escaped source in a decorated `<pre>`.
fn render_code(language: &str, source: &str, styles: &StyleTable) -> String {
    // Paste targets collapse runs of spaces.
    let code = escape_html(source).replace("  ", "&nbsp;&nbsp;");
    format!(
        r#"<pre style="{}"><span style="{}">{WINDOW_DOTS}</span><code class="language-{}" style="{}">{code}</code></pre>"#,
        &styles[StyleKey::CodeBlock],
        &styles[StyleKey::CodeDecoration],
        escape_html(language),
        &styles[StyleKey::CodeInner],
    )
}
