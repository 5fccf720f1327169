use crate::cursor::{Document, LineCursor};
use crate::state::RenderState;
use crate::style::StyleKey;
use crate::util::is_blank;

use super::parse_blocks;

fn is_quote_line(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

/// Drop one `>` and at most one following space or tab.
fn strip_marker(line: &str) -> &str {
    let rest = line.trim_start();
    let rest = rest.strip_prefix('>').unwrap_or(rest);
    rest.strip_prefix([' ', '\t']).unwrap_or(rest)
}

/// Blockquote.
///
/// A blank line stays inside the quote when the next line continues it.
/// Content that still holds `>` lines is parsed as blocks; anything else is
/// a single paragraph.
pub(super) fn parse(
    cursor: &mut LineCursor<'_>,
    state: &mut RenderState<'_>,
    depth: usize,
) -> Option<String> {
    let start = cursor.position();
    let mut lines: Vec<String> = Vec::new();

    while let Some(line) = cursor.peek() {
        if is_quote_line(line) {
            lines.push(strip_marker(cursor.advance()).to_owned());
        } else if is_blank(line) && cursor.peek_next().is_some_and(is_quote_line) {
            cursor.advance();
            lines.push(String::new());
        } else {
            break;
        }
    }

    let nested = lines.iter().any(|line| line.starts_with('>'));
    let inner = if nested && state.can_nest(depth) {
        let document = Document::from_lines(lines);
        let mut inner_cursor = document.cursor();
        let fragments = state.with_line_offset(start, |state| {
            parse_blocks(&mut inner_cursor, state, depth + 1)
        });
        fragments.join("\n")
    } else {
        if nested {
            state.warn(start, "nesting limit reached, quote content flattened");
        }
        let text = lines.join("\n");
        let text = text.trim();
        if text.is_empty() {
            String::new()
        } else {
            format!(
                r#"<p style="{}">{}</p>"#,
                &state.styles[StyleKey::BlockquoteParagraph],
                state.inline(text)
            )
        }
    };

    if inner.is_empty() {
        tracing::debug!(line = start + 1, "Skipped empty blockquote");
        return None;
    }

    Some(format!(
        r#"<blockquote style="{}">{inner}</blockquote>"#,
        &state.styles[StyleKey::Blockquote]
    ))
}
