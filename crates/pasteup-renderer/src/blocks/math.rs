use crate::cursor::LineCursor;
use crate::state::RenderState;
use crate::style::StyleKey;
use crate::util::{encode_formula, escape_html};

/// Display math between `$$` lines.
///
/// `$$x$$` on one line is a complete block. Text after an opening `$$` on a
/// longer block belongs to the formula.
pub(super) fn parse(cursor: &mut LineCursor<'_>, state: &mut RenderState<'_>) -> Option<String> {
    let start = cursor.position();
    let opening = cursor.advance().trim();
    let rest = opening.strip_prefix("$$").unwrap_or(opening);

    let formula = if let Some(inline) = rest.strip_suffix("$$") {
        inline.trim().to_owned()
    } else {
        let mut lines = vec![rest];
        let mut closed = false;
        while let Some(line) = cursor.peek() {
            cursor.advance();
            if line.trim() == "$$" {
                closed = true;
                break;
            }
            lines.push(line);
        }
        if !closed {
            state.warn(start, "unterminated math block closed at end of input");
        }
        lines.join("\n").trim().to_owned()
    };

    if formula.is_empty() {
        tracing::debug!(line = start + 1, "Skipped empty math block");
        return None;
    }

    Some(format!(
        r#"<section class="math-block" data-formula-b64="{}" style="{}"><code style="{}">{}</code></section>"#,
        encode_formula(&formula),
        &state.styles[StyleKey::MathBlock],
        &state.styles[StyleKey::MathBlockFallback],
        escape_html(&formula),
    ))
}
