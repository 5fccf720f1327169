use crate::classify::{BlockKind, classify};
use crate::cursor::LineCursor;
use crate::state::RenderState;
use crate::style::StyleKey;

/// Fallback paragraph. Runs until a blank line or any other block start.
pub(super) fn parse(cursor: &mut LineCursor<'_>, state: &RenderState<'_>) -> String {
    let mut lines = Vec::new();
    while let Some(line) = cursor.peek() {
        if classify(line) != Some(BlockKind::Paragraph) {
            break;
        }
        lines.push(cursor.advance().trim());
    }

    format!(
        r#"<p style="{}">{}</p>"#,
        &state.styles[StyleKey::Paragraph],
        state.inline(&lines.join(" "))
    )
}
