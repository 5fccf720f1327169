//! Block dispatcher and the per-kind block parsers.
//!
//! Every parser takes the shared cursor positioned on the line that
//! [`classify`] matched, consumes at least that line and returns zero or
//! one fragment.

mod code;
mod heading;
mod html;
mod list;
mod math;
mod paragraph;
mod quote;
mod table;

use crate::classify::{BlockKind, classify};
use crate::cursor::LineCursor;
use crate::state::RenderState;
use crate::style::StyleKey;

/// Parse blocks until the cursor is exhausted.
///
/// `depth` is the number of enclosing lists or quotes.
pub(crate) fn parse_blocks(
    cursor: &mut LineCursor<'_>,
    state: &mut RenderState<'_>,
    depth: usize,
) -> Vec<String> {
    let mut fragments = Vec::new();

    while let Some(line) = cursor.peek() {
        let Some(kind) = classify(line) else {
            cursor.advance();
            continue;
        };
        let start = cursor.position();

        let fragment = match kind {
            BlockKind::Heading => heading::parse(cursor, state),
            BlockKind::CodeFence => Some(code::parse(cursor, state)),
            BlockKind::MathBlock => math::parse(cursor, state),
            BlockKind::Table => table::parse(cursor, state),
            BlockKind::Blockquote => quote::parse(cursor, state, depth),
            BlockKind::UnorderedList | BlockKind::OrderedList => list::parse(cursor, state, depth),
            BlockKind::ThematicBreak => {
                cursor.advance();
                Some(format!(r#"<hr style="{}">"#, &state.styles[StyleKey::ThematicBreak]))
            }
            BlockKind::Html => Some(html::parse(cursor)),
            BlockKind::Paragraph => Some(paragraph::parse(cursor, state)),
        };

        debug_assert!(cursor.position() > start, "{kind:?} parser consumed nothing");
        fragments.extend(fragment);
    }

    fragments
}
