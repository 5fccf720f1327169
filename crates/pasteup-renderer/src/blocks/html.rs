use crate::cursor::LineCursor;
use crate::util::is_blank;

fn starts_tag(line: &str) -> bool {
    line.trim_start().starts_with('<')
}

/// Raw HTML, copied through unescaped.
///
/// Lines are taken while they start with `<`, or once one has been taken,
/// while they are non-blank. A blank line ends the block unless the next
/// line starts another tag.
pub(super) fn parse(cursor: &mut LineCursor<'_>) -> String {
    let mut lines = Vec::new();

    while let Some(line) = cursor.peek() {
        if is_blank(line) {
            if !lines.is_empty() && cursor.peek_next().is_some_and(starts_tag) {
                lines.push(cursor.advance());
                continue;
            }
            break;
        }
        if !starts_tag(line) && lines.is_empty() {
            break;
        }
        lines.push(cursor.advance());
    }

    lines.join("\n")
}
