use crate::classify::ListMarker;
use crate::cursor::LineCursor;
use crate::state::RenderState;
use crate::style::StyleKey;
use crate::util::is_blank;

/// Transient list item awaiting rendering.
struct Item<'a> {
    text: &'a str,
    /// Rendered nested lists, in source order.
    children: Vec<String>,
}

/// List of either marker style, starting at the current line's indent.
pub(super) fn parse(
    cursor: &mut LineCursor<'_>,
    state: &mut RenderState<'_>,
    depth: usize,
) -> Option<String> {
    let first = ListMarker::parse(cursor.peek()?)?;
    Some(parse_list(cursor, state, first.indent, first.ordered, depth))
}

/// Parse items at `baseline` indentation.
///
/// Deeper items open a nested list inside the previous item, shallower
/// ones end the list without being consumed. A blank line is skipped only
/// when the next line is an item at or beyond the baseline.
fn parse_list(
    cursor: &mut LineCursor<'_>,
    state: &mut RenderState<'_>,
    baseline: usize,
    ordered: bool,
    depth: usize,
) -> String {
    let mut items: Vec<Item<'_>> = Vec::new();

    while let Some(line) = cursor.peek() {
        if is_blank(line) {
            let continues = cursor
                .peek_next()
                .and_then(ListMarker::parse)
                .is_some_and(|next| next.indent >= baseline);
            if !continues {
                break;
            }
            cursor.advance();
            continue;
        }

        let Some(marker) = ListMarker::parse(line) else {
            break;
        };
        if marker.indent < baseline {
            break;
        }

        if marker.indent > baseline && !items.is_empty() {
            if state.can_nest(depth) {
                let nested = parse_list(cursor, state, marker.indent, marker.ordered, depth + 1);
                if let Some(parent) = items.last_mut() {
                    parent.children.push(nested);
                }
                continue;
            }
            state.warn(cursor.position(), "nesting limit reached, list item flattened");
        } else if marker.ordered != ordered {
            break;
        }

        cursor.advance();
        items.push(Item {
            text: marker.content,
            children: Vec::new(),
        });
    }

    render_list(&items, ordered, state)
}

fn render_list(items: &[Item<'_>], ordered: bool, state: &RenderState<'_>) -> String {
    let styles = state.styles;
    let (tag, list_style) = if ordered {
        ("ol", &styles[StyleKey::OrderedList])
    } else {
        ("ul", &styles[StyleKey::UnorderedList])
    };

    let mut parts = vec![format!(r#"<{tag} style="{list_style}">"#)];
    for (index, item) in items.iter().enumerate() {
        let marker = if ordered {
            format!("{}. ", index + 1)
        } else {
            "• ".to_owned()
        };
        let mut html = format!(
            r#"<li style="{}">{marker}{}"#,
            &styles[StyleKey::ListItem],
            state.inline(item.text)
        );
        for child in &item.children {
            html.push('\n');
            html.push_str(child);
        }
        html.push_str("</li>");
        parts.push(html);
    }
    parts.push(format!("</{tag}>"));

    parts.join("\n")
}
