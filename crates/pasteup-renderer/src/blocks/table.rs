use crate::classify::is_table_separator;
use crate::cursor::LineCursor;
use crate::state::RenderState;
use crate::style::StyleKey;

/// Pipe table. The first row is the header; a divider on the second line
/// is dropped.
pub(super) fn parse(cursor: &mut LineCursor<'_>, state: &RenderState<'_>) -> Option<String> {
    let start = cursor.position();
    let mut rows: Vec<Vec<&str>> = Vec::new();

    while let Some(line) = cursor.peek() {
        if !line.trim().starts_with('|') {
            break;
        }
        cursor.advance();
        if cursor.position() == start + 2 && is_table_separator(line) {
            continue;
        }
        rows.push(split_row(line));
    }

    let (header, body) = rows.split_first()?;
    let styles = state.styles;

    let mut parts = vec![
        format!(r#"<section style="{}">"#, &styles[StyleKey::TableWrapper]),
        format!(r#"<table style="{}">"#, &styles[StyleKey::Table]),
        format!(r#"<thead style="{}">"#, &styles[StyleKey::TableHead]),
        "<tr>".to_owned(),
    ];
    for cell in header {
        parts.push(format!(
            r#"<th style="{}">{}</th>"#,
            &styles[StyleKey::TableHeaderCell],
            state.inline(cell)
        ));
    }
    parts.push("</tr></thead>".to_owned());

    parts.push("<tbody>".to_owned());
    for row in body {
        parts.push("<tr>".to_owned());
        for cell in row {
            parts.push(format!(
                r#"<td style="{}">{}</td>"#,
                &styles[StyleKey::TableCell],
                state.inline(cell)
            ));
        }
        parts.push("</tr>".to_owned());
    }
    parts.push("</tbody></table></section>".to_owned());

    Some(parts.join("\n"))
}

/// Cells of a row, with one outer pipe removed from each end.
fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(str::trim).collect()
}
