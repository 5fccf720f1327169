use crate::classify;
use crate::cursor::LineCursor;
use crate::inline::inline_plain_text;
use crate::state::RenderState;
use crate::style::StyleKey;

/// ATX heading. The first level-1 heading of the document also drops its
/// top margin and becomes the title.
pub(super) fn parse(cursor: &mut LineCursor<'_>, state: &mut RenderState<'_>) -> Option<String> {
    let (level, text) = classify::heading(cursor.advance())?;
    let text = text.trim_end();

    let mut style = state.styles[StyleKey::heading(level)].to_owned();
    if level == 1 && state.title.is_none() {
        style.push(' ');
        style.push_str(&state.styles[StyleKey::LeadingHeading]);
        state.title = Some(inline_plain_text(text).trim().to_owned());
    }

    Some(format!(
        r#"<h{level} style="{style}">{}</h{level}>"#,
        state.inline(text)
    ))
}

#[cfg(test)]
mod tests {
    use crate::Renderer;
    use crate::style::{StyleKey, StyleTable};

    #[test]
    fn test_heading_level_and_inline() {
        let result = Renderer::default().render("### Some *words*");
        let styles = StyleTable::default();
        assert_eq!(result.fragments.len(), 1);
        assert!(result.fragments[0].starts_with(&format!(r#"<h3 style="{}">"#, &styles[StyleKey::H3])));
        assert!(result.fragments[0].contains(">words</em></h3>"));
    }

    #[test]
    fn test_only_first_h1_is_leading() {
        let result = Renderer::default().render("# One\n\n# Two");
        let leading = &StyleTable::default()[StyleKey::LeadingHeading];
        assert!(result.fragments[0].contains(leading));
        assert!(!result.fragments[1].contains(leading));
        assert_eq!(result.title.as_deref(), Some("One"));
    }

    #[test]
    fn test_h2_before_h1_does_not_claim_title() {
        let result = Renderer::default().render("## Intro\n# Main  ");
        assert_eq!(result.title.as_deref(), Some("Main"));
    }

    #[test]
    fn test_title_is_plain_text() {
        let result = Renderer::default().render("# **Release** `v2` notes");
        assert_eq!(result.title.as_deref(), Some("Release v2 notes"));
        assert!(result.fragments[0].contains("<strong"));
    }

    #[test]
    fn test_empty_heading() {
        let result = Renderer::default().render("## ");
        assert_eq!(result.fragments.len(), 1);
        assert!(result.fragments[0].ends_with("></h2>"));
    }
}
