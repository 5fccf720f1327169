//! Inline transform pipeline.
//!
//! Leaf text goes through a fixed sequence of global substitutions:
//! code spans, images, links, inline math, bold-italic, bold, italic and
//! strikethrough. Markup produced by a step is parked in a [`Stash`] and
//! replaced by an opaque token, so later steps never see attributes or the
//! inside of rendered spans. Raw inline HTML tags are parked the same way
//! right after code spans are resolved.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::style::{StyleKey, StyleTable};
use crate::util::{encode_formula, escape_html, escape_literal};

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap());
static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static RAW_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][^<>]*>").unwrap());
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*|___(.+?)___").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").unwrap());
static STRIKETHROUGH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());

/// Rendered fragments waiting to be spliced back into the text.
#[derive(Debug, Default)]
struct Stash {
    entries: Vec<Held>,
}

#[derive(Debug)]
struct Held {
    html: String,
    /// Visible text, used for titles, alt text and formulas.
    plain: String,
    /// Markdown the entry was made from.
    source: String,
}

impl Stash {
    /// Park `html` and return the token standing in for it.
    fn hold(&mut self, html: String, plain: impl Into<String>) -> String {
        let plain = plain.into();
        let source = plain.clone();
        self.hold_with_source(html, plain, source)
    }

    fn hold_with_source(&mut self, html: String, plain: String, source: String) -> String {
        let index = self.entries.len();
        self.entries.push(Held { html, plain, source });
        format!("{TOKEN_OPEN}{index}{TOKEN_CLOSE}")
    }

    /// Replace tokens with the plain text they stand for.
    fn plain_text(&self, text: &str) -> String {
        self.splice(text, |held| held.plain.as_str())
    }

    /// Replace tokens with the markdown they were made from.
    fn source_text(&self, text: &str) -> String {
        self.splice(text, |held| held.source.as_str())
    }

    /// Replace tokens with their markup.
    fn restore(&self, text: &str) -> String {
        self.splice(text, |held| held.html.as_str())
    }

    fn splice<'s>(&'s self, text: &str, pick: impl Fn(&'s Held) -> &'s str) -> String {
        TOKEN
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.entries.get(index))
                    .map_or("", &pick)
                    .to_owned()
            })
            .into_owned()
    }
}

/// Apply the inline pipeline to a piece of leaf text.
///
/// Plain text outside recognized syntax is copied through unescaped, so
/// inline HTML written by the author survives.
///
/// # Examples
///
/// ```
/// use pasteup_renderer::{StyleTable, render_inline};
///
/// let styles = StyleTable::default();
/// let html = render_inline("Hello *world*", &styles);
/// assert!(html.starts_with("Hello <em style="));
/// assert!(html.ends_with(">world</em>"));
/// ```
pub fn render_inline(text: &str, styles: &StyleTable) -> String {
    let (text, stash) = transform(text, styles);
    stash.restore(&text)
}

/// Visible text of a piece of leaf text: markup dropped, code and math
/// reduced to their content.
pub(crate) fn inline_plain_text(text: &str) -> String {
    let (text, stash) = transform(text, &StyleTable::default());
    stash.plain_text(&text)
}

/// Run every step, leaving generated markup as tokens in the returned text.
fn transform(text: &str, styles: &StyleTable) -> (String, Stash) {
    let mut stash = Stash::default();
    let text: String = text
        .chars()
        .filter(|&c| c != TOKEN_OPEN && c != TOKEN_CLOSE)
        .collect();

    let text = CODE_SPAN.replace_all(&text, |caps: &Captures<'_>| {
        let code = &caps[1];
        let html = format!(
            r#"<code style="{}">{}</code>"#,
            &styles[StyleKey::CodeSpan],
            escape_literal(code)
        );
        stash.hold_with_source(html, code.to_owned(), caps[0].to_owned())
    });

    // A tag may enclose code span tokens, which are put back as written.
    let text = RAW_TAG.replace_all(&text, |caps: &Captures<'_>| {
        let tag = stash.source_text(&caps[0]);
        stash.hold(tag, "")
    });

    let text = IMAGE.replace_all(&text, |caps: &Captures<'_>| {
        let alt = stash.plain_text(&caps[1]);
        let src = stash.plain_text(&caps[2]);
        let caption = escape_literal(&alt);
        let html = format!(
            r#"<figure style="{}"><img src="{}" alt="{caption}" style="{}"><figcaption style="{}">{caption}</figcaption></figure>"#,
            &styles[StyleKey::Figure],
            escape_html(&src),
            &styles[StyleKey::Image],
            &styles[StyleKey::FigureCaption],
        );
        stash.hold(html, alt)
    });

    let text = LINK.replace_all(&text, |caps: &Captures<'_>| {
        let label = &caps[1];
        let href = stash.plain_text(&caps[2]);
        let title = stash.plain_text(label);
        let open = format!(
            r#"<a href="{}" title="{}" style="{}">"#,
            escape_html(&href),
            escape_html(&title),
            &styles[StyleKey::Link]
        );
        let open = stash.hold(open, "");
        let close = stash.hold("</a>".to_owned(), "");
        format!("{open}{label}{close}")
    });

    let text = replace_delimited(&text, &['$'], |_, content| {
        let formula = stash.plain_text(content);
        let html = format!(
            r#"<span class="math-inline" data-formula-b64="{}" style="{}"><code style="{}">{}</code></span>"#,
            encode_formula(&formula),
            &styles[StyleKey::MathInline],
            &styles[StyleKey::MathInlineFallback],
            escape_literal(&formula)
        );
        stash.hold(html, formula)
    });

    let strong_em_open = format!(
        r#"<strong style="{}"><em style="{}">"#,
        &styles[StyleKey::Strong],
        &styles[StyleKey::Emphasis]
    );
    let text = BOLD_ITALIC.replace_all(&text, |caps: &Captures<'_>| {
        let inner = either(caps);
        wrap(&mut stash, &strong_em_open, inner, "</em></strong>")
    });

    let strong_open = format!(r#"<strong style="{}">"#, &styles[StyleKey::Strong]);
    let text = BOLD.replace_all(&text, |caps: &Captures<'_>| {
        let inner = either(caps);
        wrap(&mut stash, &strong_open, inner, "</strong>")
    });

    let em_open = format!(r#"<em style="{}">"#, &styles[StyleKey::Emphasis]);
    let text = replace_delimited(&text, &['*', '_'], |_, inner| {
        wrap(&mut stash, &em_open, inner, "</em>")
    });

    let del_open = format!(r#"<del style="{}">"#, &styles[StyleKey::Strikethrough]);
    let text = STRIKETHROUGH.replace_all(&text, |caps: &Captures<'_>| {
        wrap(&mut stash, &del_open, &caps[1], "</del>")
    });

    (text.into_owned(), stash)
}

/// Content of whichever alternative matched.
fn either<'c>(caps: &'c Captures<'_>) -> &'c str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
}

/// Park an open/close tag pair around visible content.
fn wrap(stash: &mut Stash, open: &str, inner: &str, close: &str) -> String {
    let open = stash.hold(open.to_owned(), "");
    let close = stash.hold(close.to_owned(), "");
    format!("{open}{inner}{close}")
}

/// Replace `m content m` spans for each marker `m`.
///
/// A span matches when its opening marker is not preceded by the same
/// marker, the content is non-empty and free of the marker, and the closing
/// marker is not followed by the same marker. Scanning resumes after each
/// replaced span.
fn replace_delimited(
    text: &str,
    markers: &[char],
    mut render: impl FnMut(char, &str) -> String,
) -> String {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < chars.len() {
        let (start, marker) = chars[i];
        let opens = markers.contains(&marker) && (i == 0 || chars[i - 1].1 != marker);
        let close = if opens {
            chars[i + 1..]
                .iter()
                .position(|&(_, c)| c == marker)
                .map(|offset| i + 1 + offset)
        } else {
            None
        };

        if let Some(j) = close
            && j > i + 1
            && chars.get(j + 1).is_none_or(|&(_, next)| next != marker)
        {
            let content_start = start + marker.len_utf8();
            let end = chars[j].0;
            out.push_str(&text[copied..start]);
            out.push_str(&render(marker, &text[content_start..end]));
            copied = end + marker.len_utf8();
            i = j + 1;
            continue;
        }
        i += 1;
    }

    out.push_str(&text[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(text: &str) -> String {
        render_inline(text, &StyleTable::default())
    }

    fn style(key: StyleKey) -> String {
        StyleTable::default()[key].to_owned()
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(render("just words, nothing else"), "just words, nothing else");
    }

    #[test]
    fn test_code_span_escapes_content() {
        let html = render("use `<b>&</b>` here");
        assert_eq!(
            html,
            format!(
                r#"use <code style="{}">&lt;b&gt;&amp;&lt;/b&gt;</code> here"#,
                style(StyleKey::CodeSpan)
            )
        );
    }

    #[test]
    fn test_code_span_dollar_not_math() {
        let html = render("`$a$` and `b_c_d`");
        assert!(html.contains("&#36;a&#36;"));
        assert!(html.contains("b&#95;c&#95;d"));
        assert!(!html.contains("math-inline"));
        assert!(!html.contains("<em"));
    }

    #[test]
    fn test_image() {
        let html = render("![A cat](cat.png)");
        assert!(html.starts_with(r#"<figure style=""#));
        assert!(html.contains(r#"<img src="cat.png" alt="A cat""#));
        assert!(html.contains(">A cat</figcaption></figure>"));
    }

    #[test]
    fn test_link_with_underscores_in_href() {
        let html = render("[docs](https://example.com/a_b_c)");
        assert_eq!(
            html,
            format!(
                r#"<a href="https://example.com/a_b_c" title="docs" style="{}">docs</a>"#,
                style(StyleKey::Link)
            )
        );
    }

    #[test]
    fn test_link_label_gets_emphasis() {
        let html = render("[**bold** link](u)");
        assert!(html.contains(r#"title="**bold** link""#));
        assert!(html.contains(&format!(
            r#"<strong style="{}">bold</strong> link</a>"#,
            style(StyleKey::Strong)
        )));
    }

    #[test]
    fn test_linked_image() {
        let html = render("[![logo](l.png)](https://x.org)");
        assert!(html.starts_with(r#"<a href="https://x.org" title="logo""#));
        assert!(html.contains("<figure"));
        assert!(html.ends_with("</figure></a>"));
    }

    #[test]
    fn test_inline_math() {
        let html = render("mass $E=mc^2$ energy");
        assert!(html.contains(r#"class="math-inline" data-formula-b64="RT1tY14y""#));
        assert!(html.contains(">E=mc^2</code></span>"));
    }

    #[test]
    fn test_inline_math_subscripts_not_italic() {
        let html = render("$a_1 + b_2$");
        assert!(html.contains("a&#95;1 + b&#95;2"));
        assert!(!html.contains("<em"));
    }

    #[test]
    fn test_double_dollar_is_not_inline_math() {
        assert_eq!(render("$$x$$"), "$$x$$");
        assert_eq!(render("costs $5"), "costs $5");
    }

    #[test]
    fn test_bold_italic() {
        let html = render("***both***");
        assert_eq!(
            html,
            format!(
                r#"<strong style="{}"><em style="{}">both</em></strong>"#,
                style(StyleKey::Strong),
                style(StyleKey::Emphasis)
            )
        );
        assert_eq!(render("___both___"), html);
    }

    #[test]
    fn test_bold_and_italic() {
        let html = render("**b** and *i* and __b2__ and _i2_");
        assert_eq!(html.matches("<strong").count(), 2);
        assert_eq!(html.matches("<em").count(), 2);
        assert!(html.contains(">b</strong>"));
        assert!(html.contains(">i2</em>"));
    }

    #[test]
    fn test_italic_ignores_unpaired_markers() {
        assert_eq!(render("a * b"), "a * b");
        assert_eq!(render("**open"), "**open");
    }

    #[test]
    fn test_strikethrough() {
        let html = render("~~gone~~");
        assert_eq!(
            html,
            format!(r#"<del style="{}">gone</del>"#, style(StyleKey::Strikethrough))
        );
    }

    #[test]
    fn test_raw_inline_html_attributes_untouched() {
        let html = render(r#"<span data-x="a_b_c">*hi*</span>"#);
        assert!(html.starts_with(r#"<span data-x="a_b_c"><em"#));
        assert!(html.ends_with("hi</em></span>"));
    }

    #[test]
    fn test_raw_tag_keeps_code_span_in_attribute() {
        let html = render(r#"<span title="`x`">y</span>"#);
        assert_eq!(html, r#"<span title="`x`">y</span>"#);
        assert!(!html.contains(TOKEN_OPEN));
    }

    #[test]
    fn test_plain_text_drops_markup() {
        assert_eq!(inline_plain_text("**Release** `v2` notes"), "Release v2 notes");
        assert_eq!(
            inline_plain_text("see [the *docs*](u_v) and <b>$x_1$</b>"),
            "see the docs and x_1"
        );
    }

    #[test]
    fn test_token_characters_in_input_are_dropped() {
        assert_eq!(render("a\u{E000}0\u{E001}b"), "a0b");
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let inputs = [
            "Hello *world* and **bold** ~~gone~~",
            "`a*b*c` with $x_1^2$ and [link](http://a_b.c/d_e)",
            "![alt *x*](p_q.png) ***strong em***",
            "<b>tag</b> plain & text",
        ];
        for input in inputs {
            let once = render(input);
            assert_eq!(render(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_replace_delimited_rules() {
        let upper = |_: char, s: &str| s.to_uppercase();
        assert_eq!(replace_delimited("a *b* c", &['*'], upper), "a B c");
        assert_eq!(replace_delimited("**b**", &['*'], upper), "**b**");
        assert_eq!(replace_delimited("*a* *b*", &['*'], upper), "A B");
        assert_eq!(replace_delimited("*a_b*c_", &['*', '_'], upper), "A_Bc_");
        assert_eq!(replace_delimited("é*ü*", &['*'], upper), "éÜ");
    }
}
