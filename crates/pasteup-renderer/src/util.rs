//! Shared helpers for escaping and encoding leaf text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Escape the five HTML-significant characters.
///
/// # Examples
///
/// ```
/// use pasteup_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text and encode inline marker characters as numeric entities.
///
/// Used for content that must stay literal: code spans, captions and math
/// fallbacks. Running the inline pipeline over the result finds no markers.
pub(crate) fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in escape_html(text).chars() {
        match ch {
            '$' => out.push_str("&#36;"),
            '*' => out.push_str("&#42;"),
            '_' => out.push_str("&#95;"),
            '~' => out.push_str("&#126;"),
            '`' => out.push_str("&#96;"),
            '[' => out.push_str("&#91;"),
            ']' => out.push_str("&#93;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Encode a formula for the external math renderer (base64 of UTF-8).
///
/// # Examples
///
/// ```
/// use pasteup_renderer::encode_formula;
///
/// assert_eq!(encode_formula("E=mc^2"), "RT1tY14y");
/// ```
pub fn encode_formula(formula: &str) -> String {
    STANDARD.encode(formula.as_bytes())
}

/// Width of the leading whitespace of a line. Tabs count as four columns.
pub(crate) fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Whether a line contains only whitespace.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
