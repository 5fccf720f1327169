//! Line classification for block dispatch.
//!
//! Several block prefixes overlap (`---` against `- item`, `<` against
//! `<!--`), so [`classify`] checks them in a fixed priority order and the
//! first match wins. The paragraph parser uses the same function as its
//! stop condition.

use std::sync::LazyLock;

use regex::Regex;

use crate::util::{indent_width, is_blank};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static HEADING_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s").unwrap());
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*+]\s+(.*)$").unwrap());
static UNORDERED_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+]\s").unwrap());
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\.\s+(.*)$").unwrap());
static ORDERED_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());
static THEMATIC_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-{3,}|\*{3,}|_{3,})\s*$").unwrap());
static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\s*([\w+#.-]*)").unwrap());
static TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-:|]+\|$").unwrap());

/// Block kinds in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    CodeFence,
    MathBlock,
    Table,
    Blockquote,
    UnorderedList,
    OrderedList,
    ThematicBreak,
    Html,
    Paragraph,
}

/// Classify a line. Returns `None` for blank lines.
pub fn classify(line: &str) -> Option<BlockKind> {
    if is_blank(line) {
        return None;
    }
    let trimmed = line.trim();
    let kind = if HEADING_START.is_match(line) {
        BlockKind::Heading
    } else if trimmed.starts_with("```") {
        BlockKind::CodeFence
    } else if trimmed.starts_with("$$") {
        BlockKind::MathBlock
    } else if trimmed.starts_with('|') {
        BlockKind::Table
    } else if trimmed.starts_with('>') {
        BlockKind::Blockquote
    } else if UNORDERED_START.is_match(line) {
        BlockKind::UnorderedList
    } else if ORDERED_START.is_match(line) {
        BlockKind::OrderedList
    } else if THEMATIC_BREAK.is_match(trimmed) {
        BlockKind::ThematicBreak
    } else if trimmed.starts_with('<') && !trimmed.starts_with("<!") {
        BlockKind::Html
    } else {
        BlockKind::Paragraph
    };
    Some(kind)
}

/// Split a heading line into its level and text.
pub(crate) fn heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING.captures(line)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    Some((level, caps.get(2).map_or("", |m| m.as_str())))
}

/// Language tag of an opening fence line (may be empty).
///
/// Whitespace between the fence and the tag is allowed, and the tag may
/// contain `+`, `#`, `.` and `-` besides word characters (`c++`, `f#`).
pub(crate) fn fence_language(line: &str) -> &str {
    FENCE_OPEN
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Whether a table line is the header/body divider.
pub(crate) fn is_table_separator(line: &str) -> bool {
    TABLE_SEPARATOR.is_match(line.trim())
}

/// A parsed list item line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListMarker<'a> {
    /// Leading whitespace width.
    pub indent: usize,
    /// Digits-and-dot marker rather than a bullet.
    pub ordered: bool,
    /// Item text after the marker.
    pub content: &'a str,
}

impl<'a> ListMarker<'a> {
    /// Parse a list item line of either marker style.
    pub(crate) fn parse(line: &'a str) -> Option<Self> {
        let (caps, ordered) = match UNORDERED_ITEM.captures(line) {
            Some(caps) => (caps, false),
            None => (ORDERED_ITEM.captures(line)?, true),
        };
        Some(Self {
            indent: indent_width(caps.get(1).map_or("", |m| m.as_str())),
            ordered,
            content: caps.get(2).map_or("", |m| m.as_str()),
        })
    }
}
