//! Theme palette and the inline style table.
//!
//! Every element the renderer emits carries its presentation in a `style`
//! attribute. Rich-text editors that receive pasted HTML drop `<style>`
//! blocks and class selectors, so nothing may depend on an external sheet.
//!
//! [`StyleTable`] is built once from a [`Theme`] and then only read. Keys
//! are a closed enum, so a lookup for an unknown key cannot be written.

use std::ops::Index;

/// Colors and font used to build the style table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Accent color for headings, strong text and borders.
    pub primary: String,
    /// Body text color.
    pub text: String,
    /// Link color.
    pub link: String,
    /// Foreground of inline code spans.
    pub code_inline: String,
    /// Background of inline code spans and math fallbacks.
    pub code_background: String,
    /// Background of fenced code blocks.
    pub code_block_background: String,
    /// Foreground of fenced code blocks.
    pub code_block_text: String,
    /// Background of blockquotes.
    pub blockquote_background: String,
    /// Font stack for the root container, tables and block math.
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#FA5151".to_owned(),
            text: "#3f3f3f".to_owned(),
            link: "#576b95".to_owned(),
            code_inline: "#d14".to_owned(),
            code_background: "rgba(27, 31, 35, 0.05)".to_owned(),
            code_block_background: "#0d1117".to_owned(),
            code_block_text: "#c9d1d9".to_owned(),
            blockquote_background: "#f7f7f7".to_owned(),
            font_family: "-apple-system-font, BlinkMacSystemFont, 'Helvetica Neue', \
                          'PingFang SC', 'Hiragino Sans GB', 'Microsoft YaHei UI', \
                          'Microsoft YaHei', Arial, sans-serif"
                .to_owned(),
        }
    }
}

/// Every element kind that carries a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Container,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    /// Appended to the first level-1 heading of a document.
    LeadingHeading,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Strong,
    Emphasis,
    Strikethrough,
    CodeSpan,
    CodeBlock,
    CodeInner,
    CodeDecoration,
    Blockquote,
    BlockquoteParagraph,
    Link,
    Figure,
    Image,
    FigureCaption,
    ThematicBreak,
    TableWrapper,
    Table,
    TableHead,
    TableHeaderCell,
    TableCell,
    MathInline,
    MathInlineFallback,
    MathBlock,
    MathBlockFallback,
    Diagram,
    DiagramTitle,
    DiagramSource,
    DiagramNotice,
}

impl StyleKey {
    /// All keys, in table order.
    pub const ALL: [Self; 39] = [
        Self::Container,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H5,
        Self::H6,
        Self::LeadingHeading,
        Self::Paragraph,
        Self::UnorderedList,
        Self::OrderedList,
        Self::ListItem,
        Self::Strong,
        Self::Emphasis,
        Self::Strikethrough,
        Self::CodeSpan,
        Self::CodeBlock,
        Self::CodeInner,
        Self::CodeDecoration,
        Self::Blockquote,
        Self::BlockquoteParagraph,
        Self::Link,
        Self::Figure,
        Self::Image,
        Self::FigureCaption,
        Self::ThematicBreak,
        Self::TableWrapper,
        Self::Table,
        Self::TableHead,
        Self::TableHeaderCell,
        Self::TableCell,
        Self::MathInline,
        Self::MathInlineFallback,
        Self::MathBlock,
        Self::MathBlockFallback,
        Self::Diagram,
        Self::DiagramTitle,
        Self::DiagramSource,
        Self::DiagramNotice,
    ];

    /// Heading key for a level in `1..=6`.
    ///
    /// Levels above 6 map to [`StyleKey::H6`].
    #[must_use]
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => Self::H1,
            2 => Self::H2,
            3 => Self::H3,
            4 => Self::H4,
            5 => Self::H5,
            _ => Self::H6,
        }
    }

    /// Stable snake_case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::LeadingHeading => "leading_heading",
            Self::Paragraph => "paragraph",
            Self::UnorderedList => "unordered_list",
            Self::OrderedList => "ordered_list",
            Self::ListItem => "list_item",
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Strikethrough => "strikethrough",
            Self::CodeSpan => "code_span",
            Self::CodeBlock => "code_block",
            Self::CodeInner => "code_inner",
            Self::CodeDecoration => "code_decoration",
            Self::Blockquote => "blockquote",
            Self::BlockquoteParagraph => "blockquote_paragraph",
            Self::Link => "link",
            Self::Figure => "figure",
            Self::Image => "image",
            Self::FigureCaption => "figure_caption",
            Self::ThematicBreak => "thematic_break",
            Self::TableWrapper => "table_wrapper",
            Self::Table => "table",
            Self::TableHead => "table_head",
            Self::TableHeaderCell => "table_header_cell",
            Self::TableCell => "table_cell",
            Self::MathInline => "math_inline",
            Self::MathInlineFallback => "math_inline_fallback",
            Self::MathBlock => "math_block",
            Self::MathBlockFallback => "math_block_fallback",
            Self::Diagram => "diagram",
            Self::DiagramTitle => "diagram_title",
            Self::DiagramSource => "diagram_source",
            Self::DiagramNotice => "diagram_notice",
        }
    }

    fn build(self, theme: &Theme) -> String {
        let Theme {
            primary,
            text,
            link,
            code_inline,
            code_background,
            code_block_background,
            code_block_text,
            blockquote_background,
            font_family,
        } = theme;
        let tint = |pct: u8| format!("color-mix(in srgb, {primary} {pct}%, transparent)");

        match self {
            Self::Container => {
                format!("font-family: {font_family}; font-size: 16px; line-height: 1.75; text-align: left;")
            }
            Self::H1 => format!(
                "display: table; border-bottom: 2px solid {primary}; margin: 2em auto 1em; \
                 font-weight: bold; text-align: center; padding: 0.5em 1em; font-size: 22.4px; \
                 text-shadow: 1px 1px 3px rgba(0, 0, 0, 0.05); color: {primary}; \
                 background: transparent;"
            ),
            Self::H2 => format!(
                "margin: 2em 8px 0.75em 0; color: {text}; font-weight: bold; padding-left: 12px; \
                 font-size: 19.2px; border-radius: 6px; line-height: 2.4em; \
                 border-left: 4px solid {primary}; border-right: 1px solid {t10}; \
                 border-bottom: 1px solid {t10}; border-top: 1px solid {t10}; background: {t8};",
                t10 = tint(10),
                t8 = tint(8),
            ),
            Self::H3 => sub_heading(primary, "2em", "17.6px", true),
            Self::H4 => sub_heading(primary, "1.5em", "16px", true),
            Self::H5 | Self::H6 => sub_heading(primary, "1.5em", "16px", false),
            Self::LeadingHeading => "margin-top: 0 !important;".to_owned(),
            Self::Paragraph => format!("margin: 1.5em 8px; letter-spacing: 0.1em; color: {text};"),
            Self::UnorderedList => {
                format!("margin-left: 0; color: {text}; list-style: none; padding-left: 1.5em;")
            }
            Self::OrderedList => format!("margin-left: 0; color: {text}; padding-left: 1.5em;"),
            Self::ListItem => format!("display: block; color: {text}; margin: 0.5em 8px;"),
            Self::Strong => format!("color: {primary}; font-weight: bold; font-size: inherit;"),
            Self::Emphasis => "font-style: italic; font-size: inherit;".to_owned(),
            Self::Strikethrough => "text-decoration: line-through;".to_owned(),
            Self::CodeSpan => format!(
                "font-size: 90%; color: {code_inline}; background: {code_background}; \
                 padding: 3px 5px; border-radius: 4px;"
            ),
            Self::CodeBlock => format!(
                "color: {code_block_text}; background: {code_block_background}; font-size: 90%; \
                 overflow-x: auto; border-radius: 8px; line-height: 1.5; margin: 10px 8px; \
                 border: 1px solid rgba(0, 0, 0, 0.04); padding: 0 !important;"
            ),
            Self::CodeInner => "font-size: 90%; border-radius: 4px; display: -webkit-box; \
                 padding: 0.5em 1em 1em; overflow-x: auto; text-indent: 0; color: inherit; \
                 background: none; white-space: pre; margin: 0; \
                 font-family: 'Fira Code', Menlo, Operator Mono, Consolas, Monaco, monospace;"
                .to_owned(),
            Self::CodeDecoration => "display: flex; padding: 10px 14px 0;".to_owned(),
            Self::Blockquote => format!(
                "border-left: 4px solid {primary}; border-radius: 6px; \
                 background: {blockquote_background}; margin-bottom: 1em; font-style: italic; \
                 padding: 1em 1em 1em 2em; color: rgba(0, 0, 0, 0.6); \
                 border-bottom: 0.2px solid rgba(0, 0, 0, 0.04); \
                 border-top: 0.2px solid rgba(0, 0, 0, 0.04); \
                 border-right: 0.2px solid rgba(0, 0, 0, 0.04);"
            ),
            Self::BlockquoteParagraph => format!(
                "display: block; font-size: 1em; letter-spacing: 0.1em; color: {text}; margin: 0;"
            ),
            Self::Link => format!("color: {link}; text-decoration: none;"),
            Self::Figure => format!("margin: 1.5em 8px; color: {text};"),
            Self::Image => "display: block; max-width: 100%; margin: 0.1em auto 0.5em; \
                 border-radius: 8px; border: 1px solid rgba(0, 0, 0, 0.04);"
                .to_owned(),
            Self::FigureCaption => "text-align: center; color: #888; font-size: 0.8em;".to_owned(),
            Self::ThematicBreak => "height: 1px; border: none; margin: 2em 0; \
                 background: linear-gradient(to right, rgba(0,0,0,0), rgba(0,0,0,0.1), rgba(0,0,0,0));"
                .to_owned(),
            Self::TableWrapper => format!(
                "font-family: {font_family}; font-size: 16px; line-height: 1.75; \
                 text-align: left; max-width: 100%; overflow: auto;"
            ),
            Self::Table => format!("color: {text}; margin-top: 0 !important;"),
            Self::TableHead => format!("font-weight: bold; color: {text};"),
            Self::TableHeaderCell => format!(
                "border: 1px solid #dfdfdf; padding: 0.25em 0.5em; color: {text}; \
                 word-break: keep-all; background: rgba(0, 0, 0, 0.05);"
            ),
            Self::TableCell => format!(
                "border: 1px solid #dfdfdf; padding: 0.25em 0.5em; color: {text}; \
                 word-break: keep-all;"
            ),
            Self::MathInline => "max-width: 100%; overflow-x: auto;".to_owned(),
            Self::MathInlineFallback => format!("font-style: italic; color: {primary};"),
            Self::MathBlock => format!(
                "font-family: {font_family}; font-size: 16px; line-height: 1.75; \
                 max-width: 100%; overflow-x: auto; padding: 0.5em 0; text-align: center;"
            ),
            Self::MathBlockFallback => format!(
                "font-size: 14px; color: {text}; background: {code_background}; \
                 padding: 8px 16px; border-radius: 4px; display: inline-block; \
                 white-space: pre-wrap; text-align: left;"
            ),
            Self::Diagram => "background: #f6f8fa; border: 1px solid #e1e4e8; border-radius: 8px; \
                 padding: 16px; margin: 10px 8px; text-align: center; color: #586069;"
                .to_owned(),
            Self::DiagramTitle => format!("margin: 0 0 8px; font-weight: bold; color: {primary};"),
            Self::DiagramSource => format!(
                "text-align: left; font-size: 13px; color: {text}; background: none; \
                 margin: 0; white-space: pre-wrap;"
            ),
            Self::DiagramNotice => "margin: 8px 0 0; font-size: 12px; color: #888;".to_owned(),
        }
    }
}

/// Shared shape of the level 3-6 headings.
fn sub_heading(primary: &str, top: &str, size: &str, bold: bool) -> String {
    let weight = if bold { "font-weight: bold; " } else { "" };
    format!(
        "margin: {top} 8px 0.5em; {weight}display: block; text-align: left; \
         background: transparent; margin-left: 0; padding-left: 10px; \
         border-left: 4px solid {primary}; color: {primary}; font-size: {size}; \
         border-radius: 6px;"
    )
}

/// Resolved presentation strings, one per [`StyleKey`].
#[derive(Clone, Debug)]
pub struct StyleTable {
    entries: Vec<String>,
}

impl StyleTable {
    /// Build every style string for the given theme.
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        Self {
            entries: StyleKey::ALL.iter().map(|key| key.build(theme)).collect(),
        }
    }

    /// Iterate over `(key, style)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        StyleKey::ALL
            .iter()
            .zip(&self.entries)
            .map(|(key, style)| (*key, style.as_str()))
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

impl Index<StyleKey> for StyleTable {
    type Output = str;

    fn index(&self, key: StyleKey) -> &str {
        // `ALL` lists the variants in declaration order.
        &self.entries[key as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_in_declaration_order() {
        for (index, key) in StyleKey::ALL.iter().enumerate() {
            assert_eq!(*key as usize, index, "{} out of order", key.name());
        }
    }

    #[test]
    fn test_every_entry_is_declaration_list() {
        let table = StyleTable::default();
        for (key, style) in table.iter() {
            assert!(!style.is_empty(), "{} is empty", key.name());
            assert!(style.trim_end().ends_with(';'), "{} not terminated", key.name());
            assert!(!style.contains('"'), "{} would break the attribute", key.name());
        }
    }

    #[test]
    fn test_theme_change_propagates() {
        let theme = Theme {
            primary: "#123456".to_owned(),
            ..Theme::default()
        };
        let table = StyleTable::new(&theme);
        assert!(table[StyleKey::H1].contains("#123456"));
        assert!(table[StyleKey::Strong].contains("#123456"));
        assert!(table[StyleKey::Blockquote].contains("#123456"));
        assert!(!table[StyleKey::H1].contains("#FA5151"));
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(StyleKey::heading(1), StyleKey::H1);
        assert_eq!(StyleKey::heading(4), StyleKey::H4);
        assert_eq!(StyleKey::heading(6), StyleKey::H6);
        assert_eq!(StyleKey::heading(9), StyleKey::H6);
    }

    #[test]
    fn test_h5_not_bold() {
        let table = StyleTable::default();
        assert!(table[StyleKey::H4].contains("font-weight: bold"));
        assert!(!table[StyleKey::H5].contains("font-weight: bold"));
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<_> = StyleKey::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), StyleKey::ALL.len());
    }
}
