//! Offline placeholders for diagram code blocks.
//!
//! Diagram fences are never rendered here. The block becomes a styled box
//! with the escaped source and a notice; the page template may later swap
//! it for a real diagram.

use crate::code_block::{CodeBlockProcessor, ProcessResult};
use crate::style::{StyleKey, StyleTable};
use crate::util::escape_html;

/// Supported diagram languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramLanguage {
    Mermaid,
    PlantUml,
    C4PlantUml,
    GraphViz,
    Ditaa,
    Nomnoml,
    Svgbob,
    WaveDrom,
}

impl DiagramLanguage {
    /// Parse a fence language tag.
    ///
    /// Accepts plain names (`mermaid`) and `kroki-` prefixed names
    /// (`kroki-mermaid`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lang = s.strip_prefix("kroki-").unwrap_or(s);

        match lang {
            "mermaid" => Some(Self::Mermaid),
            "plantuml" => Some(Self::PlantUml),
            "c4plantuml" => Some(Self::C4PlantUml),
            "graphviz" | "dot" => Some(Self::GraphViz),
            "ditaa" => Some(Self::Ditaa),
            "nomnoml" => Some(Self::Nomnoml),
            "svgbob" => Some(Self::Svgbob),
            "wavedrom" => Some(Self::WaveDrom),
            _ => None,
        }
    }

    /// Canonical name, written to the placeholder's `data-language`.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::PlantUml => "plantuml",
            Self::C4PlantUml => "c4plantuml",
            Self::GraphViz => "graphviz",
            Self::Ditaa => "ditaa",
            Self::Nomnoml => "nomnoml",
            Self::Svgbob => "svgbob",
            Self::WaveDrom => "wavedrom",
        }
    }

    /// Human-readable name for the placeholder title.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mermaid => "Mermaid",
            Self::PlantUml => "PlantUML",
            Self::C4PlantUml => "C4-PlantUML",
            Self::GraphViz => "Graphviz",
            Self::Ditaa => "Ditaa",
            Self::Nomnoml => "nomnoml",
            Self::Svgbob => "Svgbob",
            Self::WaveDrom => "WaveDrom",
        }
    }
}

/// Render the placeholder box for a diagram block.
#[must_use]
pub fn render_placeholder(language: DiagramLanguage, source: &str, styles: &StyleTable) -> String {
    let notice = match language {
        DiagramLanguage::Mermaid => "Open the page in a browser to render it with Mermaid.js",
        _ => "Rendering this diagram requires a viewer with diagram support",
    };
    format!(
        r#"<div class="diagram-placeholder" data-language="{}" style="{}"><p style="{}">{} diagram</p><pre style="{}">{}</pre><p style="{}">{notice}</p></div>"#,
        language.endpoint(),
        &styles[StyleKey::Diagram],
        &styles[StyleKey::DiagramTitle],
        language.display_name(),
        &styles[StyleKey::DiagramSource],
        escape_html(source),
        &styles[StyleKey::DiagramNotice],
    )
}

/// Built-in processor that turns diagram fences into placeholders.
///
/// Registered by [`Renderer`](crate::Renderer) after custom processors
/// unless diagrams are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramPlaceholder;

impl CodeBlockProcessor for DiagramPlaceholder {
    fn process(&self, language: &str, source: &str, styles: &StyleTable) -> ProcessResult {
        match DiagramLanguage::parse(language) {
            Some(language) => ProcessResult::Inline(render_placeholder(language, source, styles)),
            None => ProcessResult::PassThrough,
        }
    }
}
