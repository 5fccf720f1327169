//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod styles;

pub(crate) use render::RenderArgs;
pub(crate) use styles::StylesArgs;

use pasteup_config::{Config, ThemeConfig};
use pasteup_renderer::{Renderer, StyleTable, Theme};

/// Built-in theme with config overrides applied.
pub(crate) fn theme_from_config(overrides: &ThemeConfig) -> Theme {
    let mut theme = Theme::default();
    let slots = [
        (&mut theme.primary, &overrides.primary),
        (&mut theme.text, &overrides.text),
        (&mut theme.link, &overrides.link),
        (&mut theme.code_inline, &overrides.code_inline),
        (&mut theme.code_background, &overrides.code_background),
        (&mut theme.code_block_background, &overrides.code_block_background),
        (&mut theme.code_block_text, &overrides.code_block_text),
        (&mut theme.blockquote_background, &overrides.blockquote_background),
        (&mut theme.font_family, &overrides.font_family),
    ];
    for (slot, value) in slots {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }
    theme
}

/// Renderer configured from the loaded config.
pub(crate) fn renderer_from_config(config: &Config) -> Renderer {
    let theme = theme_from_config(&config.theme);
    Renderer::new(StyleTable::new(&theme))
        .with_max_nesting(config.render.max_nesting)
        .with_diagrams(config.render.diagrams)
}
