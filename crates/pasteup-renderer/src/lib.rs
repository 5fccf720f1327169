//! Markdown to HTML with every style inlined.
//!
//! Rich-text editors on publishing platforms strip `<style>` blocks and
//! class attributes from pasted content. This crate renders a constrained
//! markdown subset into HTML where each element carries its presentation in
//! a `style` attribute, so a paste keeps the look.
//!
//! # Architecture
//!
//! - [`Document`] and [`LineCursor`]: the input lines and a forward-only read
//!   position shared by all block parsers.
//! - Block dispatcher: [`classify`] picks a [`BlockKind`] for the current
//!   line in a fixed priority order, and the matching parser consumes lines
//!   and emits one fragment. Lists and blockquotes recurse.
//! - [`render_inline`]: the inline substitution pipeline for leaf text.
//! - [`StyleTable`]: one presentation string per [`StyleKey`], built once
//!   from a [`Theme`].
//!
//! Math and diagrams are not rendered here. Math elements carry the formula
//! base64-encoded in `data-formula-b64`, and diagram fences become
//! placeholders, for a page template to finish in the browser.
//!
//! # Example
//!
//! ```
//! use pasteup_renderer::{Renderer, StyleTable, Theme};
//!
//! let theme = Theme { primary: "#0969da".to_owned(), ..Theme::default() };
//! let renderer = Renderer::new(StyleTable::new(&theme)).with_max_nesting(8);
//! let result = renderer.render("## Notes\n\n- one\n- two");
//! assert_eq!(result.fragments.len(), 2);
//! assert!(result.html.contains("#0969da"));
//! ```

mod blocks;
mod classify;
mod code_block;
mod cursor;
mod diagram;
mod inline;
mod renderer;
mod state;
mod style;
mod util;

pub use classify::{BlockKind, classify};
pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use cursor::{Document, LineCursor};
pub use diagram::{DiagramLanguage, DiagramPlaceholder, render_placeholder};
pub use inline::render_inline;
pub use renderer::{DEFAULT_MAX_NESTING, RenderResult, Renderer};
pub use style::{StyleKey, StyleTable, Theme};
pub use util::{encode_formula, escape_html};
