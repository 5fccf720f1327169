//! `pasteup render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use pasteup_config::{CliSettings, Config};
use pasteup_renderer::{RenderResult, Theme};

use super::{renderer_from_config, theme_from_config};
use crate::error::CliError;
use crate::output::Output;
use crate::page::{PageData, render_page};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (overrides config, default: input.md).
    input: Option<PathBuf>,

    /// HTML file to write (overrides config, default: output_rendered.html).
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover pasteup.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write only the styled container, without the page template.
    #[arg(long)]
    fragment: bool,

    /// Accent color for headings, strong text and borders (overrides config).
    #[arg(long, env = "PASTEUP_PRIMARY_COLOR")]
    primary_color: Option<String>,

    /// Deepest nesting of lists and blockquotes (overrides config).
    #[arg(long)]
    max_nesting: Option<usize>,

    /// Render diagram fences as plain code blocks.
    #[arg(long)]
    no_diagrams: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a file cannot be read or
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            output: self.output,
            fragment: self.fragment.then_some(true),
            primary_color: self.primary_color,
            max_nesting: self.max_nesting,
            diagrams: self.no_diagrams.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let result = render_to_file(&config)?;
        let paths = &config.output_resolved;

        output.success(&format!(
            "Rendered {} -> {}",
            paths.input.display(),
            paths.output.display()
        ));
        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        if !paths.fragment {
            output.info(&format!(
                "Open {} in a browser to render math and diagrams, then copy",
                paths.output.display()
            ));
        }

        Ok(())
    }
}

/// Read the configured input, render it and write the configured output.
pub(crate) fn render_to_file(config: &Config) -> Result<RenderResult, CliError> {
    let paths = &config.output_resolved;

    let markdown = std::fs::read_to_string(&paths.input).map_err(|source| CliError::Read {
        path: paths.input.clone(),
        source,
    })?;

    let result = renderer_from_config(config).render(&markdown);
    tracing::info!(
        blocks = result.fragments.len(),
        warnings = result.warnings.len(),
        "Rendered {}",
        paths.input.display()
    );

    let html = if paths.fragment {
        format!("{}\n", result.html)
    } else {
        let theme: Theme = theme_from_config(&config.theme);
        render_page(&PageData {
            title: result.title.as_deref(),
            body: &result.html,
            accent: &theme.primary,
        })
    };

    write_output(&paths.output, &html)?;
    Ok(result)
}

/// Write a file, creating missing parent directories.
fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    let to_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, content).map_err(to_error)
}
