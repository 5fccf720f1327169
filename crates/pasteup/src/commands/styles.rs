//! `pasteup styles` command implementation.

use std::path::PathBuf;

use clap::Args;
use pasteup_config::Config;

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the styles command.
#[derive(Args)]
pub(crate) struct StylesArgs {
    /// Path to configuration file (default: auto-discover pasteup.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl StylesArgs {
    /// Print every style key with its resolved declaration list.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let renderer = renderer_from_config(&config);
        for (key, style) in renderer.styles().iter() {
            output.labeled(&format!("{}:", key.name()), style);
        }

        Ok(())
    }
}
