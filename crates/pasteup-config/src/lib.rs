//! Configuration management for pasteup.
//!
//! Parses `pasteup.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: every `[theme]` value, plus `output.input` and
//! `output.output`, which also expand a leading `~`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override input markdown path.
    pub input: Option<PathBuf>,
    /// Override output HTML path.
    pub output: Option<PathBuf>,
    /// Override fragment-only output.
    pub fragment: Option<bool>,
    /// Override theme accent color.
    pub primary_color: Option<String>,
    /// Override nesting bound for lists and blockquotes.
    pub max_nesting: Option<usize>,
    /// Override diagram placeholder rendering.
    pub diagrams: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pasteup.toml";

const DEFAULT_INPUT: &str = "input.md";
const DEFAULT_OUTPUT: &str = "output_rendered.html";
const MAX_NESTING_LIMIT: usize = 256;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme overrides. Unset values keep the built-in palette.
    pub theme: ThemeConfig,
    /// Renderer options.
    pub render: RenderConfig,
    /// Output paths as written in the file.
    output: OutputConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Theme overrides from the `[theme]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub primary: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub code_inline: Option<String>,
    pub code_background: Option<String>,
    pub code_block_background: Option<String>,
    pub code_block_text: Option<String>,
    pub blockquote_background: Option<String>,
    pub font_family: Option<String>,
}

impl ThemeConfig {
    /// `(field name, value)` for every field, set or not.
    fn fields_mut(&mut self) -> [(&'static str, &mut Option<String>); 9] {
        [
            ("theme.primary", &mut self.primary),
            ("theme.text", &mut self.text),
            ("theme.link", &mut self.link),
            ("theme.code_inline", &mut self.code_inline),
            ("theme.code_background", &mut self.code_background),
            ("theme.code_block_background", &mut self.code_block_background),
            ("theme.code_block_text", &mut self.code_block_text),
            ("theme.blockquote_background", &mut self.blockquote_background),
            ("theme.font_family", &mut self.font_family),
        ]
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 9] {
        [
            ("theme.primary", self.primary.as_deref()),
            ("theme.text", self.text.as_deref()),
            ("theme.link", self.link.as_deref()),
            ("theme.code_inline", self.code_inline.as_deref()),
            ("theme.code_background", self.code_background.as_deref()),
            ("theme.code_block_background", self.code_block_background.as_deref()),
            ("theme.code_block_text", self.code_block_text.as_deref()),
            ("theme.blockquote_background", self.blockquote_background.as_deref()),
            ("theme.font_family", self.font_family.as_deref()),
        ]
    }
}

/// Renderer options from the `[render]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Deepest allowed nesting of lists and blockquotes.
    pub max_nesting: usize,
    /// Whether diagram fences become placeholders.
    pub diagrams: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_nesting: 32,
            diagrams: true,
        }
    }
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    input: Option<String>,
    output: Option<String>,
    fragment: Option<bool>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Markdown file to read.
    pub input: PathBuf,
    /// HTML file to write.
    pub output: PathBuf,
    /// Write only the rendered container, without the page template.
    pub fragment: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.input`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pasteup.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated again.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input) = &settings.input {
            self.output_resolved.input.clone_from(input);
        }
        if let Some(output) = &settings.output {
            self.output_resolved.output.clone_from(output);
        }
        if let Some(fragment) = settings.fragment {
            self.output_resolved.fragment = fragment;
        }
        if let Some(primary) = &settings.primary_color {
            self.theme.primary = Some(primary.clone());
        }
        if let Some(max_nesting) = settings.max_nesting {
            self.render.max_nesting = max_nesting;
        }
        if let Some(diagrams) = settings.diagrams {
            self.render.diagrams = diagrams;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            theme: ThemeConfig::default(),
            render: RenderConfig::default(),
            output: OutputConfigRaw::default(),
            output_resolved: OutputConfig {
                input: base.join(DEFAULT_INPUT),
                output: base.join(DEFAULT_OUTPUT),
                fragment: false,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.theme.fields() {
            if let Some(value) = value {
                require_non_empty(value, field)?;
                if value.contains(['"', '<', '>']) {
                    return Err(ConfigError::Validation(format!(
                        "{field} cannot contain quotes or angle brackets"
                    )));
                }
            }
        }

        let max_nesting = self.render.max_nesting;
        if max_nesting == 0 || max_nesting > MAX_NESTING_LIMIT {
            return Err(ConfigError::Validation(format!(
                "render.max_nesting must be between 1 and {MAX_NESTING_LIMIT}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for (field, value) in self.theme.fields_mut() {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }

        if let Some(ref input) = self.output.input {
            self.output.input = Some(expand::expand_path(input, "output.input")?);
        }
        if let Some(ref output) = self.output.output {
            self.output.output = Some(expand::expand_path(output, "output.output")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.output_resolved = OutputConfig {
            input: resolve(self.output.input.as_deref(), DEFAULT_INPUT),
            output: resolve(self.output.output.as_deref(), DEFAULT_OUTPUT),
            fragment: self.output.fragment.unwrap_or(false),
        };
    }
}
