//! Declarative sink configuration.
//!
//! ```yaml
//! output_template: "[{Timestamp:HH:mm:ss} {Level:u3}] {Message:lj}{NewLine}{Exception}"
//! theme: literate                 # none | literate | grayscale | colored | code
//! theme_file: ~/.config/app/log-theme.yaml   # overrides `theme`
//! minimum_level: Debug
//! standard_error_from_level: Error
//! apply_theme_to_redirected_output: false
//! ```
//!
//! Omitted keys take their defaults. An explicit `null` for
//! `output_template` or `theme` is kept and rejected when the sink is built.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::console_sink::{ConsoleSink, ConsoleSinkBuilder};
use crate::error::Error;
use crate::level::Level;
use crate::output::DEFAULT_OUTPUT_TEMPLATE;
use crate::theme::ConsoleTheme;

/// Settings for a [`ConsoleSink`], loadable from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SinkConfig {
    pub output_template: Option<String>,
    /// Name of a built-in theme.
    pub theme: Option<String>,
    /// A YAML theme file, used instead of `theme` when set.
    pub theme_file: Option<PathBuf>,
    pub minimum_level: Level,
    pub standard_error_from_level: Option<Level>,
    pub apply_theme_to_redirected_output: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            output_template: Some(DEFAULT_OUTPUT_TEMPLATE.to_string()),
            theme: Some("literate".to_string()),
            theme_file: None,
            minimum_level: Level::Verbose,
            standard_error_from_level: None,
            apply_theme_to_redirected_output: false,
        }
    }
}

impl SinkConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// The configured theme; `None` when `theme` was set to null.
    pub fn resolve_theme(&self) -> Result<Option<ConsoleTheme>, Error> {
        if let Some(path) = &self.theme_file {
            return Ok(Some(ConsoleTheme::from_file(path)?));
        }
        self.theme.as_deref().map(ConsoleTheme::preset).transpose()
    }

    /// A builder preloaded with these settings, for further customisation
    /// such as custom writers.
    pub fn builder(&self) -> Result<ConsoleSinkBuilder, Error> {
        let mut builder = ConsoleSink::builder()
            .maybe_output_template(self.output_template.clone())
            .maybe_theme(self.resolve_theme()?)
            .minimum_level(self.minimum_level)
            .apply_theme_to_redirected_output(self.apply_theme_to_redirected_output);
        if let Some(level) = self.standard_error_from_level {
            builder = builder.standard_error_from_level(level);
        }
        Ok(builder)
    }

    pub fn build(&self) -> Result<ConsoleSink, Error> {
        self.builder()?.build()
    }
}
