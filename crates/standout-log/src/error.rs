//! Error types for sink configuration and theme loading.
//!
//! Rendering itself never produces an [`Error`]: token renderers return
//! `std::io::Result<()>` so that failures of the underlying writer reach the
//! caller unmodified. Everything here is raised at setup time.

use std::path::PathBuf;

/// Error type for building sinks, compiling templates and loading themes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing configuration (null template, null theme, unknown preset).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A theme definition could not be loaded.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// I/O error while reading configuration or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned when a YAML theme cannot be turned into a [`ConsoleTheme`](crate::ConsoleTheme).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// YAML parse error.
    #[error("failed to parse theme: {message}")]
    Parse {
        /// Error message from the YAML parser.
        message: String,
    },

    /// The key does not name a style role.
    #[error("unknown style role '{0}'")]
    UnknownRole(String),

    /// Invalid color format.
    #[error("invalid color '{value}' for role '{role}': {reason}")]
    InvalidColor {
        /// Role where the error occurred.
        role: String,
        /// The invalid color value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Unknown attribute in a style definition.
    #[error("unknown attribute '{attribute}' in style for role '{role}'")]
    UnknownAttribute {
        /// Role where the error occurred.
        role: String,
        /// The unknown attribute name.
        attribute: String,
    },

    /// The style definition has the wrong shape.
    #[error("invalid style definition for role '{role}': {message}")]
    InvalidDefinition {
        /// Role where the error occurred.
        role: String,
        /// Description of what was wrong.
        message: String,
    },

    /// The theme file could not be read.
    #[error("failed to read theme {}: {message}", path.display())]
    Load {
        /// Path of the theme file.
        path: PathBuf,
        /// Error message from the file system.
        message: String,
    },
}
