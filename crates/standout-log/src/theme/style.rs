//! Semantic style roles.

use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;

/// A semantic category of output, mapped to a visual style by a theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeStyle {
    /// Literal template text and message text.
    Text,
    /// Timestamps and plain property values.
    SecondaryText,
    /// Punctuation: brackets, braces and delimiters.
    TertiaryText,
    /// Message directives whose property is missing.
    Invalid,
    /// The `null` literal.
    Null,
    /// Structure field names and type tags.
    Name,
    /// String values.
    String,
    /// Numeric values.
    Number,
    /// Boolean values.
    Boolean,
    /// Any other scalar: chars, dates, custom types.
    Scalar,
    /// Level moniker for `Verbose` events.
    LevelVerbose,
    /// Level moniker for `Debug` events.
    LevelDebug,
    /// Level moniker for `Information` events.
    LevelInformation,
    /// Level moniker for `Warning` events.
    LevelWarning,
    /// Level moniker for `Error` events.
    LevelError,
    /// Level moniker for `Fatal` events.
    LevelFatal,
}

impl ThemeStyle {
    /// Every role, in declaration order.
    pub const ALL: [ThemeStyle; 16] = [
        ThemeStyle::Text,
        ThemeStyle::SecondaryText,
        ThemeStyle::TertiaryText,
        ThemeStyle::Invalid,
        ThemeStyle::Null,
        ThemeStyle::Name,
        ThemeStyle::String,
        ThemeStyle::Number,
        ThemeStyle::Boolean,
        ThemeStyle::Scalar,
        ThemeStyle::LevelVerbose,
        ThemeStyle::LevelDebug,
        ThemeStyle::LevelInformation,
        ThemeStyle::LevelWarning,
        ThemeStyle::LevelError,
        ThemeStyle::LevelFatal,
    ];

    /// The snake_case key used in theme files.
    pub fn name(self) -> &'static str {
        match self {
            ThemeStyle::Text => "text",
            ThemeStyle::SecondaryText => "secondary_text",
            ThemeStyle::TertiaryText => "tertiary_text",
            ThemeStyle::Invalid => "invalid",
            ThemeStyle::Null => "null",
            ThemeStyle::Name => "name",
            ThemeStyle::String => "string",
            ThemeStyle::Number => "number",
            ThemeStyle::Boolean => "boolean",
            ThemeStyle::Scalar => "scalar",
            ThemeStyle::LevelVerbose => "level_verbose",
            ThemeStyle::LevelDebug => "level_debug",
            ThemeStyle::LevelInformation => "level_information",
            ThemeStyle::LevelWarning => "level_warning",
            ThemeStyle::LevelError => "level_error",
            ThemeStyle::LevelFatal => "level_fatal",
        }
    }
}

impl fmt::Display for ThemeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeStyle {
    type Err = ThemeError;

    /// Accepts `secondary_text`, `secondary-text` and `SecondaryText`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        ThemeStyle::ALL
            .into_iter()
            .find(|role| role.name().replace('_', "") == normalized)
            .ok_or_else(|| ThemeError::UnknownRole(s.to_string()))
    }
}
