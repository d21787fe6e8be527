//! Event severity levels and their textual monikers.
//!
//! Levels are totally ordered from [`Level::Verbose`] to [`Level::Fatal`].
//! The `{Level}` directive of an output template renders a level through
//! [`Level::moniker`], which understands the short forms used in log
//! templates:
//!
//! | Format | Information | Warning |
//! |--------|-------------|---------|
//! | (none) | `Information` | `Warning` |
//! | `u3`   | `INF` | `WRN` |
//! | `w3`   | `inf` | `wrn` |
//! | `t4`   | `Info` | `Warn` |
//! | `u`    | `INFORMATION` | `WARNING` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::template::Casing;
use crate::theme::ThemeStyle;

/// Severity of a log event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    /// Tracing information and debugging minutiae.
    Verbose,
    /// Internal control flow and diagnostic state dumps.
    Debug,
    /// Interesting things happening in normal operation.
    Information,
    /// Something unexpected that did not prevent work from completing.
    Warning,
    /// A failure of the current unit of work.
    Error,
    /// A failure the application cannot recover from.
    Fatal,
}

const TITLE_CASE_MONIKERS: [[&str; 4]; 6] = [
    ["V", "Vb", "Vrb", "Verb"],
    ["D", "De", "Dbg", "Dbug"],
    ["I", "In", "Inf", "Info"],
    ["W", "Wn", "Wrn", "Warn"],
    ["E", "Er", "Err", "Eror"],
    ["F", "Fa", "Ftl", "Fatl"],
];

const LOWER_CASE_MONIKERS: [[&str; 4]; 6] = [
    ["v", "vb", "vrb", "verb"],
    ["d", "de", "dbg", "dbug"],
    ["i", "in", "inf", "info"],
    ["w", "wn", "wrn", "warn"],
    ["e", "er", "err", "eror"],
    ["f", "fa", "ftl", "fatl"],
];

const UPPER_CASE_MONIKERS: [[&str; 4]; 6] = [
    ["V", "VB", "VRB", "VERB"],
    ["D", "DE", "DBG", "DBUG"],
    ["I", "IN", "INF", "INFO"],
    ["W", "WN", "WRN", "WARN"],
    ["E", "ER", "ERR", "EROR"],
    ["F", "FA", "FTL", "FATL"],
];

impl Level {
    /// All levels, least severe first.
    pub const ALL: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// The full name of the level, e.g. `"Information"`.
    pub fn name(self) -> &'static str {
        match self {
            Level::Verbose => "Verbose",
            Level::Debug => "Debug",
            Level::Information => "Information",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
        }
    }

    /// The theme role used to style this level.
    pub fn theme_style(self) -> ThemeStyle {
        match self {
            Level::Verbose => ThemeStyle::LevelVerbose,
            Level::Debug => ThemeStyle::LevelDebug,
            Level::Information => ThemeStyle::LevelInformation,
            Level::Warning => ThemeStyle::LevelWarning,
            Level::Error => ThemeStyle::LevelError,
            Level::Fatal => ThemeStyle::LevelFatal,
        }
    }

    /// Renders the level according to a `{Level:format}` specifier.
    ///
    /// A two or three character format is a case letter (`u`, `w`, `t`)
    /// followed by a width. Widths 1 to 4 pick a fixed abbreviation, larger
    /// widths truncate the full name. Any other format is treated as a
    /// casing request (`u` or `w`) on the full name.
    pub fn moniker(self, format: Option<&str>) -> String {
        let Some(format) = format else {
            return self.name().to_string();
        };

        let mut chars = format.chars();
        let case = chars.next();
        let width = chars.as_str();
        if !(1..=2).contains(&width.len()) {
            return Casing::from_format(Some(format)).apply(self.name());
        }
        let Ok(width) = width.parse::<usize>() else {
            return Casing::from_format(Some(format)).apply(self.name());
        };

        if width < 1 {
            return String::new();
        }

        if width > 4 {
            let truncated: String = self.name().chars().take(width).collect();
            return match case {
                Some('u') => truncated.to_uppercase(),
                Some('w') => truncated.to_lowercase(),
                _ => truncated,
            };
        }

        let index = self as usize;
        match case {
            Some('w') => LOWER_CASE_MONIKERS[index][width - 1].to_string(),
            Some('u') => UPPER_CASE_MONIKERS[index][width - 1].to_string(),
            Some('t') => TITLE_CASE_MONIKERS[index][width - 1].to_string(),
            _ => Casing::from_format(Some(format)).apply(self.name()),
        }
    }

    /// The `log` crate filter that lets exactly this level and above through.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Level::Verbose => log::LevelFilter::Trace,
            Level::Debug => log::LevelFilter::Debug,
            Level::Information => log::LevelFilter::Info,
            Level::Warning => log::LevelFilter::Warn,
            Level::Error | Level::Fatal => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Parses a level name case-insensitively. Common short forms
    /// (`trace`, `info`, `warn`, `err`, `critical`) are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbose" | "trace" | "vrb" => Ok(Level::Verbose),
            "debug" | "dbg" => Ok(Level::Debug),
            "information" | "info" | "inf" => Ok(Level::Information),
            "warning" | "warn" | "wrn" => Ok(Level::Warning),
            "error" | "err" => Ok(Level::Error),
            "fatal" | "critical" | "ftl" => Ok(Level::Fatal),
            _ => Err(format!("unknown level '{}'", s)),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.name().to_string()
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Level::Verbose,
            log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Information,
            log::Level::Warn => Level::Warning,
            log::Level::Error => Level::Error,
        }
    }
}
