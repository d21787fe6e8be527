//! Built-in themes.
//!
//! Colours are 256-colour palette indices, so they render the same on every
//! terminal that supports the palette.

use console::{Color, Style};

use super::style::ThemeStyle::{self, *};
use super::theme::ConsoleTheme;
use crate::error::Error;

const BLACK: u8 = 0;
const SILVER: u8 = 7;
const GREY: u8 = 8;
const RED: u8 = 9;
const LIME: u8 = 10;
const YELLOW: u8 = 11;
const BLUE: u8 = 12;
const FUCHSIA: u8 = 13;
const AQUA: u8 = 14;
const WHITE: u8 = 15;

/// Names accepted by [`ConsoleTheme::preset`].
pub const PRESET_NAMES: [&str; 5] = ["none", "literate", "grayscale", "colored", "code"];

fn fg(index: u8) -> Style {
    Style::new().fg(Color::Color256(index))
}

fn on(foreground: u8, background: u8) -> Style {
    fg(foreground).bg(Color::Color256(background))
}

fn build(name: &str, styles: [(ThemeStyle, Style); 16]) -> ConsoleTheme {
    ConsoleTheme::from_styles(name, styles)
}

impl ConsoleTheme {
    /// No styling at all. Used for redirected output.
    pub fn none() -> Self {
        ConsoleTheme::named("none")
    }

    /// A theme in the style of the classic literate console.
    pub fn literate() -> Self {
        build(
            "literate",
            [
                (Text, fg(WHITE)),
                (SecondaryText, fg(SILVER)),
                (TertiaryText, fg(GREY)),
                (Invalid, fg(YELLOW)),
                (Null, fg(BLUE)),
                (Name, fg(SILVER)),
                (String, fg(AQUA)),
                (Number, fg(FUCHSIA)),
                (Boolean, fg(BLUE)),
                (Scalar, fg(LIME)),
                (LevelVerbose, fg(SILVER)),
                (LevelDebug, fg(SILVER)),
                (LevelInformation, fg(WHITE)),
                (LevelWarning, fg(YELLOW)),
                (LevelError, on(WHITE, RED)),
                (LevelFatal, on(WHITE, RED)),
            ],
        )
    }

    /// Gray, black and white only.
    pub fn grayscale() -> Self {
        build(
            "grayscale",
            [
                (Text, fg(WHITE)),
                (SecondaryText, fg(SILVER)),
                (TertiaryText, fg(GREY)),
                (Invalid, on(WHITE, GREY)),
                (Null, fg(WHITE)),
                (Name, fg(SILVER)),
                (String, fg(WHITE)),
                (Number, fg(WHITE)),
                (Boolean, fg(WHITE)),
                (Scalar, fg(WHITE)),
                (LevelVerbose, fg(GREY)),
                (LevelDebug, fg(GREY)),
                (LevelInformation, fg(WHITE)),
                (LevelWarning, on(WHITE, GREY)),
                (LevelError, on(BLACK, WHITE)),
                (LevelFatal, on(BLACK, WHITE)),
            ],
        )
    }

    /// Level badges on coloured backgrounds, values in white.
    pub fn colored() -> Self {
        build(
            "colored",
            [
                (Text, fg(SILVER)),
                (SecondaryText, fg(GREY)),
                (TertiaryText, fg(GREY)),
                (Invalid, fg(YELLOW)),
                (Null, fg(WHITE)),
                (Name, fg(WHITE)),
                (String, fg(WHITE)),
                (Number, fg(WHITE)),
                (Boolean, fg(WHITE)),
                (Scalar, fg(WHITE)),
                (LevelVerbose, on(SILVER, GREY)),
                (LevelDebug, on(WHITE, GREY)),
                (LevelInformation, on(WHITE, BLUE)),
                (LevelWarning, on(GREY, YELLOW)),
                (LevelError, on(WHITE, RED)),
                (LevelFatal, on(WHITE, RED)),
            ],
        )
    }

    /// A 256-colour theme along the lines of a popular code editor.
    pub fn code() -> Self {
        build(
            "code",
            [
                (Text, fg(253)),
                (SecondaryText, fg(246)),
                (TertiaryText, fg(242)),
                (Invalid, fg(YELLOW).bold()),
                (Null, fg(38)),
                (Name, fg(81)),
                (String, fg(216)),
                (Number, fg(151)),
                (Boolean, fg(38)),
                (Scalar, fg(79)),
                (LevelVerbose, fg(WHITE)),
                (LevelDebug, fg(WHITE)),
                (LevelInformation, fg(WHITE).bold()),
                (LevelWarning, fg(229)),
                (LevelError, on(197, 238)),
                (LevelFatal, on(197, 238)),
            ],
        )
    }

    /// Looks up a built-in theme by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for names not in [`PRESET_NAMES`].
    pub fn preset(name: &str) -> Result<Self, Error> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::none()),
            "literate" => Ok(Self::literate()),
            "grayscale" | "greyscale" => Ok(Self::grayscale()),
            "colored" | "coloured" => Ok(Self::colored()),
            "code" => Ok(Self::code()),
            other => Err(Error::Configuration(format!(
                "unknown theme '{}', expected one of: {}",
                other,
                PRESET_NAMES.join(", ")
            ))),
        }
    }
}
