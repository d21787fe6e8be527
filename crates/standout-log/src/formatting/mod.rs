//! Themed rendering of structured values.
//!
//! Two notations share one interface, [`ValueFormatter`]:
//!
//! | Value | Display | JSON |
//! |-------|---------|------|
//! | string | `"text"` (`text` with `l`) | `"text"` |
//! | char | `'c'` | `"c"` |
//! | sequence | `[1, 2]` | `[1, 2]` |
//! | structure | `Tag {A=1, B="x"}` | `{"A": 1, "B": "x", "$type": "Tag"}` |
//! | dictionary | `{["k"]=1}` | `{"k": 1}` |
//!
//! The JSON formatter renders a top-level scalar with the Display rules; only
//! scalars nested in a sequence, structure or dictionary get JSON treatment.
//!
//! Every piece of text is written with the theme style of its role, so the
//! text content never depends on the theme.

mod datetime;
mod display;
mod json;
mod numeric;
mod provider;

pub use datetime::{format_timestamp, round_trip, DEFAULT_TIMESTAMP_FORMAT};
pub use display::DisplayValueFormatter;
pub use json::JsonValueFormatter;
pub use provider::{FormatProvider, InvariantFormat};

use std::io;
use std::sync::Arc;

use console::Style;

use crate::sink::OutputSink;
use crate::theme::{ConsoleTheme, ThemeStyle};
use crate::value::Value;

/// Renders a [`Value`] tree as styled text.
pub trait ValueFormatter: Send + Sync {
    /// Writes `value` to `sink` and returns the number of styled spans
    /// written.
    ///
    /// `format` is the directive's format string. `is_top_level` marks a
    /// value that is the direct argument of a directive rather than a nested
    /// element.
    fn format(
        &self,
        value: &Value,
        sink: &mut dyn OutputSink,
        format: Option<&str>,
        is_top_level: bool,
    ) -> io::Result<usize>;

    /// The theme styles are taken from.
    fn theme(&self) -> &ConsoleTheme;
}

/// Position of a value in the tree being rendered.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Nesting<'f> {
    pub format: Option<&'f str>,
    pub top_level: bool,
}

impl<'f> Nesting<'f> {
    pub(crate) fn root(format: Option<&'f str>, top_level: bool) -> Self {
        Self { format, top_level }
    }

    /// Children of a sequence, structure or dictionary take no format.
    pub(crate) fn nest(self) -> Self {
        Self {
            format: None,
            top_level: false,
        }
    }
}

/// Writes themed text and counts styled spans.
pub(crate) struct StyledWriter<'a> {
    sink: &'a mut dyn OutputSink,
    theme: &'a ConsoleTheme,
    spans: usize,
}

impl<'a> StyledWriter<'a> {
    pub(crate) fn new(sink: &'a mut dyn OutputSink, theme: &'a ConsoleTheme) -> Self {
        Self {
            sink,
            theme,
            spans: 0,
        }
    }

    pub(crate) fn role(&mut self, role: ThemeStyle, text: &str) -> io::Result<()> {
        let theme = self.theme;
        self.styled(text, theme.style(role))
    }

    pub(crate) fn styled(&mut self, text: &str, style: &Style) -> io::Result<()> {
        self.sink.write_styled(text, style)?;
        self.spans += 1;
        Ok(())
    }

    pub(crate) fn plain(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_plain(text)
    }

    pub(crate) fn punctuation(&mut self, text: &str) -> io::Result<()> {
        self.role(ThemeStyle::TertiaryText, text)
    }

    pub(crate) fn spans(&self) -> usize {
        self.spans
    }
}

/// A value formatter in either notation, bound to a theme and provider.
#[derive(Debug, Clone)]
pub enum ThemedValueFormatter {
    /// Human-readable notation.
    Display(DisplayValueFormatter),
    /// JSON notation for nested values.
    Json(JsonValueFormatter),
}

impl ThemedValueFormatter {
    /// Creates a formatter; `json` selects the notation.
    pub fn new(theme: Arc<ConsoleTheme>, provider: Arc<dyn FormatProvider>, json: bool) -> Self {
        let display = DisplayValueFormatter::new(theme, provider);
        if json {
            ThemedValueFormatter::Json(JsonValueFormatter::from_display(display))
        } else {
            ThemedValueFormatter::Display(display)
        }
    }

    /// The same notation and provider with a different theme.
    pub fn with_theme(&self, theme: Arc<ConsoleTheme>) -> Self {
        match self {
            ThemedValueFormatter::Display(d) => ThemedValueFormatter::Display(d.with_theme(theme)),
            ThemedValueFormatter::Json(j) => ThemedValueFormatter::Json(j.with_theme(theme)),
        }
    }

    /// Returns true for the JSON notation.
    pub fn is_json(&self) -> bool {
        matches!(self, ThemedValueFormatter::Json(_))
    }

    /// The Display formatter this one uses for scalars.
    pub fn display(&self) -> &DisplayValueFormatter {
        match self {
            ThemedValueFormatter::Display(d) => d,
            ThemedValueFormatter::Json(j) => j.display(),
        }
    }
}

impl ValueFormatter for ThemedValueFormatter {
    fn format(
        &self,
        value: &Value,
        sink: &mut dyn OutputSink,
        format: Option<&str>,
        is_top_level: bool,
    ) -> io::Result<usize> {
        match self {
            ThemedValueFormatter::Display(d) => d.format(value, sink, format, is_top_level),
            ThemedValueFormatter::Json(j) => j.format(value, sink, format, is_top_level),
        }
    }

    fn theme(&self) -> &ConsoleTheme {
        match self {
            ThemedValueFormatter::Display(d) => d.theme(),
            ThemedValueFormatter::Json(j) => j.theme(),
        }
    }
}
