//! Styled output targets.
//!
//! Every renderer writes through [`OutputSink`]: styled text, plain text, and
//! two capability flags. Three implementations ship with the crate:
//!
//! | Sink | Purpose |
//! |------|---------|
//! | [`AnsiSink`] | Any `io::Write`, with ANSI escapes when colours are on |
//! | [`MeasuringSink`] | Collects plain text to learn the rendered width |
//! | [`CaptureSink`] | Records every span and its style, for tests |

mod capture;
mod measuring;
mod terminal;

pub use capture::{CaptureSink, Span};
pub use measuring::MeasuringSink;
pub use terminal::AnsiSink;

use std::io;

use console::Style;

use crate::theme::{ConsoleTheme, ThemeStyle};

/// A target for styled text.
pub trait OutputSink {
    /// Writes `text` with `style`.
    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()>;

    /// Writes `text` without any style.
    fn write_plain(&mut self, text: &str) -> io::Result<()>;

    /// Whether output may be pre-rendered into a buffer and written in one
    /// piece. Sinks whose colour switching is stateful return false and are
    /// written incrementally.
    fn can_buffer(&self) -> bool {
        true
    }

    /// Whether styles produce visible escapes on this sink.
    fn supports_color(&self) -> bool;

    /// Writes `text` with the theme's style for `role`.
    fn write_role(&mut self, theme: &ConsoleTheme, role: ThemeStyle, text: &str) -> io::Result<()> {
        self.write_styled(text, theme.style(role))
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()> {
        (**self).write_styled(text, style)
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        (**self).write_plain(text)
    }

    fn can_buffer(&self) -> bool {
        (**self).can_buffer()
    }

    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }
}
