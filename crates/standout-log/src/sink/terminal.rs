use std::io::{self, Write};

use console::Style;

use super::OutputSink;

/// Writes styled text to any `io::Write`, as ANSI escapes when colours are on.
///
/// ```rust
/// use standout_log::{AnsiSink, OutputSink};
/// use console::Style;
///
/// let mut sink = AnsiSink::new(Vec::new(), false);
/// sink.write_styled("plain", &Style::new().red()).unwrap();
/// assert_eq!(sink.into_inner(), b"plain");
/// ```
#[derive(Debug)]
pub struct AnsiSink<W: Write> {
    writer: W,
    colors: bool,
    can_buffer: bool,
}

impl<W: Write> AnsiSink<W> {
    /// Wraps `writer`. With `colors` false, styles are dropped.
    pub fn new(writer: W, colors: bool) -> Self {
        Self {
            writer,
            colors,
            can_buffer: true,
        }
    }

    /// Sets the buffering capability reported to renderers.
    pub fn with_buffering(mut self, can_buffer: bool) -> Self {
        self.can_buffer = can_buffer;
        self
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// A reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwraps the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for AnsiSink<W> {
    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.colors {
            write!(
                self.writer,
                "{}",
                style.clone().force_styling(true).apply_to(text)
            )
        } else {
            self.writer.write_all(text.as_bytes())
        }
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn can_buffer(&self) -> bool {
        self.can_buffer
    }

    fn supports_color(&self) -> bool {
        self.colors
    }
}
