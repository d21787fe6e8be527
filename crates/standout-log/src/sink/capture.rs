use std::io;

use console::Style;

use super::OutputSink;

/// One write recorded by a [`CaptureSink`].
#[derive(Debug, Clone)]
pub struct Span {
    /// The text written.
    pub text: String,
    /// The style it was written with; `None` for plain writes.
    pub style: Option<Style>,
}

impl Span {
    /// Returns true if this span was written with a style that renders the
    /// same escapes as `style`.
    pub fn is_styled_as(&self, style: &Style) -> bool {
        match &self.style {
            Some(own) => render(own) == render(style),
            None => render(style) == "_",
        }
    }
}

fn render(style: &Style) -> String {
    style.clone().force_styling(true).apply_to("_").to_string()
}

/// Records every write with its style.
///
/// ```rust
/// use standout_log::{CaptureSink, OutputSink};
/// use console::Style;
///
/// let mut sink = CaptureSink::new();
/// sink.write_styled("a", &Style::new().red()).unwrap();
/// sink.write_plain("b").unwrap();
/// assert_eq!(sink.output(), "ab");
/// assert_eq!(sink.spans().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CaptureSink {
    spans: Vec<Span>,
    colors: bool,
    can_buffer: bool,
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSink {
    /// A capture sink that reports colour support and buffering.
    pub fn new() -> Self {
        Self {
            spans: Vec::new(),
            colors: true,
            can_buffer: true,
        }
    }

    /// Sets the buffering capability reported to renderers.
    pub fn with_buffering(mut self, can_buffer: bool) -> Self {
        self.can_buffer = can_buffer;
        self
    }

    /// All recorded text, without styling.
    pub fn output(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// All recorded text with ANSI escapes for styled spans.
    pub fn styled_output(&self) -> String {
        self.spans
            .iter()
            .map(|span| match &span.style {
                Some(style) => style
                    .clone()
                    .force_styling(true)
                    .apply_to(&span.text)
                    .to_string(),
                None => span.text.clone(),
            })
            .collect()
    }

    /// Recorded spans in write order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The first span whose text equals `text`.
    pub fn find(&self, text: &str) -> Option<&Span> {
        self.spans.iter().find(|span| span.text == text)
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.spans.clear();
    }
}

impl OutputSink for CaptureSink {
    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()> {
        self.spans.push(Span {
            text: text.to_string(),
            style: Some(style.clone()),
        });
        Ok(())
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.spans.push(Span {
            text: text.to_string(),
            style: None,
        });
        Ok(())
    }

    fn can_buffer(&self) -> bool {
        self.can_buffer
    }

    fn supports_color(&self) -> bool {
        self.colors
    }
}
