use std::io;

use console::Style;

use super::OutputSink;
use crate::util::display_width;

/// A private sink that collects plain text so its width can be measured.
///
/// It reports the same capabilities as the sink it stands in for, so a
/// renderer takes the same path in both passes of an aligned render. Styles
/// are discarded: escape sequences never count toward the width.
#[derive(Debug, Default)]
pub struct MeasuringSink {
    buffer: String,
    colors: bool,
    can_buffer: bool,
}

impl MeasuringSink {
    /// A measuring sink with the capability profile of `target`.
    pub fn like(target: &dyn OutputSink) -> Self {
        Self {
            buffer: String::new(),
            colors: target.supports_color(),
            can_buffer: target.can_buffer(),
        }
    }

    /// Columns occupied by everything written so far.
    pub fn width(&self) -> usize {
        display_width(&self.buffer)
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.buffer
    }
}

impl OutputSink for MeasuringSink {
    fn write_styled(&mut self, text: &str, _style: &Style) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn can_buffer(&self) -> bool {
        self.can_buffer
    }

    fn supports_color(&self) -> bool {
        self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::AnsiSink;

    #[test]
    fn test_width_ignores_styles() {
        let target = AnsiSink::new(Vec::new(), true);
        let mut sink = MeasuringSink::like(&target);
        sink.write_styled("abc", &Style::new().red().bold()).unwrap();
        sink.write_plain("de").unwrap();
        assert_eq!(sink.width(), 5);
        assert_eq!(sink.output(), "abcde");
    }

    #[test]
    fn test_copies_capabilities() {
        let target = AnsiSink::new(Vec::new(), true).with_buffering(false);
        let sink = MeasuringSink::like(&target);
        assert!(sink.supports_color());
        assert!(!sink.can_buffer());
    }

    #[test]
    fn test_wide_characters() {
        let mut sink = MeasuringSink::default();
        sink.write_plain("日本").unwrap();
        assert_eq!(sink.width(), 4);
    }
}
