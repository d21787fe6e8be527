use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use super::{OutputTokenRenderer, LINE_TERMINATOR};
use crate::event::{EventException, LogEvent};
use crate::sink::OutputSink;
use crate::theme::{ConsoleTheme, ThemeStyle};

/// Writes the exception attached to an event.
///
/// Implementations are responsible for their own line breaks; the
/// `{Exception}` directive usually follows `{NewLine}`.
pub trait ExceptionFormatter: Debug + Send + Sync {
    fn format(
        &self,
        exception: &EventException,
        theme: &ConsoleTheme,
        sink: &mut dyn OutputSink,
    ) -> io::Result<()>;
}

/// Message, then one ` ---> cause` line per source, then the backtrace.
///
/// ```text
/// request failed
///  ---> connection reset
///    0: app::fetch
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExceptionFormatter;

impl ExceptionFormatter for DefaultExceptionFormatter {
    fn format(
        &self,
        exception: &EventException,
        theme: &ConsoleTheme,
        sink: &mut dyn OutputSink,
    ) -> io::Result<()> {
        sink.write_role(theme, ThemeStyle::Text, exception.message())?;
        sink.write_plain(LINE_TERMINATOR)?;
        for cause in exception.causes() {
            sink.write_role(theme, ThemeStyle::TertiaryText, " ---> ")?;
            sink.write_role(theme, ThemeStyle::Text, cause)?;
            sink.write_plain(LINE_TERMINATOR)?;
        }
        if let Some(backtrace) = exception.backtrace() {
            for line in backtrace.lines().filter(|l| !l.trim().is_empty()) {
                sink.write_role(theme, ThemeStyle::SecondaryText, line)?;
                sink.write_plain(LINE_TERMINATOR)?;
            }
        }
        Ok(())
    }
}

/// `{Exception}`: nothing unless the event carries one.
#[derive(Debug)]
pub(crate) struct ExceptionTokenRenderer {
    theme: Arc<ConsoleTheme>,
    formatter: Arc<dyn ExceptionFormatter>,
}

impl ExceptionTokenRenderer {
    pub(crate) fn new(theme: Arc<ConsoleTheme>, formatter: Arc<dyn ExceptionFormatter>) -> Self {
        Self { theme, formatter }
    }
}

impl OutputTokenRenderer for ExceptionTokenRenderer {
    fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        match event.exception() {
            Some(exception) => self.formatter.format(exception, &self.theme, sink),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::sink::CaptureSink;
    use crate::template::MessageTemplate;

    fn render(event: &LogEvent) -> CaptureSink {
        let renderer = ExceptionTokenRenderer::new(
            Arc::new(ConsoleTheme::literate()),
            Arc::new(DefaultExceptionFormatter),
        );
        let mut sink = CaptureSink::new();
        renderer.render(event, &mut sink).unwrap();
        sink
    }

    #[test]
    fn test_no_exception_writes_nothing() {
        let event = LogEvent::new(Level::Error, MessageTemplate::parse("boom"));
        assert!(render(&event).spans().is_empty());
    }

    #[test]
    fn test_chain_and_backtrace() {
        let exception = EventException::new("request failed")
            .with_cause("connection reset")
            .with_backtrace("   0: app::fetch\n\n   1: app::main\n");
        let event = LogEvent::new(Level::Error, MessageTemplate::parse("boom"))
            .with_exception(exception);
        let expected = [
            "request failed",
            " ---> connection reset",
            "   0: app::fetch",
            "   1: app::main",
            "",
        ]
        .join(LINE_TERMINATOR);
        assert_eq!(render(&event).output(), expected);
    }

    #[test]
    fn test_backtrace_style() {
        let theme = ConsoleTheme::literate();
        let event = LogEvent::new(Level::Error, MessageTemplate::parse("boom"))
            .with_exception(EventException::new("x").with_backtrace("frame"));
        let sink = render(&event);
        assert!(sink
            .find("frame")
            .unwrap()
            .is_styled_as(theme.style(ThemeStyle::SecondaryText)));
    }
}
