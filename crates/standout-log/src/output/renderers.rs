use std::io;
use std::sync::Arc;

use super::{OutputTokenRenderer, LINE_TERMINATOR};
use crate::event::LogEvent;
use crate::formatting::{DisplayValueFormatter, FormatProvider, ValueFormatter};
use crate::rendering::padding;
use crate::sink::OutputSink;
use crate::template::{Alignment, PropertyToken};
use crate::theme::{ConsoleTheme, ThemeStyle};
use crate::value::Scalar;

/// Literal text between directives.
#[derive(Debug)]
pub(crate) struct TextTokenRenderer {
    theme: Arc<ConsoleTheme>,
    text: String,
}

impl TextTokenRenderer {
    pub(crate) fn new(theme: Arc<ConsoleTheme>, text: impl Into<String>) -> Self {
        Self {
            theme,
            text: text.into(),
        }
    }
}

impl OutputTokenRenderer for TextTokenRenderer {
    fn render(&self, _event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        sink.write_role(&self.theme, ThemeStyle::Text, &self.text)
    }
}

/// `{NewLine}`
#[derive(Debug)]
pub(crate) struct NewLineTokenRenderer {
    alignment: Option<Alignment>,
}

impl NewLineTokenRenderer {
    pub(crate) fn new(alignment: Option<Alignment>) -> Self {
        Self { alignment }
    }
}

impl OutputTokenRenderer for NewLineTokenRenderer {
    fn render(&self, _event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        padding::render_aligned(sink, self.alignment, |s| s.write_plain(LINE_TERMINATOR))
    }
}

/// `{Level}`, styled per level.
#[derive(Debug)]
pub(crate) struct LevelTokenRenderer {
    theme: Arc<ConsoleTheme>,
    token: PropertyToken,
}

impl LevelTokenRenderer {
    pub(crate) fn new(theme: Arc<ConsoleTheme>, token: PropertyToken) -> Self {
        Self { theme, token }
    }
}

impl OutputTokenRenderer for LevelTokenRenderer {
    fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        let level = event.level();
        let moniker = level.moniker(self.token.format());
        let style = self.theme.style(level.theme_style());
        padding::apply(sink, &moniker, style, self.token.alignment())
    }
}

/// `{Timestamp}`
#[derive(Debug)]
pub(crate) struct TimestampTokenRenderer {
    theme: Arc<ConsoleTheme>,
    token: PropertyToken,
    provider: Arc<dyn FormatProvider>,
}

impl TimestampTokenRenderer {
    pub(crate) fn new(
        theme: Arc<ConsoleTheme>,
        token: PropertyToken,
        provider: Arc<dyn FormatProvider>,
    ) -> Self {
        Self {
            theme,
            token,
            provider,
        }
    }
}

impl OutputTokenRenderer for TimestampTokenRenderer {
    fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        let text = self
            .provider
            .format_timestamp(event.timestamp(), self.token.format());
        let style = self.theme.style(ThemeStyle::SecondaryText);
        padding::apply(sink, &text, style, self.token.alignment())
    }
}

/// Any other name: a property of the event, as plain secondary text.
///
/// A missing property renders as padding only, so columns stay aligned.
#[derive(Debug)]
pub(crate) struct EventPropertyTokenRenderer {
    token: PropertyToken,
    display: DisplayValueFormatter,
}

impl EventPropertyTokenRenderer {
    pub(crate) fn new(token: PropertyToken, display: DisplayValueFormatter) -> Self {
        Self { token, display }
    }
}

impl OutputTokenRenderer for EventPropertyTokenRenderer {
    fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        let Some(value) = event.property(self.token.name()) else {
            return padding::pad_empty(sink, self.token.alignment());
        };

        let text = match value.as_scalar() {
            Some(Scalar::String(s)) => self.token.spec().casing().apply(s),
            _ => self
                .display
                .format_to_string(value, self.token.spec().value_format()),
        };
        let style = self.display.theme().style(ThemeStyle::SecondaryText);
        padding::apply(sink, &text, style, self.token.alignment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::InvariantFormat;
    use crate::level::Level;
    use crate::sink::CaptureSink;
    use crate::template::MessageTemplate;
    use chrono::{FixedOffset, TimeZone};

    fn theme() -> Arc<ConsoleTheme> {
        Arc::new(ConsoleTheme::literate())
    }

    fn token(directive: &str) -> PropertyToken {
        MessageTemplate::parse(directive)
            .properties()
            .next()
            .cloned()
            .unwrap()
    }

    fn event() -> LogEvent {
        let ts = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2023, 6, 1, 9, 5, 30)
            .unwrap();
        LogEvent::new(Level::Warning, MessageTemplate::parse("x"))
            .with_timestamp(ts)
            .with_property("User", "ada")
            .with_property("Attempts", 3)
            .with_property("Tags", vec!["a", "b"])
    }

    fn run(renderer: &dyn OutputTokenRenderer) -> CaptureSink {
        let mut sink = CaptureSink::new();
        renderer.render(&event(), &mut sink).unwrap();
        sink
    }

    fn display() -> DisplayValueFormatter {
        DisplayValueFormatter::new(theme(), Arc::new(InvariantFormat))
    }

    #[test]
    fn test_text() {
        let sink = run(&TextTokenRenderer::new(theme(), "] "));
        assert_eq!(sink.output(), "] ");
        assert!(sink.spans()[0].is_styled_as(theme().style(ThemeStyle::Text)));
    }

    #[test]
    fn test_new_line() {
        assert_eq!(run(&NewLineTokenRenderer::new(None)).output(), LINE_TERMINATOR);
    }

    #[test]
    fn test_level_moniker_and_style() {
        let sink = run(&LevelTokenRenderer::new(theme(), token("{Level:u3}")));
        assert_eq!(sink.output(), "WRN");
        assert!(sink.spans()[0].is_styled_as(theme().style(ThemeStyle::LevelWarning)));

        let sink = run(&LevelTokenRenderer::new(theme(), token("{Level,-9}")));
        assert_eq!(sink.output(), "Warning  ");
    }

    #[test]
    fn test_timestamp() {
        let sink = run(&TimestampTokenRenderer::new(
            theme(),
            token("{Timestamp:HH:mm:ss}"),
            Arc::new(InvariantFormat),
        ));
        assert_eq!(sink.output(), "09:05:30");
        assert!(sink.spans()[0].is_styled_as(theme().style(ThemeStyle::SecondaryText)));

        let sink = run(&TimestampTokenRenderer::new(
            theme(),
            token("{Timestamp}"),
            Arc::new(InvariantFormat),
        ));
        assert_eq!(sink.output(), "2023-06-01 09:05:30.000 +01:00");
    }

    #[test]
    fn test_event_property_string_is_unquoted_with_casing() {
        let sink = run(&EventPropertyTokenRenderer::new(token("{User}"), display()));
        assert_eq!(sink.output(), "ada");
        let sink = run(&EventPropertyTokenRenderer::new(token("{User:u}"), display()));
        assert_eq!(sink.output(), "ADA");
        assert!(sink.spans()[0].is_styled_as(theme().style(ThemeStyle::SecondaryText)));
    }

    #[test]
    fn test_event_property_other_values() {
        let sink = run(&EventPropertyTokenRenderer::new(token("{Attempts:D2}"), display()));
        assert_eq!(sink.output(), "03");
        let sink = run(&EventPropertyTokenRenderer::new(token("{Tags}"), display()));
        assert_eq!(sink.output(), r#"["a", "b"]"#);
    }

    #[test]
    fn test_event_property_date_under_flags() {
        let e = event().with_property("Seen", *event().timestamp());
        let render = |directive: &str| {
            let mut sink = CaptureSink::new();
            EventPropertyTokenRenderer::new(token(directive), display())
                .render(&e, &mut sink)
                .unwrap();
            sink.output()
        };
        assert_eq!(render("{Seen:j}"), "2023-06-01 09:05:30.000 +01:00");
        assert_eq!(render("{Seen:HH:mm}"), "09:05");
    }

    #[test]
    fn test_missing_event_property_keeps_column() {
        let sink = run(&EventPropertyTokenRenderer::new(token("{Nope,6}"), display()));
        assert_eq!(sink.output(), "      ");
        let sink = run(&EventPropertyTokenRenderer::new(token("{Nope}"), display()));
        assert_eq!(sink.output(), "");
    }
}
