//! Integration tests for standout-log.
//!
//! These tests render whole events through the public API: output templates,
//! both value notations, themes loaded from YAML, and the console sink.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{FixedOffset, TimeZone};
use standout_log::{
    display_width, AnsiSink, CaptureSink, ConsoleSink, ConsoleTheme, EventException, InvariantFormat, Level,
    LogEvent, MessageTemplate, OutputTemplateRenderer, SinkConfig, Structure, ThemeStyle, Value,
};

fn renderer(template: &str) -> OutputTemplateRenderer {
    OutputTemplateRenderer::new(
        template,
        Arc::new(ConsoleTheme::literate()),
        Arc::new(InvariantFormat),
    )
}

fn render(template: &str, event: &LogEvent) -> CaptureSink {
    let mut sink = CaptureSink::new();
    renderer(template).render(event, &mut sink).unwrap();
    sink
}

fn hello() -> LogEvent {
    LogEvent::new(Level::Information, MessageTemplate::parse("Hello, {Name}"))
        .with_property("Name", "World")
}

// ============================================================================
// Rendering scenarios
// ============================================================================

#[test]
fn level_and_quoted_message() {
    let sink = render("[{Level:u3}] {Message}", &hello());
    assert_eq!(sink.output(), r#"[INF] Hello, "World""#);

    let theme = ConsoleTheme::literate();
    let level = sink.find("INF").unwrap();
    assert!(level.is_styled_as(theme.style(ThemeStyle::LevelInformation)));
    let name = sink.find("\"World\"").unwrap();
    assert!(name.is_styled_as(theme.style(ThemeStyle::String)));
}

#[test]
fn right_aligned_message_property() {
    let event = LogEvent::new(Level::Information, MessageTemplate::parse("{Name,10}"))
        .with_property("Name", "Hi");
    let output = render("{Message}", &event).output();
    assert_eq!(output, r#"      "Hi""#);
    assert_eq!(display_width(&output), 10);
}

#[test]
fn alignment_after_format() {
    let event = LogEvent::new(Level::Information, MessageTemplate::parse("{Name:l,-6}|"))
        .with_property("Name", "Hi");
    assert_eq!(render("{Message}", &event).output(), "Hi    |");
}

#[test]
fn json_structure_with_nan() {
    let event = LogEvent::new(Level::Information, MessageTemplate::parse("{Data:j}"))
        .with_property("Data", Structure::new().with("A", 1).with("B", f64::NAN));
    assert_eq!(render("{Message}", &event).output(), r#"{"A": 1, "B": "NaN"}"#);
}

#[test]
fn json_mode_top_level_scalars_use_display_rules() {
    let event = LogEvent::new(
        Level::Information,
        MessageTemplate::parse("{Ratio} {Letter} {List}"),
    )
    .with_property("Ratio", f64::NAN)
    .with_property("Letter", 'z')
    .with_property("List", vec![Value::from('z'), Value::from(f64::NAN)]);
    assert_eq!(
        render("{Message:j}", &event).output(),
        r#"NaN 'z' ["z", "NaN"]"#
    );
}

#[test]
fn missing_message_property_is_marked_invalid() {
    let event = LogEvent::new(Level::Information, MessageTemplate::parse("Value: {Missing}"));
    let sink = render("{Message}", &event);
    assert_eq!(sink.output(), "Value: {Missing}");
    let marker = sink.find("{Missing}").unwrap();
    assert!(marker.is_styled_as(ConsoleTheme::literate().style(ThemeStyle::Invalid)));
}

#[test]
fn remaining_properties() {
    let event = hello()
        .with_property("Thread", 4)
        .with_property("Request", Structure::tagged("Req").with("Path", "/"));
    assert_eq!(
        render("{Message:l} {Properties}", &event).output(),
        r#"Hello, World {Thread=4, Request=Req {Path="/"}}"#
    );
    assert_eq!(
        render("{Message:l} {Thread} {Properties:j}", &event).output(),
        r#"Hello, World 4 {"Request": {"Path": "/", "$type": "Req"}}"#
    );
}

#[test]
fn full_line_with_exception() {
    let ts = FixedOffset::east_opt(-4 * 3600)
        .unwrap()
        .with_ymd_and_hms(2022, 11, 3, 17, 45, 0)
        .unwrap();
    let event = LogEvent::new(Level::Error, MessageTemplate::parse("Upload of {File} failed"))
        .with_timestamp(ts)
        .with_property("File", "a.txt")
        .with_exception(EventException::new("quota exceeded").with_cause("HTTP 507"));
    let output = renderer(
        "{Timestamp:yyyy-MM-dd HH:mm:ss zzz} [{Level,-11}] {Message:lj}{NewLine}{Exception}",
    )
    .render_to_string(&event);
    let nl = standout_log::LINE_TERMINATOR;
    assert_eq!(
        output,
        format!(
            "2022-11-03 17:45:00 -04:00 [Error      ] Upload of a.txt failed{nl}quota exceeded{nl} ---> HTTP 507{nl}"
        )
    );
}

fn ansi_render(template: &str, theme: ConsoleTheme, event: &LogEvent) -> String {
    let renderer = OutputTemplateRenderer::new(template, Arc::new(theme), Arc::new(InvariantFormat));
    let mut sink = AnsiSink::new(Vec::new(), true);
    renderer.render(event, &mut sink).unwrap();
    String::from_utf8(sink.into_inner()).unwrap()
}

#[test]
fn theme_never_changes_text() {
    let event = hello()
        .with_property("Count", 12)
        .with_property("Tags", vec!["x", "y"])
        .with_property("Req", Structure::tagged("Req").with("Ok", true));
    let template = "[{Level:t4}] {Message} {Properties:j} {Properties}";

    let plain = ansi_render(template, ConsoleTheme::none(), &event);
    assert!(!plain.contains('\x1b'));
    for name in standout_log::PRESET_NAMES {
        let theme = ConsoleTheme::preset(name).unwrap();
        let styled = ansi_render(template, theme, &event);
        if name != "none" {
            assert!(styled.contains("\x1b["), "theme {name} wrote no styles");
        }
        assert_eq!(console::strip_ansi_codes(&styled), plain, "theme {name}");
    }
}

// ============================================================================
// Themes from YAML
// ============================================================================

#[test]
fn yaml_theme_reaches_the_output() {
    let theme = ConsoleTheme::from_yaml(
        r##"
number: "bright_magenta bold"
tertiary_text: "#808080"
"##,
    )
    .unwrap();
    let renderer = OutputTemplateRenderer::new(
        "{Message}",
        Arc::new(theme.clone()),
        Arc::new(InvariantFormat),
    );
    let event = LogEvent::new(Level::Debug, MessageTemplate::parse("{N}")).with_property("N", 5);
    let mut sink = CaptureSink::new();
    renderer.render(&event, &mut sink).unwrap();
    assert!(sink.find("5").unwrap().is_styled_as(theme.style(ThemeStyle::Number)));
    assert!(sink.styled_output().contains("\x1b["));
}

// ============================================================================
// Console sink
// ============================================================================

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_from_yaml_config_routes_errors() {
    let config = SinkConfig::from_yaml(
        r#"
output_template: "{Level:u3}: {Message:l}{NewLine}"
theme: none
minimum_level: Information
standard_error_from_level: Error
"#,
    )
    .unwrap();
    let (out, err) = (Buffer::default(), Buffer::default());
    let sink = config
        .builder()
        .unwrap()
        .stdout(out.clone())
        .stderr(err.clone())
        .build()
        .unwrap();

    let nl = standout_log::LINE_TERMINATOR;
    sink.emit(&LogEvent::new(Level::Debug, MessageTemplate::parse("skip")))
        .unwrap();
    sink.emit(&hello()).unwrap();
    sink.emit(&LogEvent::new(Level::Fatal, MessageTemplate::parse("down")))
        .unwrap();

    assert_eq!(out.text(), format!("INF: Hello, World{nl}"));
    assert_eq!(err.text(), format!("FTL: down{nl}"));
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_propagate() {
    for buffered in [true, false] {
        let sink = ConsoleSink::builder()
            .stdout(FailingWriter)
            .buffered(buffered)
            .build()
            .unwrap();
        let err = sink.emit(&hello()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}

#[test]
fn sink_is_usable_after_a_failed_write() {
    let sink = ConsoleSink::builder().stdout(FailingWriter).build().unwrap();
    assert!(sink.emit(&hello()).is_err());
    assert!(sink.emit(&hello()).is_err());
}
