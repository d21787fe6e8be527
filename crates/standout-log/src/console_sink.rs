//! The console sink: level filtering, stdout/stderr routing and atomic
//! writes.
//!
//! ```rust
//! use std::io;
//! use standout_log::{ConsoleSink, Level, LogEvent, MessageTemplate};
//!
//! let sink = ConsoleSink::builder()
//!     .output_template("{Level:u3} {Message:lj}{NewLine}")
//!     .minimum_level(Level::Debug)
//!     .standard_error_from_level(Level::Error)
//!     .stdout(io::sink())
//!     .build()
//!     .unwrap();
//!
//! let event = LogEvent::new(Level::Information, MessageTemplate::parse("ready"));
//! sink.emit(&event).unwrap();
//! ```

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Error;
use crate::event::LogEvent;
use crate::formatting::{FormatProvider, InvariantFormat};
use crate::level::Level;
use crate::output::{
    DefaultExceptionFormatter, ExceptionFormatter, OutputTemplateRenderer,
    DEFAULT_OUTPUT_TEMPLATE,
};
use crate::sink::AnsiSink;
use crate::template::MessageTemplate;
use crate::theme::ConsoleTheme;

/// Lock held for the whole render of one event. Sinks that share a
/// `SyncRoot` never interleave their output.
pub type SyncRoot = Arc<Mutex<()>>;

type BoxedWriter = Box<dyn Write + Send>;

struct Target {
    writer: Mutex<BoxedWriter>,
    renderer: OutputTemplateRenderer,
    colors: bool,
    can_buffer: bool,
}

impl Target {
    fn emit(&self, event: &LogEvent) -> io::Result<()> {
        let mut writer = self.writer.lock();
        if self.can_buffer {
            let mut buffer = AnsiSink::new(Vec::new(), self.colors);
            self.renderer.render(event, &mut buffer)?;
            writer.write_all(&buffer.into_inner())?;
        } else {
            let mut sink = AnsiSink::new(&mut *writer, self.colors).with_buffering(false);
            self.renderer.render(event, &mut sink)?;
        }
        writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("theme", &self.renderer.theme().name())
            .field("colors", &self.colors)
            .field("can_buffer", &self.can_buffer)
            .finish_non_exhaustive()
    }
}

/// Renders events through an output template to stdout or stderr.
#[derive(Debug)]
pub struct ConsoleSink {
    out: Target,
    err: Target,
    minimum_level: Level,
    standard_error_from_level: Option<Level>,
    sync_root: SyncRoot,
}

impl ConsoleSink {
    /// Starts a builder with the default template and the literate theme.
    pub fn builder() -> ConsoleSinkBuilder {
        ConsoleSinkBuilder::new()
    }

    /// Renders `event` to its target unless it is below the minimum level.
    ///
    /// The sync root is held for the whole render and the write, and the
    /// writer is flushed before it is released.
    pub fn emit(&self, event: &LogEvent) -> io::Result<()> {
        if event.level() < self.minimum_level {
            return Ok(());
        }
        let target = self.select(event.level());
        let _guard = self.sync_root.lock();
        target.emit(event)
    }

    fn select(&self, level: Level) -> &Target {
        match self.standard_error_from_level {
            Some(threshold) if level >= threshold => &self.err,
            _ => &self.out,
        }
    }

    pub fn minimum_level(&self) -> Level {
        self.minimum_level
    }

    pub fn standard_error_from_level(&self) -> Option<Level> {
        self.standard_error_from_level
    }

    /// The renderer used for standard output.
    pub fn renderer(&self) -> &OutputTemplateRenderer {
        &self.out.renderer
    }

    /// The renderer used for standard error.
    pub fn error_renderer(&self) -> &OutputTemplateRenderer {
        &self.err.renderer
    }

    pub fn sync_root(&self) -> &SyncRoot {
        &self.sync_root
    }

    /// Registers this sink as the global `log` logger.
    pub fn install(self) -> Result<(), Error> {
        let filter = self.minimum_level.to_level_filter();
        log::set_boxed_logger(Box::new(self))
            .map_err(|e| Error::Configuration(format!("cannot install logger: {}", e)))?;
        log::set_max_level(filter);
        Ok(())
    }
}

impl log::Log for ConsoleSink {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Level::from(metadata.level()) >= self.minimum_level
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            // A logger has nowhere to report its own write failures.
            let _ = self.emit(&LogEvent::from_record(record));
        }
    }

    fn flush(&self) {
        let _guard = self.sync_root.lock();
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn is_term(&self) -> bool {
        match self {
            Stream::Stdout => console::Term::stdout().is_term(),
            Stream::Stderr => console::Term::stderr().is_term(),
        }
    }

    fn writer(&self) -> BoxedWriter {
        match self {
            Stream::Stdout => Box::new(io::stdout()),
            Stream::Stderr => Box::new(io::stderr()),
        }
    }
}

/// Programmatic configuration of a [`ConsoleSink`].
pub struct ConsoleSinkBuilder {
    output_template: Option<String>,
    theme: Option<ConsoleTheme>,
    provider: Arc<dyn FormatProvider>,
    exceptions: Arc<dyn ExceptionFormatter>,
    minimum_level: Level,
    standard_error_from_level: Option<Level>,
    apply_theme_to_redirected_output: bool,
    stdout: Option<BoxedWriter>,
    stderr: Option<BoxedWriter>,
    can_buffer: bool,
    sync_root: Option<SyncRoot>,
}

impl Default for ConsoleSinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSinkBuilder {
    pub fn new() -> Self {
        Self {
            output_template: Some(DEFAULT_OUTPUT_TEMPLATE.to_string()),
            theme: Some(ConsoleTheme::literate()),
            provider: Arc::new(InvariantFormat),
            exceptions: Arc::new(DefaultExceptionFormatter),
            minimum_level: Level::Verbose,
            standard_error_from_level: None,
            apply_theme_to_redirected_output: false,
            stdout: None,
            stderr: None,
            can_buffer: true,
            sync_root: None,
        }
    }

    pub fn output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    pub(crate) fn maybe_output_template(mut self, template: Option<String>) -> Self {
        self.output_template = template;
        self
    }

    pub fn theme(mut self, theme: ConsoleTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub(crate) fn maybe_theme(mut self, theme: Option<ConsoleTheme>) -> Self {
        self.theme = theme;
        self
    }

    pub fn format_provider(mut self, provider: Arc<dyn FormatProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn exception_formatter(mut self, formatter: Arc<dyn ExceptionFormatter>) -> Self {
        self.exceptions = formatter;
        self
    }

    /// Events below this level are dropped.
    pub fn minimum_level(mut self, level: Level) -> Self {
        self.minimum_level = level;
        self
    }

    /// Events at or above this level go to standard error.
    pub fn standard_error_from_level(mut self, level: impl Into<Option<Level>>) -> Self {
        self.standard_error_from_level = level.into();
        self
    }

    /// Keep the theme when standard output or error is not a terminal.
    pub fn apply_theme_to_redirected_output(mut self, apply: bool) -> Self {
        self.apply_theme_to_redirected_output = apply;
        self
    }

    /// Replaces standard output. Custom writers are never treated as
    /// redirected.
    pub fn stdout(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stdout = Some(Box::new(writer));
        self
    }

    /// Replaces standard error.
    pub fn stderr(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stderr = Some(Box::new(writer));
        self
    }

    /// With `false`, events are written span by span instead of being
    /// rendered into a buffer first.
    pub fn buffered(mut self, can_buffer: bool) -> Self {
        self.can_buffer = can_buffer;
        self
    }

    /// Shares a lock with other sinks writing to the same console.
    pub fn sync_root(mut self, root: SyncRoot) -> Self {
        self.sync_root = Some(root);
        self
    }

    pub fn build(self) -> Result<ConsoleSink, Error> {
        let template = self
            .output_template
            .ok_or_else(|| Error::Configuration("output template must not be null".into()))?;
        let theme = self
            .theme
            .ok_or_else(|| Error::Configuration("theme must not be null".into()))?;

        let renderer = OutputTemplateRenderer::compile(
            MessageTemplate::parse(&template),
            Arc::new(theme),
            self.provider,
            self.exceptions,
        );

        let redirect = !self.apply_theme_to_redirected_output;
        let out = target(
            self.stdout,
            Stream::Stdout,
            &renderer,
            redirect,
            self.can_buffer,
        );
        let err = target(
            self.stderr,
            Stream::Stderr,
            &renderer,
            redirect,
            self.can_buffer,
        );

        Ok(ConsoleSink {
            out,
            err,
            minimum_level: self.minimum_level,
            standard_error_from_level: self.standard_error_from_level,
            sync_root: self.sync_root.unwrap_or_default(),
        })
    }
}

fn target(
    custom: Option<BoxedWriter>,
    stream: Stream,
    renderer: &OutputTemplateRenderer,
    strip_when_redirected: bool,
    can_buffer: bool,
) -> Target {
    let (writer, redirected) = match custom {
        Some(writer) => (writer, false),
        None => (stream.writer(), !stream.is_term()),
    };
    let theme = if redirected && strip_when_redirected {
        Arc::new(ConsoleTheme::none())
    } else {
        Arc::clone(renderer.theme())
    };
    Target {
        writer: Mutex::new(writer),
        colors: !theme.is_empty(),
        renderer: renderer.rebind(theme),
        can_buffer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventException;
    use std::thread;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn event(level: Level, text: &str) -> LogEvent {
        LogEvent::new(level, MessageTemplate::parse(text))
    }

    fn plain_sink(out: &Shared, err: &Shared) -> ConsoleSinkBuilder {
        ConsoleSink::builder()
            .output_template("{Level:u3} {Message:l}{NewLine}")
            .theme(ConsoleTheme::none())
            .stdout(out.clone())
            .stderr(err.clone())
    }

    #[test]
    fn test_routing_by_level() {
        let (out, err) = (Shared::default(), Shared::default());
        let sink = plain_sink(&out, &err)
            .standard_error_from_level(Level::Warning)
            .build()
            .unwrap();
        sink.emit(&event(Level::Information, "a")).unwrap();
        sink.emit(&event(Level::Warning, "b")).unwrap();
        sink.emit(&event(Level::Fatal, "c")).unwrap();
        assert_eq!(out.text(), "INF a\n");
        assert_eq!(err.text(), "WRN b\nFTL c\n");
    }

    #[test]
    fn test_everything_to_stdout_without_threshold() {
        let (out, err) = (Shared::default(), Shared::default());
        let sink = plain_sink(&out, &err).build().unwrap();
        sink.emit(&event(Level::Fatal, "x")).unwrap();
        assert_eq!(out.text(), "FTL x\n");
        assert!(err.text().is_empty());
    }

    #[test]
    fn test_minimum_level() {
        let (out, err) = (Shared::default(), Shared::default());
        let sink = plain_sink(&out, &err)
            .minimum_level(Level::Information)
            .build()
            .unwrap();
        sink.emit(&event(Level::Debug, "hidden")).unwrap();
        sink.emit(&event(Level::Information, "shown")).unwrap();
        assert_eq!(out.text(), "INF shown\n");
    }

    #[test]
    fn test_buffered_and_unbuffered_match() {
        let styled = |buffered: bool| {
            let out = Shared::default();
            let sink = ConsoleSink::builder()
                .output_template("[{Level}] {Message}{NewLine}{Exception}")
                .theme(ConsoleTheme::code())
                .stdout(out.clone())
                .buffered(buffered)
                .build()
                .unwrap();
            let e = LogEvent::new(Level::Error, MessageTemplate::parse("{N} items"))
                .with_property("N", 3)
                .with_exception(EventException::new("bad"));
            sink.emit(&e).unwrap();
            out.text()
        };
        let buffered = styled(true);
        assert!(buffered.contains("\x1b["));
        assert_eq!(buffered, styled(false));
    }

    #[test]
    fn test_null_template_and_theme_are_rejected() {
        let err = ConsoleSink::builder()
            .maybe_output_template(None)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        let err = ConsoleSink::builder().maybe_theme(None).build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_custom_writer_keeps_theme() {
        let out = Shared::default();
        let sink = ConsoleSink::builder()
            .stdout(out.clone())
            .build()
            .unwrap();
        assert_eq!(sink.renderer().theme().name(), Some("literate"));
    }

    #[test]
    fn test_concurrent_events_do_not_interleave() {
        let out = Shared::default();
        let sink = Arc::new(
            ConsoleSink::builder()
                .output_template("{Message:l}{NewLine}")
                .theme(ConsoleTheme::none())
                .stdout(out.clone())
                .buffered(false)
                .build()
                .unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for i in 0..50 {
                        let e = LogEvent::new(
                            Level::Information,
                            MessageTemplate::parse("{T}-{I}-{T}"),
                        )
                        .with_property("T", t)
                        .with_property("I", i);
                        sink.emit(&e).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = out.text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 400);
        for line in lines {
            let parts: Vec<_> = line.split('-').collect();
            assert_eq!(parts.len(), 3, "interleaved line: {line}");
            assert_eq!(parts[0], parts[2]);
        }
    }

    #[test]
    fn test_shared_sync_root() {
        let root = SyncRoot::default();
        let out = Shared::default();
        let sink = plain_sink(&out, &Shared::default())
            .sync_root(Arc::clone(&root))
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(sink.sync_root(), &root));
    }

    #[test]
    fn test_log_enabled() {
        use log::Log;
        let (out, err) = (Shared::default(), Shared::default());
        let sink = plain_sink(&out, &err)
            .minimum_level(Level::Warning)
            .build()
            .unwrap();
        let info = log::Metadata::builder().level(log::Level::Info).build();
        let warn = log::Metadata::builder().level(log::Level::Warn).build();
        assert!(!sink.enabled(&info));
        assert!(sink.enabled(&warn));

        sink.log(
            &log::Record::builder()
                .args(format_args!("low {}", 1))
                .level(log::Level::Info)
                .build(),
        );
        sink.log(
            &log::Record::builder()
                .args(format_args!("high {}", 2))
                .level(log::Level::Error)
                .build(),
        );
        assert_eq!(out.text(), "ERR high 2\n");
    }
}
