//! Output templates: the layout of one rendered event.
//!
//! An output template is parsed and compiled once into a list of token
//! renderers. Six names are reserved; every other name renders the event
//! property of that name.
//!
//! | Directive | Renders |
//! |-----------|---------|
//! | `{Timestamp:HH:mm:ss}` | Event time, see [`format_timestamp`](crate::format_timestamp) |
//! | `{Level:u3}` | Level moniker, see [`Level::moniker`](crate::Level::moniker) |
//! | `{Message:lj}` | The message template with its values |
//! | `{Properties:j}` | Properties no other directive mentions |
//! | `{Exception}` | The attached exception, if any |
//! | `{NewLine}` | A line break |
//!
//! ```rust
//! use std::sync::Arc;
//! use standout_log::{
//!     CaptureSink, ConsoleTheme, InvariantFormat, Level, LogEvent, MessageTemplate,
//!     OutputTemplateRenderer,
//! };
//!
//! let renderer = OutputTemplateRenderer::new(
//!     "[{Level:u3}] {Message}",
//!     Arc::new(ConsoleTheme::literate()),
//!     Arc::new(InvariantFormat),
//! );
//! let event = LogEvent::new(Level::Information, MessageTemplate::parse("Hello, {Name}"))
//!     .with_property("Name", "World");
//!
//! let mut sink = CaptureSink::new();
//! renderer.render(&event, &mut sink).unwrap();
//! assert_eq!(sink.output(), r#"[INF] Hello, "World""#);
//! ```

mod exception;
mod message;
mod renderers;

pub use exception::{DefaultExceptionFormatter, ExceptionFormatter};

use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use crate::event::LogEvent;
use crate::formatting::{DisplayValueFormatter, FormatProvider, ThemedValueFormatter};
use crate::rendering::MessageTemplateRenderer;
use crate::sink::{MeasuringSink, OutputSink};
use crate::template::{MessageTemplate, PropertyToken, Token};
use crate::theme::ConsoleTheme;

use exception::ExceptionTokenRenderer;
use message::{MessageTokenRenderer, PropertiesTokenRenderer};
use renderers::{
    EventPropertyTokenRenderer, LevelTokenRenderer, NewLineTokenRenderer, TextTokenRenderer,
    TimestampTokenRenderer,
};

/// The template used when none is configured.
pub const DEFAULT_OUTPUT_TEMPLATE: &str =
    "[{Timestamp:HH:mm:ss} {Level:u3}] {Message:lj}{NewLine}{Exception}";

/// Line terminator written by `{NewLine}` and the exception formatter.
#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";
/// Line terminator written by `{NewLine}` and the exception formatter.
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";

/// Reserved directive names.
pub mod names {
    pub const TIMESTAMP: &str = "Timestamp";
    pub const LEVEL: &str = "Level";
    pub const MESSAGE: &str = "Message";
    pub const PROPERTIES: &str = "Properties";
    pub const EXCEPTION: &str = "Exception";
    pub const NEW_LINE: &str = "NewLine";
}

/// Renders one compiled token of an output template.
pub trait OutputTokenRenderer: Debug + Send + Sync {
    fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()>;
}

/// A compiled output template bound to a theme and format provider.
///
/// Compilation happens once in the constructor. The renderer holds no
/// mutable state and can be shared between threads; callers that share a
/// sink serialize access to it themselves.
#[derive(Debug)]
pub struct OutputTemplateRenderer {
    template: MessageTemplate,
    theme: Arc<ConsoleTheme>,
    provider: Arc<dyn FormatProvider>,
    exceptions: Arc<dyn ExceptionFormatter>,
    renderers: Vec<Box<dyn OutputTokenRenderer>>,
}

impl OutputTemplateRenderer {
    /// Parses and compiles `template`.
    pub fn new(template: &str, theme: Arc<ConsoleTheme>, provider: Arc<dyn FormatProvider>) -> Self {
        Self::compile(
            MessageTemplate::parse(template),
            theme,
            provider,
            Arc::new(DefaultExceptionFormatter),
        )
    }

    /// Compiles an already parsed template.
    pub fn compile(
        template: MessageTemplate,
        theme: Arc<ConsoleTheme>,
        provider: Arc<dyn FormatProvider>,
        exceptions: Arc<dyn ExceptionFormatter>,
    ) -> Self {
        let display = DisplayValueFormatter::new(Arc::clone(&theme), Arc::clone(&provider));
        let renderers = template
            .tokens()
            .iter()
            .map(|token| match token {
                Token::Text(text) => {
                    Box::new(TextTokenRenderer::new(Arc::clone(&theme), text.as_str()))
                        as Box<dyn OutputTokenRenderer>
                }
                Token::Property(pt) => {
                    compile_property(pt, &template, &theme, &provider, &exceptions, &display)
                }
            })
            .collect();

        Self {
            template,
            theme,
            provider,
            exceptions,
            renderers,
        }
    }

    /// Recompiles the same template with a different exception formatter.
    pub fn with_exception_formatter(self, exceptions: Arc<dyn ExceptionFormatter>) -> Self {
        Self::compile(self.template, self.theme, self.provider, exceptions)
    }

    /// Recompiles the same template against another theme.
    pub fn rebind(&self, theme: Arc<ConsoleTheme>) -> Self {
        Self::compile(
            self.template.clone(),
            theme,
            Arc::clone(&self.provider),
            Arc::clone(&self.exceptions),
        )
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    pub fn theme(&self) -> &Arc<ConsoleTheme> {
        &self.theme
    }

    /// Runs every compiled renderer, in template order, against one sink.
    pub fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        for renderer in &self.renderers {
            renderer.render(event, sink)?;
        }
        Ok(())
    }

    /// Renders `event` without styles.
    pub fn render_to_string(&self, event: &LogEvent) -> String {
        let mut sink = MeasuringSink::default();
        // Writing to memory cannot fail.
        let _ = self.render(event, &mut sink);
        sink.output().to_string()
    }
}

fn compile_property(
    pt: &PropertyToken,
    template: &MessageTemplate,
    theme: &Arc<ConsoleTheme>,
    provider: &Arc<dyn FormatProvider>,
    exceptions: &Arc<dyn ExceptionFormatter>,
    display: &DisplayValueFormatter,
) -> Box<dyn OutputTokenRenderer> {
    let spec = pt.spec();
    match pt.name() {
        names::LEVEL => Box::new(LevelTokenRenderer::new(Arc::clone(theme), pt.clone())),
        names::NEW_LINE => Box::new(NewLineTokenRenderer::new(pt.alignment())),
        names::EXCEPTION => Box::new(ExceptionTokenRenderer::new(
            Arc::clone(theme),
            Arc::clone(exceptions),
        )),
        names::MESSAGE => Box::new(MessageTokenRenderer::new(
            MessageTemplateRenderer::new(display.clone(), spec.is_json(), spec.is_literal()),
            pt.alignment(),
        )),
        names::TIMESTAMP => Box::new(TimestampTokenRenderer::new(
            Arc::clone(theme),
            pt.clone(),
            Arc::clone(provider),
        )),
        names::PROPERTIES => Box::new(PropertiesTokenRenderer::new(
            ThemedValueFormatter::new(Arc::clone(theme), Arc::clone(provider), spec.is_json()),
            template,
            pt.alignment(),
        )),
        _ => Box::new(EventPropertyTokenRenderer::new(pt.clone(), display.clone())),
    }
}
