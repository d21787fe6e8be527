//! # Standout Log - Themed Console Rendering for Structured Log Events
//!
//! `standout-log` turns structured log events into styled terminal text. An
//! *output template* describes the layout of one event; property values are
//! rendered with a *theme* that maps semantic roles (numbers, strings, level
//! names, punctuation) to `console` styles.
//!
//! ## Core Concepts
//!
//! - [`LogEvent`]: level, timestamp, message template, properties, exception
//! - [`Value`]: structured property values (scalars, sequences, structures, dictionaries)
//! - [`MessageTemplate`]: parsed `Hello, {Name}` text with property directives
//! - [`OutputTemplateRenderer`]: a compiled output template, rendered per event
//! - [`ConsoleTheme`]: role-to-style lookup, with presets and YAML loading
//! - [`ConsoleSink`]: level filtering, stdout/stderr routing and atomic writes
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use standout_log::{
//!     CaptureSink, ConsoleTheme, InvariantFormat, Level, LogEvent, MessageTemplate,
//!     OutputTemplateRenderer, Structure,
//! };
//!
//! let renderer = OutputTemplateRenderer::new(
//!     "[{Level:u3}] {Message} {Properties:j}",
//!     Arc::new(ConsoleTheme::literate()),
//!     Arc::new(InvariantFormat),
//! );
//!
//! let event = LogEvent::new(
//!     Level::Warning,
//!     MessageTemplate::parse("Order {Id} shipped late to {Customer}"),
//! )
//! .with_property("Id", 1042)
//! .with_property("Customer", Structure::tagged("Customer").with("Name", "Ann"))
//! .with_property("Region", "eu-west");
//!
//! let mut sink = CaptureSink::new();
//! renderer.render(&event, &mut sink).unwrap();
//! assert_eq!(
//!     sink.output(),
//!     r#"[WRN] Order 1042 shipped late to Customer {Name="Ann"} {"Region": "eu-west"}"#
//! );
//! ```
//!
//! ## Format Flags
//!
//! | Flag | On `{Message}` | On a property |
//! |------|----------------|---------------|
//! | `l` | strings render unquoted | this string renders unquoted |
//! | `j` | nested values render as JSON | this value renders as JSON |
//! | `u` / `w` | | upper / lower case (output template only) |
//!
//! Top-level scalars always follow the display rules, even under `j`:
//! `{Count:j}` renders `3`, not `"3"`.
//!
//! ## As a `log` Backend
//!
//! ```rust,no_run
//! use standout_log::{ConsoleSink, Level};
//!
//! ConsoleSink::builder()
//!     .minimum_level(Level::Debug)
//!     .standard_error_from_level(Level::Error)
//!     .build()
//!     .unwrap()
//!     .install()
//!     .unwrap();
//!
//! log::info!("listening on {}", 8080);
//! ```

pub mod config;
pub mod console_sink;
mod error;
pub mod event;
pub mod formatting;
pub mod level;
pub mod output;
pub mod prelude;
pub mod rendering;
pub mod sink;
pub mod template;
pub mod theme;
mod util;
pub mod value;

// Error types
pub use error::{Error, ThemeError};

// Events and values
pub use event::{EventException, LogEvent, Properties, SOURCE_CONTEXT};
pub use level::Level;
pub use value::{Property, Scalar, Structure, Value};

// Templates
pub use template::{
    Alignment, AlignmentDirection, Casing, Destructuring, FormatSpec, MessageTemplate,
    PropertyToken, Token,
};

// Themes
pub use theme::{ColorDef, ConsoleTheme, ThemeStyle, PRESET_NAMES};

// Sinks
pub use sink::{AnsiSink, CaptureSink, MeasuringSink, OutputSink, Span};

// Formatting
pub use formatting::{
    format_timestamp, round_trip, DisplayValueFormatter, FormatProvider, InvariantFormat,
    JsonValueFormatter, ThemedValueFormatter, ValueFormatter, DEFAULT_TIMESTAMP_FORMAT,
};

// Rendering
pub use output::{
    DefaultExceptionFormatter, ExceptionFormatter, OutputTemplateRenderer, OutputTokenRenderer,
    DEFAULT_OUTPUT_TEMPLATE, LINE_TERMINATOR,
};
pub use rendering::MessageTemplateRenderer;

// Console sink
pub use config::SinkConfig;
pub use console_sink::{ConsoleSink, ConsoleSinkBuilder, SyncRoot};

// Utility exports
pub use util::{display_width, quote_json_string, rgb_to_ansi256};
