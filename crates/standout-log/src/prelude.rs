//! Common imports for emitting and rendering events.
//!
//! ```rust
//! use standout_log::prelude::*;
//!
//! let event = LogEvent::new(Level::Debug, MessageTemplate::parse("cache {Hits}"))
//!     .with_property("Hits", 12);
//! assert_eq!(event.level(), Level::Debug);
//! ```

pub use crate::{
    ConsoleSink, ConsoleTheme, EventException, Level, LogEvent, MessageTemplate, OutputSink,
    OutputTemplateRenderer, SinkConfig, Structure, ThemeStyle, Value, ValueFormatter,
};

// Re-export console::Style for custom themes
pub use console::Style;
