//! The log event handed to the renderer.
//!
//! ```rust
//! use standout_log::{Level, LogEvent, MessageTemplate};
//!
//! let event = LogEvent::new(Level::Information, MessageTemplate::parse("Hello, {Name}"))
//!     .with_property("Name", "World");
//! assert_eq!(event.properties().len(), 1);
//! assert!(event.property("Name").is_some());
//! ```

use std::error::Error as StdError;
use std::fmt;

use chrono::{DateTime, FixedOffset, Local};

use crate::level::Level;
use crate::template::MessageTemplate;
use crate::value::{Property, Value};

/// Name of the property that carries a `log` record's target.
pub const SOURCE_CONTEXT: &str = "SourceContext";

/// Named property values in insertion order. Names are unique.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    entries: Vec<Property>,
}

impl Properties {
    /// An empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property, replacing the value of an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Property { name, value }),
        }
    }

    /// Looks a property up by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (name, value) in iter {
            properties.insert(name, value);
        }
        properties
    }
}

/// An error attached to an event, captured as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventException {
    message: String,
    causes: Vec<String>,
    backtrace: Option<String>,
}

impl EventException {
    /// An exception with a message and no causes.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
            backtrace: None,
        }
    }

    /// Captures an error and its `source()` chain.
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            causes,
            backtrace: None,
        }
    }

    /// Adds a cause below the existing ones.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Attaches a captured backtrace.
    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Cause messages, outermost first.
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    pub fn backtrace(&self) -> Option<&str> {
        self.backtrace.as_deref()
    }
}

impl fmt::Display for EventException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for cause in &self.causes {
            write!(f, " ---> {}", cause)?;
        }
        Ok(())
    }
}

/// One structured log event.
#[derive(Clone, Debug)]
pub struct LogEvent {
    timestamp: DateTime<FixedOffset>,
    level: Level,
    message_template: MessageTemplate,
    properties: Properties,
    exception: Option<EventException>,
}

impl LogEvent {
    /// An event stamped with the current local time.
    pub fn new(level: Level, message_template: MessageTemplate) -> Self {
        Self {
            timestamp: Local::now().fixed_offset(),
            level,
            message_template,
            properties: Properties::new(),
            exception: None,
        }
    }

    /// Converts a `log` record. The formatted arguments become a message
    /// without directives and the target becomes [`SOURCE_CONTEXT`].
    pub fn from_record(record: &log::Record<'_>) -> Self {
        let message = MessageTemplate::literal(record.args().to_string());
        Self::new(record.level().into(), message)
            .with_property(SOURCE_CONTEXT, record.target())
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Adds or replaces a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name, value);
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_exception(mut self, exception: EventException) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message_template(&self) -> &MessageTemplate {
        &self.message_template
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Shorthand for `properties().get(name)`.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn exception(&self) -> Option<&EventException> {
        self.exception.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut props = Properties::new();
        props.insert("A", 1);
        props.insert("B", 2);
        props.insert("A", 3);
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(props.get("A"), Some(&Value::from(3)));
    }

    #[test]
    fn test_from_iter() {
        let props: Properties = vec![("X", "x"), ("Y", "y")].into_iter().collect();
        assert_eq!(props.len(), 2);
        assert!(props.contains("Y"));
        assert!(!props.contains("Z"));
    }

    #[derive(Debug)]
    struct Outer(io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_exception_from_error_chain() {
        let error = Outer(io::Error::other("connection reset"));
        let exception = EventException::from_error(&error);
        assert_eq!(exception.message(), "request failed");
        assert_eq!(exception.causes(), ["connection reset"]);
        assert_eq!(exception.to_string(), "request failed ---> connection reset");
    }

    #[test]
    fn test_from_record() {
        let event = LogEvent::from_record(
            &log::Record::builder()
                .args(format_args!("disk {} full", "/dev/sda"))
                .level(log::Level::Warn)
                .target("storage")
                .build(),
        );
        assert_eq!(event.level(), Level::Warning);
        assert_eq!(event.message_template().text(), "disk /dev/sda full");
        assert_eq!(event.message_template().tokens().len(), 1);
        assert_eq!(event.property(SOURCE_CONTEXT), Some(&Value::from("storage")));
    }

    #[test]
    fn test_literal_record_text_keeps_braces() {
        let event = LogEvent::from_record(
            &log::Record::builder()
                .args(format_args!("{{Name}}"))
                .level(log::Level::Info)
                .build(),
        );
        assert_eq!(event.message_template().text(), "{Name}");
        assert_eq!(event.message_template().properties().count(), 0);
    }
}
