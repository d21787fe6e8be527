use std::io;

use super::OutputTokenRenderer;
use crate::event::LogEvent;
use crate::formatting::{ThemedValueFormatter, ValueFormatter};
use crate::rendering::{padding, MessageTemplateRenderer};
use crate::sink::OutputSink;
use crate::template::{Alignment, MessageTemplate};
use crate::value::{Property, Structure, Value};

/// `{Message}`: the event's message template with its values.
#[derive(Debug)]
pub(crate) struct MessageTokenRenderer {
    renderer: MessageTemplateRenderer,
    alignment: Option<Alignment>,
}

impl MessageTokenRenderer {
    pub(crate) fn new(renderer: MessageTemplateRenderer, alignment: Option<Alignment>) -> Self {
        Self {
            renderer,
            alignment,
        }
    }
}

impl OutputTokenRenderer for MessageTokenRenderer {
    fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        padding::render_aligned(sink, self.alignment, |s| {
            self.renderer
                .render(event.message_template(), event.properties(), s)
        })
    }
}

/// `{Properties}`: every property that no directive names, as one
/// untagged structure.
#[derive(Debug)]
pub(crate) struct PropertiesTokenRenderer {
    formatter: ThemedValueFormatter,
    output_names: Vec<String>,
    alignment: Option<Alignment>,
}

impl PropertiesTokenRenderer {
    pub(crate) fn new(
        formatter: ThemedValueFormatter,
        output_template: &MessageTemplate,
        alignment: Option<Alignment>,
    ) -> Self {
        Self {
            formatter,
            output_names: output_template
                .property_names()
                .map(str::to_string)
                .collect(),
            alignment,
        }
    }

    fn remaining(&self, event: &LogEvent) -> Value {
        let message = event.message_template();
        let included = event
            .properties()
            .iter()
            .filter(|p| !message.contains_property(&p.name))
            .filter(|p| !self.output_names.iter().any(|n| *n == p.name))
            .cloned()
            .collect::<Vec<Property>>();
        Value::Structure(Structure::from_properties(None, included))
    }
}

impl OutputTokenRenderer for PropertiesTokenRenderer {
    fn render(&self, event: &LogEvent, sink: &mut dyn OutputSink) -> io::Result<()> {
        let value = self.remaining(event);
        padding::render_aligned(sink, self.alignment, |s| {
            self.formatter.format(&value, s, None, true).map(|_| ())
        })
    }
}
