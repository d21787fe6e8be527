use std::io;
use std::sync::Arc;

use super::padding::render_aligned;
use crate::event::Properties;
use crate::formatting::{DisplayValueFormatter, JsonValueFormatter, ValueFormatter};
use crate::sink::OutputSink;
use crate::template::{MessageTemplate, PropertyToken, Token};
use crate::theme::{ConsoleTheme, ThemeStyle};
use crate::value::{Scalar, Value};

/// Renders an event's own message template with its property values.
///
/// The `literal` and `json` flags come from the directive that embeds the
/// message (`{Message:lj}`); a property directive inside the message can
/// set either flag for itself (`{Payload:j}`).
#[derive(Debug, Clone)]
pub struct MessageTemplateRenderer {
    display: DisplayValueFormatter,
    json: JsonValueFormatter,
    json_mode: bool,
    literal: bool,
}

impl MessageTemplateRenderer {
    pub fn new(display: DisplayValueFormatter, json_mode: bool, literal: bool) -> Self {
        Self {
            json: JsonValueFormatter::from_display(display.clone()),
            display,
            json_mode,
            literal,
        }
    }

    /// The same flags and provider with a different theme.
    pub fn with_theme(&self, theme: Arc<ConsoleTheme>) -> Self {
        Self::new(self.display.with_theme(theme), self.json_mode, self.literal)
    }

    pub fn is_json(&self) -> bool {
        self.json_mode
    }

    pub fn is_literal(&self) -> bool {
        self.literal
    }

    pub fn render(
        &self,
        template: &MessageTemplate,
        properties: &Properties,
        sink: &mut dyn OutputSink,
    ) -> io::Result<()> {
        let theme = self.display.theme();
        for token in template.tokens() {
            match token {
                Token::Text(text) => sink.write_role(theme, ThemeStyle::Text, text)?,
                Token::Property(pt) => match properties.get(pt.name()) {
                    Some(value) => {
                        render_aligned(sink, pt.alignment(), |s| self.render_value(pt, value, s))?
                    }
                    None => sink.write_role(theme, ThemeStyle::Invalid, pt.raw())?,
                },
            }
        }
        Ok(())
    }

    fn render_value(
        &self,
        pt: &PropertyToken,
        value: &Value,
        sink: &mut dyn OutputSink,
    ) -> io::Result<()> {
        let spec = pt.spec();
        let flags = spec.is_flags_only();
        let literal = self.literal || (flags && spec.is_literal());
        if let (true, Some(Scalar::String(text))) = (literal, value.as_scalar()) {
            return sink.write_role(self.display.theme(), ThemeStyle::String, text);
        }

        let format = spec.value_format();
        if self.json_mode || (flags && spec.is_json()) {
            self.json.format(value, sink, format, true)?;
        } else {
            self.display.format(value, sink, format, true)?;
        }
        Ok(())
    }
}
