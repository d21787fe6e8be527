use std::io;
use std::sync::Arc;

use super::datetime::round_trip;
use super::display::DisplayValueFormatter;
use super::numeric::{invariant_f32, invariant_float};
use super::{Nesting, StyledWriter, ValueFormatter};
use crate::sink::OutputSink;
use crate::theme::{ConsoleTheme, ThemeStyle};
use crate::util::quote_json_string;
use crate::value::{Scalar, Structure, Value};

/// JSON notation for nested values: `{"Name": "x", "$type": "Tag"}`.
///
/// A scalar passed directly to [`ValueFormatter::format`] is handed to the
/// Display formatter, so `{Count:j}` renders `3` and `{Name:j}` renders
/// `"x"` exactly as without the `j`.
#[derive(Debug, Clone)]
pub struct JsonValueFormatter {
    display: DisplayValueFormatter,
}

impl JsonValueFormatter {
    /// Creates a JSON formatter with the given theme and provider.
    pub fn new(theme: Arc<ConsoleTheme>, provider: Arc<dyn super::FormatProvider>) -> Self {
        Self::from_display(DisplayValueFormatter::new(theme, provider))
    }

    /// Wraps a Display formatter, sharing its theme and provider.
    pub fn from_display(display: DisplayValueFormatter) -> Self {
        Self { display }
    }

    /// The same provider with a different theme.
    pub fn with_theme(&self, theme: Arc<ConsoleTheme>) -> Self {
        Self {
            display: self.display.with_theme(theme),
        }
    }

    /// The formatter used for top-level scalars.
    pub fn display(&self) -> &DisplayValueFormatter {
        &self.display
    }

    fn visit(&self, out: &mut StyledWriter<'_>, value: &Value, at: Nesting<'_>) -> io::Result<()> {
        match value {
            Value::Scalar(scalar) if at.top_level => {
                self.display.write_scalar(out, scalar, at.format)
            }
            Value::Null => out.role(ThemeStyle::Null, "null"),
            Value::Scalar(scalar) => self.write_scalar(out, scalar),
            Value::Sequence(items) => {
                out.punctuation("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.punctuation(", ")?;
                    }
                    self.visit(out, item, at.nest())?;
                }
                out.punctuation("]")
            }
            Value::Structure(structure) => self.visit_structure(out, structure, at),
            Value::Dictionary(entries) => {
                out.punctuation("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.punctuation(", ")?;
                    }
                    let (role, text) = self.key_text(key);
                    out.role(role, &quote_json_string(&text))?;
                    out.punctuation(": ")?;
                    self.visit(out, value, at.nest())?;
                }
                out.punctuation("}")
            }
        }
    }

    fn visit_structure(
        &self,
        out: &mut StyledWriter<'_>,
        structure: &Structure,
        at: Nesting<'_>,
    ) -> io::Result<()> {
        out.punctuation("{")?;
        let mut delim = "";
        for property in structure.properties() {
            if !delim.is_empty() {
                out.punctuation(delim)?;
            }
            delim = ", ";
            out.role(ThemeStyle::Name, &quote_json_string(&property.name))?;
            out.punctuation(": ")?;
            self.visit(out, &property.value, at.nest())?;
        }
        if let Some(tag) = structure.type_tag() {
            if !delim.is_empty() {
                out.punctuation(delim)?;
            }
            out.role(ThemeStyle::Name, "\"$type\"")?;
            out.punctuation(": ")?;
            out.role(ThemeStyle::String, &quote_json_string(tag))?;
        }
        out.punctuation("}")
    }

    fn write_scalar(&self, out: &mut StyledWriter<'_>, scalar: &Scalar) -> io::Result<()> {
        match scalar {
            Scalar::String(s) => out.role(ThemeStyle::String, &quote_json_string(s)),
            Scalar::I64(v) => out.role(ThemeStyle::Number, &v.to_string()),
            Scalar::U64(v) => out.role(ThemeStyle::Number, &v.to_string()),
            Scalar::I128(v) => out.role(ThemeStyle::Number, &v.to_string()),
            Scalar::U128(v) => out.role(ThemeStyle::Number, &v.to_string()),
            Scalar::F64(v) => out.role(ThemeStyle::Number, &json_float(*v, invariant_float(*v))),
            Scalar::F32(v) => out.role(
                ThemeStyle::Number,
                &json_float(f64::from(*v), invariant_f32(*v)),
            ),
            Scalar::Bool(b) => out.role(ThemeStyle::Boolean, if *b { "true" } else { "false" }),
            Scalar::Char(c) => out.role(ThemeStyle::Scalar, &quote_json_string(&c.to_string())),
            Scalar::DateTime(dt) => out.role(ThemeStyle::Scalar, &format!("\"{}\"", round_trip(dt))),
            Scalar::Other(s) => out.role(ThemeStyle::Scalar, &quote_json_string(s)),
        }
    }

    /// Role and unquoted text of a dictionary key.
    fn key_text(&self, key: &Value) -> (ThemeStyle, String) {
        match key {
            Value::Null => (ThemeStyle::Null, "null".to_string()),
            Value::Scalar(Scalar::String(s)) => (ThemeStyle::String, s.clone()),
            Value::Scalar(scalar) => (
                ThemeStyle::Scalar,
                self.display.provider().format_scalar(scalar, None),
            ),
            other => (
                ThemeStyle::Scalar,
                self.display.format_to_string(other, None),
            ),
        }
    }
}

/// Non-finite floats are not valid JSON numbers and are written as strings.
fn json_float(value: f64, text: String) -> String {
    if value.is_finite() {
        text
    } else {
        quote_json_string(&text)
    }
}

impl ValueFormatter for JsonValueFormatter {
    fn format(
        &self,
        value: &Value,
        sink: &mut dyn OutputSink,
        format: Option<&str>,
        is_top_level: bool,
    ) -> io::Result<usize> {
        let theme = self.display.theme();
        let mut out = StyledWriter::new(sink, theme);
        self.visit(&mut out, value, Nesting::root(format, is_top_level))?;
        Ok(out.spans())
    }

    fn theme(&self) -> &ConsoleTheme {
        self.display.theme()
    }
}
