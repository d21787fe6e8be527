use std::io;
use std::sync::Arc;

use super::provider::FormatProvider;
use super::{Nesting, StyledWriter, ValueFormatter};
use crate::sink::{MeasuringSink, OutputSink};
use crate::template::value_format;
use crate::theme::{ConsoleTheme, ThemeStyle};
use crate::util::quote_json_string;
use crate::value::{Scalar, Structure, Value};

/// Human-readable notation: `Tag {Name="x", Count=3}`.
#[derive(Debug, Clone)]
pub struct DisplayValueFormatter {
    theme: Arc<ConsoleTheme>,
    provider: Arc<dyn FormatProvider>,
}

impl DisplayValueFormatter {
    /// Creates a formatter bound to `theme` and `provider`.
    pub fn new(theme: Arc<ConsoleTheme>, provider: Arc<dyn FormatProvider>) -> Self {
        Self { theme, provider }
    }

    /// The same provider with a different theme.
    pub fn with_theme(&self, theme: Arc<ConsoleTheme>) -> Self {
        Self {
            theme,
            provider: Arc::clone(&self.provider),
        }
    }

    /// The provider used for numbers, booleans and other scalars.
    pub fn provider(&self) -> &Arc<dyn FormatProvider> {
        &self.provider
    }

    /// Writes a single scalar and returns the number of styled spans.
    pub fn format_scalar(
        &self,
        scalar: &Scalar,
        sink: &mut dyn OutputSink,
        format: Option<&str>,
    ) -> io::Result<usize> {
        let mut out = StyledWriter::new(sink, &self.theme);
        self.write_scalar(&mut out, scalar, format)?;
        Ok(out.spans())
    }

    /// Renders `value` without styles and returns the text.
    pub fn format_to_string(&self, value: &Value, format: Option<&str>) -> String {
        let mut sink = MeasuringSink::default();
        // Writing to memory cannot fail.
        let _ = self.format(value, &mut sink, format, true);
        sink.output().to_string()
    }

    pub(crate) fn write_scalar(
        &self,
        out: &mut StyledWriter<'_>,
        scalar: &Scalar,
        format: Option<&str>,
    ) -> io::Result<()> {
        if let Scalar::String(s) = scalar {
            return if format == Some("l") {
                out.role(ThemeStyle::String, s)
            } else {
                out.role(ThemeStyle::String, &quote_json_string(s))
            };
        }

        let format = value_format(format);
        match scalar {
            Scalar::Char(c) => out.role(ThemeStyle::Scalar, &format!("'{}'", c)),
            Scalar::Bool(_) => out.role(
                ThemeStyle::Boolean,
                &self.provider.format_scalar(scalar, format),
            ),
            number if number.is_number() => out.role(
                ThemeStyle::Number,
                &self.provider.format_scalar(scalar, format),
            ),
            _ => out.role(
                ThemeStyle::Scalar,
                &self.provider.format_scalar(scalar, format),
            ),
        }
    }

    fn visit(&self, out: &mut StyledWriter<'_>, value: &Value, at: Nesting<'_>) -> io::Result<()> {
        match value {
            Value::Null => out.role(ThemeStyle::Null, "null"),
            Value::Scalar(scalar) => self.write_scalar(out, scalar, at.format),
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
                    out.punctuation("[")?;
                    self.visit(out, key, at.nest())?;
                    out.punctuation("]=")?;
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
        if let Some(tag) = structure.type_tag() {
            out.role(ThemeStyle::Name, tag)?;
            out.plain(" ")?;
        }
        out.punctuation("{")?;
        for (i, property) in structure.properties().iter().enumerate() {
            if i > 0 {
                out.punctuation(", ")?;
            }
            out.role(ThemeStyle::Name, &property.name)?;
            out.punctuation("=")?;
            self.visit(out, &property.value, at.nest())?;
        }
        out.punctuation("}")
    }
}

impl ValueFormatter for DisplayValueFormatter {
    fn format(
        &self,
        value: &Value,
        sink: &mut dyn OutputSink,
        format: Option<&str>,
        is_top_level: bool,
    ) -> io::Result<usize> {
        let mut out = StyledWriter::new(sink, &self.theme);
        self.visit(&mut out, value, Nesting::root(format, is_top_level))?;
        Ok(out.spans())
    }

    fn theme(&self) -> &ConsoleTheme {
        &self.theme
    }
}
