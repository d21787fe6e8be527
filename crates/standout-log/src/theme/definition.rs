//! Style definitions in YAML theme files.
//!
//! ```yaml
//! # Shorthand: attribute words and a colour, "on <colour>" for background
//! level_warning: "yellow bold"
//! level_fatal: "white on red bold"
//!
//! # Full definition
//! name:
//!   fg: "#5fafff"
//!   italic: true
//!
//! # Alias to another role
//! boolean: number
//! ```

use console::Style;

use super::color::ColorDef;
use super::style::ThemeStyle;
use crate::error::ThemeError;

/// A parsed style entry before it becomes a `console::Style`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StyleDefinition {
    /// Reuse the style of another role.
    Alias(ThemeStyle),
    /// Concrete attributes.
    Attributes(StyleAttributes),
}

impl StyleDefinition {
    pub(crate) fn parse(value: &serde_yaml::Value, role: &str) -> Result<Self, ThemeError> {
        match value {
            serde_yaml::Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(invalid(role, "empty style definition"));
                }
                if !s.contains(char::is_whitespace) {
                    if let Ok(target) = s.parse::<ThemeStyle>() {
                        if parse_shorthand(s, role).is_err() {
                            return Ok(StyleDefinition::Alias(target));
                        }
                    }
                }
                parse_shorthand(s, role).map(StyleDefinition::Attributes)
            }
            serde_yaml::Value::Mapping(map) => {
                StyleAttributes::parse_mapping(map, role).map(StyleDefinition::Attributes)
            }
            serde_yaml::Value::Null => Ok(StyleDefinition::Attributes(StyleAttributes::default())),
            other => Err(invalid(
                role,
                &format!("expected string or mapping, got {:?}", other),
            )),
        }
    }
}

/// Style attributes parsed from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StyleAttributes {
    pub fg: Option<ColorDef>,
    pub bg: Option<ColorDef>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    pub reverse: bool,
    pub hidden: bool,
    pub strikethrough: bool,
}

impl StyleAttributes {
    fn parse_mapping(map: &serde_yaml::Mapping, role: &str) -> Result<Self, ThemeError> {
        let mut attrs = StyleAttributes::default();
        for (key, value) in map {
            let key = key
                .as_str()
                .ok_or_else(|| invalid(role, &format!("non-string key {:?}", key)))?;
            match key {
                "fg" => attrs.fg = Some(parse_color(value, role)?),
                "bg" => attrs.bg = Some(parse_color(value, role)?),
                flag => {
                    let enabled = value.as_bool().ok_or_else(|| {
                        invalid(
                            role,
                            &format!("'{}' must be a boolean, got {:?}", flag, value),
                        )
                    })?;
                    attrs.set_flag(flag, enabled, role)?;
                }
            }
        }
        Ok(attrs)
    }

    fn set_flag(&mut self, flag: &str, enabled: bool, role: &str) -> Result<(), ThemeError> {
        let slot = match flag {
            "bold" => &mut self.bold,
            "dim" => &mut self.dim,
            "italic" => &mut self.italic,
            "underline" | "underlined" => &mut self.underline,
            "blink" => &mut self.blink,
            "reverse" => &mut self.reverse,
            "hidden" => &mut self.hidden,
            "strikethrough" => &mut self.strikethrough,
            _ => {
                return Err(ThemeError::UnknownAttribute {
                    role: role.to_string(),
                    attribute: flag.to_string(),
                })
            }
        };
        *slot = enabled;
        Ok(())
    }

    fn is_empty(&self) -> bool {
        *self == StyleAttributes::default()
    }

    pub(crate) fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = self.fg {
            style = style.fg(fg.to_console_color());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.to_console_color());
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dim();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        if self.blink {
            style = style.blink();
        }
        if self.reverse {
            style = style.reverse();
        }
        if self.hidden {
            style = style.hidden();
        }
        if self.strikethrough {
            style = style.strikethrough();
        }
        style
    }
}

/// Parses `"cyan bold"`, `"white on red"`, `"bold"`.
fn parse_shorthand(s: &str, role: &str) -> Result<StyleAttributes, ThemeError> {
    let mut attrs = StyleAttributes::default();
    let mut words = s.split_whitespace();

    while let Some(word) = words.next() {
        let lower = word.to_lowercase();
        if lower == "on" {
            let color = words
                .next()
                .ok_or_else(|| invalid(role, "'on' must be followed by a color"))?;
            attrs.bg = Some(parse_color_str(color, role)?);
            continue;
        }
        if attrs.set_flag(&lower, true, role).is_ok() {
            continue;
        }
        if attrs.fg.is_some() {
            return Err(invalid(
                role,
                &format!("multiple foreground colors, got '{}'", word),
            ));
        }
        attrs.fg = Some(parse_color_str(word, role)?);
    }

    if attrs.is_empty() {
        return Err(invalid(role, &format!("empty or invalid shorthand '{}'", s)));
    }
    Ok(attrs)
}

fn parse_color(value: &serde_yaml::Value, role: &str) -> Result<ColorDef, ThemeError> {
    ColorDef::parse_value(value).map_err(|reason| ThemeError::InvalidColor {
        role: role.to_string(),
        value: match value {
            serde_yaml::Value::String(s) => s.clone(),
            other => format!("{:?}", other),
        },
        reason,
    })
}

fn parse_color_str(value: &str, role: &str) -> Result<ColorDef, ThemeError> {
    ColorDef::parse_string(value).map_err(|reason| ThemeError::InvalidColor {
        role: role.to_string(),
        value: value.to_string(),
        reason,
    })
}

fn invalid(role: &str, message: &str) -> ThemeError {
    ThemeError::InvalidDefinition {
        role: role.to_string(),
        message: message.to_string(),
    }
}
