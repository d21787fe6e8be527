//! Colour values in theme files.
//!
//! Accepted forms:
//!
//! - Named colours: `red`, `green`, `blue`, ... (8 ANSI colours)
//! - Bright variants: `bright_red`, `bright_green`, ...
//! - Palette index: `0` through `255`
//! - Hex: `"#ff6b35"` or `"#fff"`
//! - RGB tuple: `[255, 107, 53]`
//!
//! True colour values are reduced to the nearest 256-colour index.

use console::Color;

use crate::util::rgb_to_ansi256;

/// A parsed colour definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDef {
    /// Named ANSI colour.
    Named(Color),
    /// 256-colour palette index.
    Color256(u8),
    /// RGB, rendered through the 256-colour palette.
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Parses a colour from a YAML value.
    pub fn parse_value(value: &serde_yaml::Value) -> Result<Self, String> {
        match value {
            serde_yaml::Value::String(s) => Self::parse_string(s),
            serde_yaml::Value::Number(n) => {
                let index = n
                    .as_u64()
                    .ok_or_else(|| format!("invalid palette index: {}", n))?;
                u8::try_from(index)
                    .map(ColorDef::Color256)
                    .map_err(|_| format!("palette index {} out of range (0-255)", index))
            }
            serde_yaml::Value::Sequence(seq) => Self::parse_rgb_tuple(seq),
            _ => Err(format!("invalid color value: {:?}", value)),
        }
    }

    /// Parses a colour from text: a name, `bright_` name, index or hex code.
    pub fn parse_string(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Ok(index) = s.parse::<u8>() {
            return Ok(ColorDef::Color256(index));
        }
        Self::parse_named(s)
    }

    fn parse_hex(hex: &str) -> Result<Self, String> {
        let invalid = || format!("invalid hex color: #{}", hex);
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        match hex.len() {
            3 => Ok(ColorDef::Rgb(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 => Ok(ColorDef::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(format!(
                "invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    fn parse_named(name: &str) -> Result<Self, String> {
        let lower = name.to_lowercase();
        if let Some(base) = lower.strip_prefix("bright_") {
            return Self::ansi_index(base)
                .map(|i| ColorDef::Color256(i + 8))
                .ok_or_else(|| format!("unknown bright color: {}", name));
        }
        let color = match lower.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "gray" | "grey" => return Ok(ColorDef::Color256(8)),
            _ => return Err(format!("unknown color name: {}", name)),
        };
        Ok(ColorDef::Named(color))
    }

    fn ansi_index(base: &str) -> Option<u8> {
        Some(match base {
            "black" => 0,
            "red" => 1,
            "green" => 2,
            "yellow" => 3,
            "blue" => 4,
            "magenta" => 5,
            "cyan" => 6,
            "white" => 7,
            _ => return None,
        })
    }

    fn parse_rgb_tuple(seq: &[serde_yaml::Value]) -> Result<Self, String> {
        if seq.len() != 3 {
            return Err(format!(
                "RGB tuple must have exactly 3 values, got {}",
                seq.len()
            ));
        }
        let mut components = [0u8; 3];
        for (i, val) in seq.iter().enumerate() {
            let n = val
                .as_u64()
                .ok_or_else(|| format!("RGB component {} is not a number", i))?;
            components[i] = u8::try_from(n)
                .map_err(|_| format!("RGB component {} out of range (0-255): {}", i, n))?;
        }
        Ok(ColorDef::Rgb(components[0], components[1], components[2]))
    }

    /// Converts to a `console` colour.
    pub fn to_console_color(self) -> Color {
        match self {
            ColorDef::Named(c) => c,
            ColorDef::Color256(n) => Color::Color256(n),
            ColorDef::Rgb(r, g, b) => Color::Color256(rgb_to_ansi256((r, g, b))),
        }
    }
}
