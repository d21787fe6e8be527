//! Utility functions for text measurement, JSON quoting and color conversion.

use unicode_width::UnicodeWidthStr;

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// # Example
///
/// ```rust
/// use standout_log::rgb_to_ansi256;
///
/// // Pure red maps to ANSI 196
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
///
/// // Pure green maps to ANSI 46
/// assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Returns the number of terminal columns `s` occupies.
///
/// CJK and other wide characters count as two columns. The input must be
/// plain text: escape sequences are not stripped.
///
/// ```rust
/// use standout_log::display_width;
///
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Returns `s` as a double-quoted JSON string literal.
///
/// Quotes, backslashes and control characters are escaped; everything else
/// is written as-is.
///
/// ```rust
/// use standout_log::quote_json_string;
///
/// assert_eq!(quote_json_string("say \"hi\""), r#""say \"hi\"""#);
/// ```
pub fn quote_json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
