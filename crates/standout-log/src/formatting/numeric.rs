//! Standard numeric format strings.
//!
//! | Format | Meaning | `1234.5` | `255` |
//! |--------|---------|----------|-------|
//! | `F2` | fixed decimals | `1234.50` | `255.00` |
//! | `N1` | grouped fixed decimals | `1,234.5` | `255.0` |
//! | `E2` | exponential | `1.23E+003` | `2.55E+002` |
//! | `P0` | percent | `123450 %` | `25500 %` |
//! | `D5` | zero-padded integer | | `00255` |
//! | `X4` | hexadecimal | | `00FF` |
//!
//! The precision digits are optional. Formats that do not apply to the value
//! (`D` on a float) and unknown formats return `None`, and the caller falls
//! back to invariant formatting.

/// Invariant text of a float: shortest round-trip digits, `NaN`, `Infinity`,
/// `-Infinity`.
pub(crate) fn invariant_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        value.to_string()
    }
}

/// Same as [`invariant_float`] for single precision, without widening noise.
pub(crate) fn invariant_f32(value: f32) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        invariant_float(f64::from(value))
    }
}

fn split(format: &str) -> Option<(char, Option<usize>)> {
    let mut chars = format.chars();
    let kind = chars.next()?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return Some((kind, None));
    }
    if rest.len() > 2 || !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok().map(|p| (kind, Some(p)))
}

/// Formats an integer given its decimal text (leading `-` when negative)
/// and its hexadecimal text (two's complement for negatives).
pub(crate) fn format_integer(decimal: &str, hex: &str, format: &str) -> Option<String> {
    let (kind, precision) = split(format)?;
    let (negative, digits) = match decimal.strip_prefix('-') {
        Some(d) => (true, d),
        None => (false, decimal),
    };
    let sign = if negative { "-" } else { "" };

    match kind {
        'D' | 'd' => {
            let width = precision.unwrap_or(0);
            Some(format!("{}{:0>width$}", sign, digits, width = width))
        }
        'X' => Some(pad_hex(&hex.to_uppercase(), precision)),
        'x' => Some(pad_hex(&hex.to_lowercase(), precision)),
        'F' | 'f' => {
            let decimals = precision.unwrap_or(2);
            Some(with_zero_decimals(&format!("{}{}", sign, digits), decimals))
        }
        'N' | 'n' => {
            let decimals = precision.unwrap_or(2);
            Some(with_zero_decimals(
                &format!("{}{}", sign, group_thousands(digits)),
                decimals,
            ))
        }
        'E' | 'e' | 'P' | 'p' => {
            // Exponent and percent forms go through the float path.
            decimal.parse::<f64>().ok().and_then(|v| format_float(v, format))
        }
        'G' | 'g' | 'R' | 'r' => Some(decimal.to_string()),
        _ => None,
    }
}

/// Formats a float. Non-finite values always use the invariant text.
pub(crate) fn format_float(value: f64, format: &str) -> Option<String> {
    let (kind, precision) = split(format)?;
    if !value.is_finite() {
        return match kind {
            'F' | 'f' | 'N' | 'n' | 'E' | 'e' | 'P' | 'p' | 'G' | 'g' | 'R' | 'r' => {
                Some(invariant_float(value))
            }
            _ => None,
        };
    }

    match kind {
        'F' | 'f' => Some(format!("{:.*}", precision.unwrap_or(2), value)),
        'N' | 'n' => Some(grouped_fixed(value, precision.unwrap_or(2))),
        'E' | 'e' => Some(exponential(value, precision.unwrap_or(6), kind == 'E')),
        'P' | 'p' => Some(format!(
            "{} %",
            grouped_fixed(value * 100.0, precision.unwrap_or(2))
        )),
        'G' | 'g' | 'R' | 'r' => Some(invariant_float(value)),
        _ => None,
    }
}

fn pad_hex(hex: &str, precision: Option<usize>) -> String {
    let width = precision.unwrap_or(0);
    format!("{:0>width$}", hex, width = width)
}

fn with_zero_decimals(integer: &str, decimals: usize) -> String {
    if decimals == 0 {
        integer.to_string()
    } else {
        format!("{}.{}", integer, "0".repeat(decimals))
    }
}

fn grouped_fixed(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    // A tiny negative keeps its sign after rounding: "-0.00".
    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(f) => format!("{}{}.{}", sign, group_thousands(integer), f),
        None => format!("{}{}", sign, group_thousands(integer)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn exponential(value: f64, precision: usize, upper: bool) -> String {
    let text = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let (exp_sign, exp_digits) = match exponent.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exponent),
    };
    let marker = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:0>3}", mantissa, marker, exp_sign, exp_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64, format: &str) -> Option<String> {
        format_integer(&value.to_string(), &format!("{:x}", value), format)
    }

    #[test]
    fn test_invariant_float() {
        assert_eq!(invariant_float(1.5), "1.5");
        assert_eq!(invariant_float(1.0), "1");
        assert_eq!(invariant_float(f64::NAN), "NaN");
        assert_eq!(invariant_float(f64::INFINITY), "Infinity");
        assert_eq!(invariant_float(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(invariant_f32(0.1), "0.1");
    }

    #[test]
    fn test_integer_formats() {
        assert_eq!(int(255, "D5").as_deref(), Some("00255"));
        assert_eq!(int(-42, "D4").as_deref(), Some("-0042"));
        assert_eq!(int(255, "X").as_deref(), Some("FF"));
        assert_eq!(int(255, "x4").as_deref(), Some("00ff"));
        assert_eq!(int(1234567, "N0").as_deref(), Some("1,234,567"));
        assert_eq!(int(-1234, "N").as_deref(), Some("-1,234.00"));
        assert_eq!(int(7, "F3").as_deref(), Some("7.000"));
        assert_eq!(int(255, "E2").as_deref(), Some("2.55E+002"));
    }

    #[test]
    fn test_float_formats() {
        assert_eq!(format_float(1234.5, "F2").as_deref(), Some("1234.50"));
        assert_eq!(format_float(1234.5, "N1").as_deref(), Some("1,234.5"));
        assert_eq!(format_float(1234.5, "E2").as_deref(), Some("1.23E+003"));
        assert_eq!(format_float(0.00012, "e1").as_deref(), Some("1.2e-004"));
        assert_eq!(format_float(0.125, "P1").as_deref(), Some("12.5 %"));
        assert_eq!(format_float(-0.5, "N2").as_deref(), Some("-0.50"));
    }

    #[test]
    fn test_float_non_finite_uses_invariant_text() {
        assert_eq!(format_float(f64::NAN, "F2").as_deref(), Some("NaN"));
        assert_eq!(
            format_float(f64::NEG_INFINITY, "N0").as_deref(),
            Some("-Infinity")
        );
    }

    #[test]
    fn test_unknown_formats() {
        assert_eq!(format_float(1.0, "D2"), None);
        assert_eq!(format_float(1.0, "Q"), None);
        assert_eq!(int(1, "yyyy"), None);
        assert_eq!(int(1, "F123"), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456789"), "123,456,789");
    }
}
