use std::fmt::Debug;

use chrono::{DateTime, FixedOffset};

use super::datetime::{format_timestamp, DEFAULT_TIMESTAMP_FORMAT};
use super::numeric::{format_float, format_integer, invariant_f32, invariant_float};
use crate::value::Scalar;

/// Turns scalars and timestamps into text.
///
/// The default methods implement invariant formatting: no digit grouping
/// unless a format asks for it, `.` as the decimal separator, English month
/// names. Override them to localise output.
///
/// ```rust
/// use standout_log::{FormatProvider, Scalar};
///
/// #[derive(Debug)]
/// struct YesNo;
///
/// impl FormatProvider for YesNo {
///     fn format_scalar(&self, scalar: &Scalar, format: Option<&str>) -> String {
///         match scalar {
///             Scalar::Bool(true) => "yes".into(),
///             Scalar::Bool(false) => "no".into(),
///             other => standout_log::InvariantFormat.format_scalar(other, format),
///         }
///     }
/// }
///
/// assert_eq!(YesNo.format_scalar(&Scalar::Bool(true), None), "yes");
/// assert_eq!(YesNo.format_scalar(&Scalar::I64(3), Some("D2")), "03");
/// ```
pub trait FormatProvider: Debug + Send + Sync {
    /// Text of a scalar under an optional format string.
    ///
    /// Strings are returned as-is; quoting is the formatter's concern.
    fn format_scalar(&self, scalar: &Scalar, format: Option<&str>) -> String {
        invariant_scalar(scalar, format)
    }

    /// Text of an event timestamp under an optional format string.
    fn format_timestamp(&self, timestamp: &DateTime<FixedOffset>, format: Option<&str>) -> String {
        format_timestamp(timestamp, format.unwrap_or(DEFAULT_TIMESTAMP_FORMAT))
    }
}

/// The default provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantFormat;

impl FormatProvider for InvariantFormat {}

macro_rules! integer {
    ($value:expr, $format:expr) => {{
        let value = $value;
        match $format {
            Some(f) => format_integer(&value.to_string(), &format!("{:x}", value), f)
                .unwrap_or_else(|| value.to_string()),
            None => value.to_string(),
        }
    }};
}

fn invariant_scalar(scalar: &Scalar, format: Option<&str>) -> String {
    match scalar {
        Scalar::String(s) | Scalar::Other(s) => s.clone(),
        Scalar::I64(v) => integer!(*v, format),
        Scalar::U64(v) => integer!(*v, format),
        Scalar::I128(v) => integer!(*v, format),
        Scalar::U128(v) => integer!(*v, format),
        Scalar::F64(v) => format
            .and_then(|f| format_float(*v, f))
            .unwrap_or_else(|| invariant_float(*v)),
        Scalar::F32(v) => format
            .and_then(|f| format_float(f64::from(*v), f))
            .unwrap_or_else(|| invariant_f32(*v)),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Char(c) => c.to_string(),
        Scalar::DateTime(dt) => format_timestamp(dt, format.unwrap_or(DEFAULT_TIMESTAMP_FORMAT)),
    }
}
