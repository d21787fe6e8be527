//! Format specifier descriptor, parsed once per directive.

/// Case transform requested by a format specifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Casing {
    /// Leave text as-is.
    #[default]
    Unchanged,
    /// `u`: upper case.
    Upper,
    /// `w`: lower case.
    Lower,
}

impl Casing {
    /// Reads the casing from a raw format string.
    ///
    /// Only the exact formats `u` and `w` request a transform; longer formats
    /// such as `u3` are interpreted by the renderer that owns them.
    pub fn from_format(format: Option<&str>) -> Self {
        match format {
            Some("u") => Casing::Upper,
            Some("w") => Casing::Lower,
            _ => Casing::Unchanged,
        }
    }

    /// Applies the transform.
    pub fn apply(self, text: &str) -> String {
        match self {
            Casing::Unchanged => text.to_string(),
            Casing::Upper => text.to_uppercase(),
            Casing::Lower => text.to_lowercase(),
        }
    }
}

/// Returns true when `format` is made only of the flag letters `l` and `j`.
pub fn is_flags_only(format: &str) -> bool {
    !format.is_empty() && format.chars().all(|c| c == 'l' || c == 'j')
}

/// The part of a format string meant for value formatting: `None` when the
/// format carries flags only.
///
/// ```rust
/// use standout_log::template::value_format;
///
/// assert_eq!(value_format(Some("lj")), None);
/// assert_eq!(value_format(Some("F2")), Some("F2"));
/// ```
pub fn value_format(format: Option<&str>) -> Option<&str> {
    format.filter(|f| !is_flags_only(f))
}

/// Flags carried by a directive's format string.
///
/// `l` renders strings without quotes, `j` switches nested values to JSON
/// notation. The letters may be combined (`lj`, `jl`). On a property inside
/// a message template the letters only count as flags when the format holds
/// nothing else, so `{When:yyyy-MM-dd}` is a date pattern, not a flag set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatSpec {
    raw: Option<String>,
    literal: bool,
    json: bool,
    flags_only: bool,
    casing: Casing,
}

impl FormatSpec {
    /// Parses a directive's format string.
    pub fn parse(format: Option<&str>) -> Self {
        let literal = format.is_some_and(|f| f.contains('l'));
        let json = format.is_some_and(|f| f.contains('j'));
        Self {
            raw: format.map(str::to_string),
            literal,
            json,
            flags_only: format.is_some_and(is_flags_only),
            casing: Casing::from_format(format),
        }
    }

    /// The format string as written, if any.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// The format string to hand to value formatting, without flags.
    pub fn value_format(&self) -> Option<&str> {
        value_format(self.raw())
    }

    /// True when the format is a bare flag set such as `l`, `j` or `lj`.
    pub fn is_flags_only(&self) -> bool {
        self.flags_only
    }

    /// `l` flag: strings render unquoted.
    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// `j` flag: nested values render as JSON.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Case transform for string values.
    pub fn casing(&self) -> Casing {
        self.casing
    }
}
