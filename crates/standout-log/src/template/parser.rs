//! Message template parsing.
//!
//! Templates are literal text interspersed with property directives:
//!
//! ```text
//! {Name}            plain property
//! {Name,10}         right-aligned in 10 columns
//! {Name,-10}        left-aligned in 10 columns
//! {Name:lj}         format string "lj"
//! {Name,-10:u3}     alignment and format
//! {@Name} {$Name}   destructuring hints
//! {{ and }}         escaped braces
//! ```
//!
//! The parser never fails. A directive that does not follow the grammar is
//! kept as literal text, so a mistyped template still shows up in the output.

use super::format_spec::FormatSpec;

/// Direction of alignment padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlignmentDirection {
    /// Content first, padding after.
    Left,
    /// Padding first, content after.
    Right,
}

/// Requested field width and direction for a directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alignment {
    /// Padding side.
    pub direction: AlignmentDirection,
    /// Field width in columns, always positive.
    pub width: usize,
}

impl Alignment {
    /// Right alignment in `width` columns.
    pub fn right(width: usize) -> Self {
        Self {
            direction: AlignmentDirection::Right,
            width,
        }
    }

    /// Left alignment in `width` columns.
    pub fn left(width: usize) -> Self {
        Self {
            direction: AlignmentDirection::Left,
            width,
        }
    }

    /// Parses `10` or `-10`. Zero and non-numeric widths are rejected.
    fn parse(s: &str) -> Option<Self> {
        let (direction, digits) = match s.strip_prefix('-') {
            Some(rest) => (AlignmentDirection::Left, rest),
            None => (AlignmentDirection::Right, s),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let width = digits.parse::<usize>().ok().filter(|w| *w > 0)?;
        Some(Self { direction, width })
    }
}

/// How a property should be captured, from the `@`/`$` prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Destructuring {
    /// No prefix.
    #[default]
    Default,
    /// `@`: capture structure.
    Destructure,
    /// `$`: capture as text.
    Stringify,
}

/// A property directive inside a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyToken {
    name: String,
    spec: FormatSpec,
    alignment: Option<Alignment>,
    destructuring: Destructuring,
    raw: String,
}

impl PropertyToken {
    /// Creates a directive programmatically.
    pub fn new(name: impl Into<String>, format: Option<&str>, alignment: Option<Alignment>) -> Self {
        let name = name.into();
        let mut raw = format!("{{{}", name);
        if let Some(alignment) = alignment {
            let sign = match alignment.direction {
                AlignmentDirection::Left => "-",
                AlignmentDirection::Right => "",
            };
            raw.push_str(&format!(",{}{}", sign, alignment.width));
        }
        if let Some(format) = format {
            raw.push(':');
            raw.push_str(format);
        }
        raw.push('}');
        Self {
            name,
            spec: FormatSpec::parse(format),
            alignment,
            destructuring: Destructuring::Default,
            raw,
        }
    }

    /// Property name without prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The format string, if any.
    pub fn format(&self) -> Option<&str> {
        self.spec.raw()
    }

    /// Parsed format flags.
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    /// Requested alignment, if any.
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    /// Capture hint from the `@`/`$` prefix.
    pub fn destructuring(&self) -> Destructuring {
        self.destructuring
    }

    /// The directive exactly as written, braces included.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// One unit of a parsed template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Literal text with escapes already resolved.
    Text(String),
    /// A property directive.
    Property(PropertyToken),
}

/// A parsed message or output template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    tokens: Vec<Token>,
}

impl MessageTemplate {
    /// Parses a template string.
    ///
    /// ```rust
    /// use standout_log::{MessageTemplate, Token};
    ///
    /// let template = MessageTemplate::parse("Hello, {Name}!");
    /// assert_eq!(template.tokens().len(), 3);
    /// assert!(matches!(&template.tokens()[1], Token::Property(p) if p.name() == "Name"));
    /// ```
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: tokenize(text),
        }
    }

    /// A template made of one text token, with no directive parsing.
    ///
    /// Used for messages that come from sources without template semantics,
    /// where braces are ordinary characters.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = if text.is_empty() {
            Vec::new()
        } else {
            vec![Token::Text(text.clone())]
        };
        Self { text, tokens }
    }

    /// The source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tokens in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Property directives in source order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyToken> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Property(p) => Some(p),
            Token::Text(_) => None,
        })
    }

    /// Names of all referenced properties, in source order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties().map(PropertyToken::name)
    }

    /// Returns true if any directive references `name`.
    pub fn contains_property(&self, name: &str) -> bool {
        self.property_names().any(|n| n == name)
    }
}

impl std::fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while pos < template.len() {
        let rest = &template[pos..];

        if rest.starts_with("{{") {
            text.push('{');
            pos += 2;
            continue;
        }
        if rest.starts_with("}}") {
            text.push('}');
            pos += 2;
            continue;
        }

        if rest.starts_with('{') {
            // Scan to the closing brace; a nested '{' aborts the directive.
            let body = &rest[1..];
            let end = body.find(['{', '}']);
            match end {
                Some(i) if body.as_bytes()[i] == b'}' => {
                    let raw = &rest[..i + 2];
                    match parse_directive(&body[..i], raw) {
                        Some(property) => {
                            if !text.is_empty() {
                                tokens.push(Token::Text(std::mem::take(&mut text)));
                            }
                            tokens.push(Token::Property(property));
                        }
                        None => text.push_str(raw),
                    }
                    pos += i + 2;
                }
                Some(i) => {
                    text.push_str(&rest[..i + 1]);
                    pos += i + 1;
                }
                None => {
                    text.push_str(rest);
                    pos = template.len();
                }
            }
            continue;
        }

        let skip = rest.chars().next().map_or(1, char::len_utf8);
        let next = rest[skip..]
            .find(['{', '}'])
            .map_or(rest.len(), |i| i + skip);
        text.push_str(&rest[..next]);
        pos += next;
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    tokens
}

/// Parses the inside of `{...}`. Returns `None` when it is not a directive.
fn parse_directive(content: &str, raw: &str) -> Option<PropertyToken> {
    let (destructuring, content) = match content.chars().next()? {
        '@' => (Destructuring::Destructure, &content[1..]),
        '$' => (Destructuring::Stringify, &content[1..]),
        _ => (Destructuring::Default, content),
    };

    // Alignment sits between the name and the format: `Name,-10:fmt`.
    let colon = content.find(':');
    let comma = content.find(',');
    let (head, mut format) = match colon {
        Some(c) => (&content[..c], Some(&content[c + 1..])),
        None => (content, None),
    };
    let (name, mut alignment) = match comma {
        Some(c) if colon.is_none_or(|colon| c < colon) => {
            (&head[..c], Some(Alignment::parse(&head[c + 1..])?))
        }
        _ => (head, None),
    };

    // Also accept the format-first order `Name:fmt,-10`.
    if alignment.is_none() {
        if let Some(fmt) = format {
            if let Some((before, after)) = fmt.rsplit_once(',') {
                if let Some(parsed) = Alignment::parse(after) {
                    alignment = Some(parsed);
                    format = Some(before);
                }
            }
        }
    }

    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    if format.is_some_and(str::is_empty) {
        return None;
    }

    Some(PropertyToken {
        name: name.to_string(),
        spec: FormatSpec::parse(format),
        alignment,
        destructuring,
        raw: raw.to_string(),
    })
}
