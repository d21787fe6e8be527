//! Message and output template syntax.
//!
//! Both the event's message (`"Hello, {Name}"`) and the sink's output
//! template (`"[{Level:u3}] {Message}"`) use the same directive grammar and
//! are parsed by [`MessageTemplate::parse`]. Format strings are reduced to a
//! [`FormatSpec`] when the directive is parsed, so renderers never re-scan
//! them per event.

mod format_spec;
mod parser;

pub use format_spec::{is_flags_only, value_format, Casing, FormatSpec};
pub use parser::{
    Alignment, AlignmentDirection, Destructuring, MessageTemplate, PropertyToken, Token,
};
