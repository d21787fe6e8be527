//! Structured property values attached to log events.
//!
//! A [`Value`] is an immutable tree: scalars at the leaves, sequences,
//! structures and dictionaries above them. Values are built by the code that
//! raises an event and are only read during rendering.
//!
//! ```rust
//! use standout_log::{Structure, Value};
//!
//! let order = Value::from(
//!     Structure::tagged("Order")
//!         .with("Id", 42)
//!         .with("Items", vec!["apple", "pear"]),
//! );
//! assert!(matches!(order, Value::Structure(_)));
//! ```
//!
//! Anything implementing `serde::Serialize` can be captured with
//! [`Value::from_serialize`]; objects become untagged structures.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// A structured property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The absent value, rendered as `null`.
    Null,
    /// A primitive value.
    Scalar(Scalar),
    /// An ordered list of values.
    Sequence(Vec<Value>),
    /// A named-field record with an optional type tag.
    Structure(Structure),
    /// Key/value pairs; keys are values themselves.
    Dictionary(Vec<(Value, Value)>),
}

/// A primitive value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Text.
    String(String),
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Wide signed integer.
    I128(i128),
    /// Wide unsigned integer.
    U128(u128),
    /// Single precision float.
    F32(f32),
    /// Double precision float.
    F64(f64),
    /// Boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// A point in time with its UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Any other primitive, already converted to text.
    Other(String),
}

impl Scalar {
    /// Returns true for the integral and floating point variants.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Scalar::I64(_)
                | Scalar::U64(_)
                | Scalar::I128(_)
                | Scalar::U128(_)
                | Scalar::F32(_)
                | Scalar::F64(_)
        )
    }

    /// Returns the text of a `String` scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A named property, used for structure fields and event properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: Value,
}

impl Property {
    /// Creates a property.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A record of named fields, optionally tagged with a type name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Structure {
    type_tag: Option<String>,
    properties: Vec<Property>,
}

impl Structure {
    /// Creates an untagged, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty structure with a type tag.
    pub fn tagged(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: Some(type_tag.into()),
            properties: Vec::new(),
        }
    }

    /// Creates a structure from existing fields.
    pub fn from_properties(type_tag: Option<String>, properties: Vec<Property>) -> Self {
        Self {
            type_tag,
            properties,
        }
    }

    /// Appends a field, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// The type tag, if any.
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    /// Fields in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

impl Value {
    /// Captures any serializable data as a value tree.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error when `data` cannot be represented
    /// (for example a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(data).map(Value::from)
    }

    /// Builds a dictionary from key/value pairs.
    pub fn dictionary<K, V, I>(entries: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the scalar inside, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Structure> for Value {
    fn from(structure: Structure) -> Self {
        Value::Structure(structure)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::$variant(v.into()))
                }
            }
        )*
    };
}

impl_from_scalar!(
    i8 => I64,
    i16 => I64,
    i32 => I64,
    i64 => I64,
    u8 => U64,
    u16 => U64,
    u32 => U64,
    u64 => U64,
    i128 => I128,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    char => Char,
    DateTime<FixedOffset> => DateTime,
);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Scalar(Scalar::U64(v as u64))
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Scalar(Scalar::I64(v as i64))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Scalar(Scalar::DateTime(v.fixed_offset()))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Scalar(Scalar::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Scalar(Scalar::U64(u))
                } else {
                    Value::Scalar(Scalar::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Structure(Structure::from_properties(
                None,
                map.into_iter()
                    .map(|(name, value)| Property::new(name, Value::from(value)))
                    .collect(),
            )),
        }
    }
}
