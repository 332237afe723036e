//! Runtime value model for the property protocol.
//!
//! Property values cross the name-keyed protocol as [`Value`] instances,
//! tagged with a semantic [`ValueKind`]. Kinds are checked when a value is
//! staged on a builder, so a meta-model's declared schema is enforced
//! before construction rather than discovered at read time.

use rust_decimal::Decimal;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::bean::{self, Bean};
use crate::types::Date;

/// Semantic type tag for a property's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// A boolean flag.
    Bool,
    /// A 64-bit signed integer.
    Int,
    /// A fixed-point decimal quantity.
    Decimal,
    /// A calendar date.
    Date,
    /// Free text.
    Text,
    /// A named enumeration; the tag carries the enum's type name.
    Enum(&'static str),
    /// A homogeneous list of the element kind.
    List(Box<ValueKind>),
    /// A nested participating value type, by simple type name.
    Bean(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => f.write_str("bool"),
            ValueKind::Int => f.write_str("int"),
            ValueKind::Decimal => f.write_str("decimal"),
            ValueKind::Date => f.write_str("date"),
            ValueKind::Text => f.write_str("text"),
            ValueKind::Enum(name) | ValueKind::Bean(name) => f.write_str(name),
            ValueKind::List(element) => write!(f, "list<{element}>"),
        }
    }
}

/// An enum variant carried through the value model.
///
/// Domain enums participate in the protocol by implementing [`EnumLike`],
/// which converts between the enum and this token form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumToken {
    /// Simple name of the enum type.
    pub type_name: &'static str,
    /// Name of the variant.
    pub variant: &'static str,
}

/// Bridge between a domain enum and the value model.
///
/// # Example
///
/// ```rust
/// use rivet_core::value::{EnumLike, Value};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Side { Pay, Receive }
///
/// impl EnumLike for Side {
///     const TYPE_NAME: &'static str = "Side";
///     fn variant_name(&self) -> &'static str {
///         match self {
///             Side::Pay => "Pay",
///             Side::Receive => "Receive",
///         }
///     }
///     fn from_variant(variant: &str) -> Option<Self> {
///         match variant {
///             "Pay" => Some(Side::Pay),
///             "Receive" => Some(Side::Receive),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Side::parse_value("Pay").unwrap(), Side::Pay.value());
/// ```
pub trait EnumLike: Sized {
    /// Simple name of the enum type, matched against `ValueKind::Enum`.
    const TYPE_NAME: &'static str;

    /// Returns the name of this variant.
    fn variant_name(&self) -> &'static str;

    /// Parses a variant by name.
    fn from_variant(variant: &str) -> Option<Self>;

    /// Converts this variant into a token.
    fn token(&self) -> EnumToken {
        EnumToken {
            type_name: Self::TYPE_NAME,
            variant: self.variant_name(),
        }
    }

    /// Converts this variant into a protocol value.
    fn value(&self) -> Value {
        Value::Enum(self.token())
    }

    /// Parses text into a protocol value; usable as a descriptor parser.
    fn parse_value(text: &str) -> Result<Value, String> {
        Self::from_variant(text)
            .map(|e| e.value())
            .ok_or_else(|| format!("no variant '{text}' in {}", Self::TYPE_NAME))
    }
}

/// A runtime property value.
///
/// `Null` represents an absent optional value; nullability itself is a
/// property-descriptor concern, so `Null` matches no [`ValueKind`].
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent optional value.
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A fixed-point decimal quantity.
    Decimal(Decimal),
    /// A calendar date.
    Date(Date),
    /// Free text.
    Text(String),
    /// An enum variant token.
    Enum(EnumToken),
    /// A homogeneous list of values.
    List(Vec<Value>),
    /// A nested participating value instance.
    Bean(Arc<dyn Bean>),
}

impl Value {
    /// Checks this value's runtime kind against a declared kind.
    ///
    /// An empty list matches any list kind; element kinds are checked
    /// structurally for non-empty lists. `Null` never matches.
    #[must_use]
    pub fn matches(&self, kind: &ValueKind) -> bool {
        match (self, kind) {
            (Value::Bool(_), ValueKind::Bool)
            | (Value::Int(_), ValueKind::Int)
            | (Value::Decimal(_), ValueKind::Decimal)
            | (Value::Date(_), ValueKind::Date)
            | (Value::Text(_), ValueKind::Text) => true,
            (Value::Enum(token), ValueKind::Enum(name)) => token.type_name == *name,
            (Value::List(items), ValueKind::List(element)) => {
                items.iter().all(|item| item.matches(element))
            }
            (Value::Bean(nested), ValueKind::Bean(name)) => {
                nested.meta_model().type_name() == *name
            }
            _ => false,
        }
    }

    /// Describes this value's runtime kind, for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Decimal(_) => "decimal".to_string(),
            Value::Date(_) => "date".to_string(),
            Value::Text(_) => "text".to_string(),
            Value::Enum(token) => token.type_name.to_string(),
            Value::List(items) => match items.first() {
                Some(first) => format!("list<{}>", first.describe()),
                None => "list<>".to_string(),
            },
            Value::Bean(nested) => nested.meta_model().type_name().to_string(),
        }
    }

    /// Returns true if this is the null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Bean(a), Value::Bean(b)) => bean::beans_equal(a.as_ref(), b.as_ref()),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0u8.hash(state),
            Value::Bool(v) => {
                1u8.hash(state);
                v.hash(state);
            }
            Value::Int(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Value::Decimal(v) => {
                3u8.hash(state);
                v.hash(state);
            }
            Value::Date(v) => {
                4u8.hash(state);
                v.hash(state);
            }
            Value::Text(v) => {
                5u8.hash(state);
                v.hash(state);
            }
            Value::Enum(v) => {
                6u8.hash(state);
                v.hash(state);
            }
            Value::List(items) => {
                7u8.hash(state);
                items.len().hash(state);
                for item in items {
                    item.hash(state);
                }
            }
            Value::Bean(nested) => {
                8u8.hash(state);
                bean::hash_bean(nested.as_ref(), state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Enum(token) => f.write_str(token.variant),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Bean(nested) => f.write_str(&bean::render(nested.as_ref())),
        }
    }
}
