//! Hashable composite key values
//!
//! `sea_query::Value` is not hashable without extra features, and its
//! variants distinguish integer widths that should compare equal when keys
//! are matched (an `INT` local key against a `BIGINT` foreign key). `KeyPart`
//! normalises a value into a type-aware, hashable form and `CompositeKey`
//! is the ordered tuple of parts used as a dictionary key.

use sea_query::Value;
use std::fmt;

/// One normalised column value of a key tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
    /// SQL NULL of any type
    Null,
    Bool(bool),
    /// Every signed and unsigned integer width
    Integer(i128),
    /// `f32`/`f64`, compared by bit pattern of the widened `f64`
    Float(u64),
    /// Strings and single characters
    Text(String),
    Bytes(Vec<u8>),
    /// Values without a dedicated normalisation, compared by debug repr
    Opaque(String),
}

impl KeyPart {
    pub fn is_null(&self) -> bool {
        matches!(self, KeyPart::Null)
    }

    /// The integer payload, if this part is an integer
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            KeyPart::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&Value> for KeyPart {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
            | Value::Json(None) => KeyPart::Null,

            Value::Bool(Some(b)) => KeyPart::Bool(*b),

            Value::TinyInt(Some(i)) => KeyPart::Integer(i128::from(*i)),
            Value::SmallInt(Some(i)) => KeyPart::Integer(i128::from(*i)),
            Value::Int(Some(i)) => KeyPart::Integer(i128::from(*i)),
            Value::BigInt(Some(i)) => KeyPart::Integer(i128::from(*i)),
            Value::TinyUnsigned(Some(u)) => KeyPart::Integer(i128::from(*u)),
            Value::SmallUnsigned(Some(u)) => KeyPart::Integer(i128::from(*u)),
            Value::Unsigned(Some(u)) => KeyPart::Integer(i128::from(*u)),
            Value::BigUnsigned(Some(u)) => KeyPart::Integer(i128::from(*u)),

            Value::Float(Some(f)) => KeyPart::Float(float_bits(f64::from(*f))),
            Value::Double(Some(d)) => KeyPart::Float(float_bits(*d)),

            Value::String(Some(s)) => KeyPart::Text(s.to_string()),
            Value::Char(Some(c)) => KeyPart::Text(c.to_string()),
            Value::Bytes(Some(b)) => KeyPart::Bytes(b.to_vec()),

            other => KeyPart::Opaque(format!("{:?}", other)),
        }
    }
}

/// Bit pattern of `d`, with `-0.0` folded into `0.0`
fn float_bits(d: f64) -> u64 {
    if d == 0.0 {
        0.0f64.to_bits()
    } else {
        d.to_bits()
    }
}

impl From<Value> for KeyPart {
    fn from(value: Value) -> Self {
        KeyPart::from(&value)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Null => write!(f, "NULL"),
            KeyPart::Bool(b) => write!(f, "{b}"),
            KeyPart::Integer(i) => write!(f, "{i}"),
            KeyPart::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            KeyPart::Text(s) => write!(f, "{s:?}"),
            KeyPart::Bytes(b) => {
                write!(f, "0x")?;
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            KeyPart::Opaque(s) => write!(f, "{s}"),
        }
    }
}

/// Ordered tuple of key parts, one per key column
///
/// Two keys are equal iff they have the same arity and every positional
/// part is equal. A single-column key is simply a tuple of length one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CompositeKey(Vec<KeyPart>);

impl CompositeKey {
    pub fn new(parts: Vec<KeyPart>) -> Self {
        CompositeKey(parts)
    }

    /// Build a key from raw column values
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        CompositeKey(values.into_iter().map(KeyPart::from).collect())
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// A key with any NULL part can never equal a parent key under SQL semantics
    pub fn has_null(&self) -> bool {
        self.0.iter().any(KeyPart::is_null)
    }
}

impl From<Vec<KeyPart>> for CompositeKey {
    fn from(parts: Vec<KeyPart>) -> Self {
        CompositeKey(parts)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{part}")?;
        }
        write!(f, ")")
    }
}
