//! Declared value type of a key column.
//!
//! Models declare the type of their identity column so the eager loader can
//! decide whether an integer-only membership predicate is safe.

use std::fmt;

/// Declared type of a key column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyType {
    TinyInteger,
    SmallInteger,
    Integer,
    BigInteger,
    Unsigned,
    String,
    Uuid,
    /// Any other declared type, kept by name
    Other(String),
}

impl KeyType {
    /// Map a declared type name to a `KeyType`
    ///
    /// Accepts SQL names (`integer`, `bigint`), Rust names (`i32`, `u64`) and
    /// short forms (`int`). Matching is case-insensitive.
    pub fn from_type_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "tinyint" | "i8" | "tiny_integer" => KeyType::TinyInteger,
            "smallint" | "i16" | "small_integer" => KeyType::SmallInteger,
            "integer" | "int" | "i32" => KeyType::Integer,
            "bigint" | "i64" | "big_integer" => KeyType::BigInteger,
            "unsigned" | "u8" | "u16" | "u32" | "u64" => KeyType::Unsigned,
            "string" | "text" | "varchar" | "char" => KeyType::String,
            "uuid" => KeyType::Uuid,
            other => KeyType::Other(other.to_string()),
        }
    }

    /// Whether values of this type are always integral
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            KeyType::TinyInteger
                | KeyType::SmallInteger
                | KeyType::Integer
                | KeyType::BigInteger
                | KeyType::Unsigned
        )
    }
}

impl From<String> for KeyType {
    fn from(name: String) -> Self {
        KeyType::from_type_name(&name)
    }
}

impl From<&str> for KeyType {
    fn from(name: &str) -> Self {
        KeyType::from_type_name(name)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::TinyInteger => "tinyint",
            KeyType::SmallInteger => "smallint",
            KeyType::Integer => "integer",
            KeyType::BigInteger => "bigint",
            KeyType::Unsigned => "unsigned",
            KeyType::String => "string",
            KeyType::Uuid => "uuid",
            KeyType::Other(name) => name,
        };
        f.write_str(name)
    }
}
