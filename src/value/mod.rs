//! Key values and declared key types
//!
//! ## Types
//!
//! - **`KeyPart`** - Hashable, type-aware normalisation of a `sea_query::Value`
//! - **`CompositeKey`** - Ordered tuple of key parts used as a dictionary key
//! - **`KeyType`** - Declared type of a key column

pub mod json;
pub mod key;
pub mod key_type;

pub use json::json_to_value;
pub use key::{CompositeKey, KeyPart};
pub use key_type::KeyType;
