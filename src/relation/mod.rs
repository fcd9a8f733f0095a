//! Relation module for one-to-many relationships over composite keys.
//!
//! # Architecture
//!
//! - **Columns**: validated key column lists (`KeyColumns`)
//! - **Key selector**: membership-method choice and key-tuple extraction
//! - **Eager**: batch predicate construction with sea-query
//! - **Dictionary**: transient key → related records grouping
//! - **Matcher**: generic init / group / match over key-extraction functions
//! - **HasManyMerged**: the relationship definition tying them together

pub mod columns;
pub mod dictionary;
pub mod eager;
pub mod has_many_merged;
pub mod key_selector;
pub mod matcher;

#[doc(inline)]
pub use columns::KeyColumns;
#[doc(inline)]
pub use dictionary::RelationDictionary;
#[doc(inline)]
pub use has_many_merged::{HasManyMerged, KeyMode};
#[doc(inline)]
pub use key_selector::{
    choose_membership_method, extract_foreign_key_tuple, extract_key_tuple,
    extract_local_key_value, extract_merged_keys, MembershipMethod,
};
#[doc(inline)]
pub use matcher::RelationMatcher;
