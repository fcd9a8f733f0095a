//! # has-many-merged
//!
//! One-to-many relationship resolution over composite foreign keys for
//! sea-query based ORMs.
//!
//! Given a batch of parent records, [`HasManyMerged`] builds the single
//! predicate that fetches all of their related records, groups the fetched
//! records by composite key and attaches each parent's deduplicated group to
//! a named relation slot. Query execution stays behind [`RelationExecutor`].

pub mod collection;
pub mod config;
pub mod error;
pub mod executor;
mod macros;
pub mod model;
pub mod relation;
pub mod value;

pub use sea_query;

pub use collection::unique_by_identity;
pub use config::{EagerLoadConfig, MixedKeyPolicy};
pub use error::{RelationError, Result};
pub use executor::RelationExecutor;
#[cfg(any(test, feature = "mock"))]
pub use executor::MockExecutor;
pub use model::{AttributeReadable, LoadedRelations, ModelTrait, RelationSlots};
pub use relation::{
    choose_membership_method, HasManyMerged, KeyMode, MembershipMethod, RelationDictionary,
    RelationMatcher,
};
pub use value::{CompositeKey, KeyPart, KeyType};
