//! Model capabilities used by the relation matcher
//!
//! The matcher never depends on concrete record types. It reads attributes
//! by column name through [`AttributeReadable`], reads table and identity
//! metadata through [`ModelTrait`], and writes resolved collections through
//! [`RelationSlots`].
//!
//! # Example
//!
//! ```
//! use has_many_merged::{impl_attributes, LoadedRelations, ModelTrait, RelationSlots};
//!
//! #[derive(Debug, Clone)]
//! struct Player { id: i64, team_id: i64, season: String }
//! impl_attributes!(Player { id, team_id, season });
//!
//! impl ModelTrait for Player {
//!     fn table_name() -> &'static str { "players" }
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct Team { id: i64, season: String, players: LoadedRelations<Player> }
//! impl_attributes!(Team { id, season });
//!
//! impl ModelTrait for Team {
//!     fn table_name() -> &'static str { "teams" }
//! }
//!
//! impl RelationSlots<Player> for Team {
//!     fn set_relation(&mut self, relation: &str, models: Vec<Player>) {
//!         self.players.set(relation, models);
//!     }
//!     fn relation(&self, relation: &str) -> Option<&[Player]> {
//!         self.players.get(relation)
//!     }
//! }
//! ```

use crate::value::{json_to_value, KeyType};
use sea_query::Value;
use std::collections::HashMap;

/// Read access to a record's attributes by column name
pub trait AttributeReadable {
    /// Get the value of `column`, or `None` when the record has no such attribute
    ///
    /// A present attribute holding SQL NULL is returned as a typed `None` value,
    /// e.g. `Value::Int(None)`, not as `None`.
    fn get_attribute(&self, column: &str) -> Option<Value>;
}

/// Table and identity metadata for a record type
pub trait ModelTrait: AttributeReadable {
    /// Name of the backing table
    fn table_name() -> &'static str;

    /// Name of the identity (primary key) column
    fn key_name() -> &'static str {
        "id"
    }

    /// Declared type of the identity column
    fn key_type() -> KeyType {
        KeyType::Integer
    }

    /// The identity value of this record
    fn get_key(&self) -> Option<Value> {
        self.get_attribute(Self::key_name())
    }

    /// Qualify `column` with this model's table name
    fn qualify_column(column: &str) -> String {
        if column.contains('.') {
            column.to_string()
        } else {
            format!("{}.{}", Self::table_name(), column)
        }
    }
}

/// Named relation slots on a parent record
///
/// During a match pass the matcher is the only writer of these slots. Other
/// code must not write the same slot while a pass is running.
pub trait RelationSlots<R> {
    /// Replace the collection stored under `relation`
    fn set_relation(&mut self, relation: &str, models: Vec<R>);

    /// The collection stored under `relation`, if it has been set
    fn relation(&self, relation: &str) -> Option<&[R]>;
}

/// Storage for named relation collections, for embedding in parent models
#[derive(Debug, Clone)]
pub struct LoadedRelations<R> {
    slots: HashMap<String, Vec<R>>,
}

impl<R> Default for LoadedRelations<R> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<R> LoadedRelations<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, relation: &str, models: Vec<R>) {
        self.slots.insert(relation.to_string(), models);
    }

    pub fn get(&self, relation: &str) -> Option<&[R]> {
        self.slots.get(relation).map(Vec::as_slice)
    }

    pub fn is_loaded(&self, relation: &str) -> bool {
        self.slots.contains_key(relation)
    }

    pub fn take(&mut self, relation: &str) -> Option<Vec<R>> {
        self.slots.remove(relation)
    }
}

impl<R> RelationSlots<R> for LoadedRelations<R> {
    fn set_relation(&mut self, relation: &str, models: Vec<R>) {
        self.set(relation, models);
    }

    fn relation(&self, relation: &str) -> Option<&[R]> {
        self.get(relation)
    }
}

impl AttributeReadable for serde_json::Map<String, serde_json::Value> {
    fn get_attribute(&self, column: &str) -> Option<Value> {
        self.get(column).map(json_to_value)
    }
}

impl AttributeReadable for HashMap<String, Value> {
    fn get_attribute(&self, column: &str) -> Option<Value> {
        self.get(column).cloned()
    }
}
