//! Grouping map from composite key to related records
//!
//! A `RelationDictionary` is built once per eager-load batch and dropped when
//! the match pass ends. Records sharing a key keep their input order.

use crate::value::CompositeKey;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RelationDictionary<R> {
    entries: HashMap<CompositeKey, Vec<R>>,
}

impl<R> Default for RelationDictionary<R> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<R> RelationDictionary<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `model` to the entry for `key`, creating the entry if absent
    pub fn insert(&mut self, key: CompositeKey, model: R) {
        self.entries.entry(key).or_default().push(model);
    }

    pub fn get(&self, key: &CompositeKey) -> Option<&[R]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &CompositeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records across all entries
    pub fn total_records(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CompositeKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompositeKey, &[R])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
