//! Ordered key column lists
//!
//! `KeyColumns` holds the column names of one side of a relationship, in
//! positional order. Local column `i` pairs with foreign column `i`. A single
//! column key is a list of length one.

use crate::error::{RelationError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Validated, ordered list of key column names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyColumns(Vec<String>);

impl KeyColumns {
    /// Build a column list, rejecting empty lists and non-identifier names
    ///
    /// `side` names the relationship side in the error (`"local"`/`"foreign"`).
    /// Names are inlined into raw SQL for integer membership predicates, so
    /// only plain identifiers are accepted.
    pub fn new<I, S>(side: &'static str, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(RelationError::EmptyKey { side });
        }
        if let Some(bad) = columns.iter().find(|c| !IDENTIFIER.is_match(c)) {
            return Err(RelationError::InvalidIdentifier(bad.clone()));
        }
        Ok(KeyColumns(columns))
    }

    /// Number of columns
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// `table.column` for every column, in order
    pub fn qualified(&self, table: &str) -> Vec<String> {
        self.0.iter().map(|c| format!("{table}.{c}")).collect()
    }
}

impl<'a> IntoIterator for &'a KeyColumns {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
