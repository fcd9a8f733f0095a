//! Collection helpers for related records

use crate::error::{RelationError, Result};
use crate::model::ModelTrait;
use crate::value::KeyPart;
use std::collections::HashSet;

/// Remove records whose identity was already seen, keeping first-seen order
///
/// Records with a NULL identity cannot be told apart and are always kept.
/// Fails with [`RelationError::MissingColumn`] when a record has no identity
/// attribute at all.
pub fn unique_by_identity<R>(models: Vec<R>) -> Result<Vec<R>>
where
    R: ModelTrait,
{
    let mut seen: HashSet<KeyPart> = HashSet::with_capacity(models.len());
    let mut unique = Vec::with_capacity(models.len());

    for model in models {
        let identity = model
            .get_key()
            .map(KeyPart::from)
            .ok_or_else(|| RelationError::missing_column(R::table_name(), R::key_name()))?;

        if identity.is_null() || seen.insert(identity) {
            unique.push(model);
        }
    }

    Ok(unique)
}
