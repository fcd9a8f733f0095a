//! Key selection for eager loading
//!
//! Decides which membership predicate to use for each key column and
//! extracts composite key tuples from records.

use crate::error::{RelationError, Result};
use crate::model::ModelTrait;
use crate::value::{CompositeKey, KeyPart, KeyType};
use std::fmt;

/// How a batch membership predicate is built for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipMethod {
    /// Integer literals inlined into `column IN (...)`, no per-value binding
    RawIntegerMembership,
    /// Bound parameters, valid for any value type
    GenericMembership,
}

impl fmt::Display for MembershipMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipMethod::RawIntegerMembership => f.write_str("raw integer"),
            MembershipMethod::GenericMembership => f.write_str("generic"),
        }
    }
}

/// Choose the membership method for `candidate_column`
///
/// Raw integer membership is only safe when the filtered values are integral
/// identities: the candidate must be the identity column itself and the
/// declared type must be an integer kind. A qualified candidate such as
/// `teams.id` is compared by its last segment.
pub fn choose_membership_method(
    identity_column: &str,
    candidate_column: &str,
    candidate_type: &KeyType,
) -> MembershipMethod {
    let column = candidate_column
        .rsplit('.')
        .next()
        .unwrap_or(candidate_column);

    if column == identity_column && candidate_type.is_integer() {
        MembershipMethod::RawIntegerMembership
    } else {
        MembershipMethod::GenericMembership
    }
}

/// Read `columns` off `record`, in order, into a composite key
pub fn extract_key_tuple<M, S>(record: &M, columns: &[S]) -> Result<CompositeKey>
where
    M: ModelTrait,
    S: AsRef<str>,
{
    columns
        .iter()
        .map(|column| {
            record
                .get_attribute(column.as_ref())
                .map(KeyPart::from)
                .ok_or_else(|| RelationError::missing_column(M::table_name(), column.as_ref()))
        })
        .collect::<Result<Vec<_>>>()
        .map(CompositeKey::new)
}

/// The foreign key tuple of a related record
pub fn extract_foreign_key_tuple<R, S>(related: &R, foreign_keys: &[S]) -> Result<CompositeKey>
where
    R: ModelTrait,
    S: AsRef<str>,
{
    extract_key_tuple(related, foreign_keys)
}

/// The local key tuple of a parent record
pub fn extract_local_key_value<P, S>(parent: &P, local_keys: &[S]) -> Result<CompositeKey>
where
    P: ModelTrait,
    S: AsRef<str>,
{
    extract_key_tuple(parent, local_keys)
}

/// One single-column key per foreign key column, for merged relations
///
/// A record referencing the same parent through several columns yields that
/// key once.
pub fn extract_merged_keys<R, S>(related: &R, foreign_keys: &[S]) -> Result<Vec<CompositeKey>>
where
    R: ModelTrait,
    S: AsRef<str>,
{
    let mut keys: Vec<CompositeKey> = Vec::with_capacity(foreign_keys.len());
    for column in foreign_keys {
        let key = extract_key_tuple(related, std::slice::from_ref(column))?;
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}
