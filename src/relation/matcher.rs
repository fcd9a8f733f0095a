//! Eager-load matching of related records onto parents
//!
//! A [`RelationMatcher`] runs one batch through three steps:
//!
//! 1. [`init_relation`](RelationMatcher::init_relation) gives every parent an empty slot
//! 2. [`build_dictionary`](RelationMatcher::build_dictionary) groups the fetched records by key
//! 3. [`match_models`](RelationMatcher::match_models) assigns each parent its deduplicated group
//!
//! The matcher is parameterized by two key-extraction functions instead of
//! a fixed key layout. A single-column relation is the composite case with
//! one column, and a merged relation emits one key per foreign column.

use crate::collection::unique_by_identity;
use crate::error::{RelationError, Result};
use crate::model::{ModelTrait, RelationSlots};
use crate::relation::dictionary::RelationDictionary;
use crate::value::{CompositeKey, KeyPart};
use std::collections::HashMap;
use std::fmt;

type ParentKeyFn<P> = Box<dyn Fn(&P) -> Result<CompositeKey> + Send + Sync>;
type RelatedKeysFn<R> = Box<dyn Fn(&R) -> Result<Vec<CompositeKey>> + Send + Sync>;

pub struct RelationMatcher<P, R> {
    parent_key: ParentKeyFn<P>,
    related_keys: RelatedKeysFn<R>,
    verify_identities: bool,
}

impl<P, R> fmt::Debug for RelationMatcher<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationMatcher")
            .field("verify_identities", &self.verify_identities)
            .finish_non_exhaustive()
    }
}

impl<P, R> RelationMatcher<P, R> {
    /// Matcher where a related record may belong under several keys
    pub fn new<PF, RF>(parent_key: PF, related_keys: RF) -> Self
    where
        PF: Fn(&P) -> Result<CompositeKey> + Send + Sync + 'static,
        RF: Fn(&R) -> Result<Vec<CompositeKey>> + Send + Sync + 'static,
    {
        Self {
            parent_key: Box::new(parent_key),
            related_keys: Box::new(related_keys),
            verify_identities: false,
        }
    }

    /// Matcher where every related record has exactly one key
    pub fn single<PF, RF>(parent_key: PF, related_key: RF) -> Self
    where
        PF: Fn(&P) -> Result<CompositeKey> + Send + Sync + 'static,
        RF: Fn(&R) -> Result<CompositeKey> + Send + Sync + 'static,
        R: 'static,
    {
        Self::new(parent_key, move |related: &R| related_key(related).map(|k| vec![k]))
    }

    /// Fail the batch when one identity shows up under two different keys
    ///
    /// Only meaningful when every record has a single key.
    pub fn verify_identities(mut self, verify: bool) -> Self {
        self.verify_identities = verify;
        self
    }

    pub fn parent_key(&self, parent: &P) -> Result<CompositeKey> {
        (self.parent_key)(parent)
    }

    pub fn related_keys(&self, related: &R) -> Result<Vec<CompositeKey>> {
        (self.related_keys)(related)
    }
}

impl<P, R> RelationMatcher<P, R>
where
    R: ModelTrait + Clone,
{
    /// Group `related` by key, keeping input order within each key
    pub fn build_dictionary(&self, related: Vec<R>) -> Result<RelationDictionary<R>> {
        let mut dictionary = RelationDictionary::new();
        let mut identities: HashMap<KeyPart, CompositeKey> = HashMap::new();

        for model in related {
            let mut keys = (self.related_keys)(&model)?;

            if self.verify_identities && keys.len() == 1 {
                self.check_identity(&model, &keys[0], &mut identities)?;
            }

            let Some(last) = keys.pop() else {
                continue;
            };
            for key in keys {
                dictionary.insert(key, model.clone());
            }
            dictionary.insert(last, model);
        }

        Ok(dictionary)
    }

    fn check_identity(
        &self,
        model: &R,
        key: &CompositeKey,
        seen: &mut HashMap<KeyPart, CompositeKey>,
    ) -> Result<()> {
        let identity = model
            .get_key()
            .map(KeyPart::from)
            .ok_or_else(|| RelationError::missing_column(R::table_name(), R::key_name()))?;
        if identity.is_null() {
            return Ok(());
        }

        match seen.get(&identity) {
            Some(first) if first != key => Err(RelationError::IdentityCollision {
                table: R::table_name().to_string(),
                identity: identity.to_string(),
                first: first.to_string(),
                second: key.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                seen.insert(identity, key.clone());
                Ok(())
            }
        }
    }
}

impl<P, R> RelationMatcher<P, R>
where
    P: RelationSlots<R>,
    R: ModelTrait + Clone,
{
    /// Set every parent's `relation` slot to an empty collection
    pub fn init_relation<'a>(&self, parents: &'a mut [P], relation: &str) -> &'a mut [P] {
        for parent in parents.iter_mut() {
            parent.set_relation(relation, Vec::new());
        }
        parents
    }

    /// Assign each parent the related records sharing its key
    ///
    /// Parents without a match, or whose key contains NULL, keep whatever the
    /// slot held before (an empty collection after `init_relation`). Every
    /// key and group is resolved before the first slot is written, so an
    /// error leaves all parents untouched.
    pub fn match_models<'a>(
        &self,
        parents: &'a mut [P],
        related: Vec<R>,
        relation: &str,
    ) -> Result<&'a mut [P]> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("has_many_merged.match", relation, parents = parents.len())
            .entered();

        let related_count = related.len();
        let dictionary = self.build_dictionary(related)?;

        let mut resolved: Vec<Option<Vec<R>>> = Vec::with_capacity(parents.len());
        for parent in parents.iter() {
            let key = (self.parent_key)(parent)?;
            let group = match dictionary.get(&key) {
                Some(models) if !key.has_null() => Some(unique_by_identity(models.to_vec())?),
                _ => None,
            };
            resolved.push(group);
        }

        let mut matched = 0usize;
        for (parent, group) in parents.iter_mut().zip(resolved) {
            if let Some(models) = group {
                parent.set_relation(relation, models);
                matched += 1;
            }
        }

        log::debug!(
            "matched relation `{}`: {} parent(s), {} related record(s), {} key(s), {} parent(s) with results",
            relation,
            parents.len(),
            related_count,
            dictionary.len(),
            matched
        );

        Ok(parents)
    }
}
