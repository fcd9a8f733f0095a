//! `HasManyMerged` - one-to-many relation over composite or merged keys
//!
//! Two key layouts are supported:
//!
//! - **Composite**: the related table references the parent through several
//!   columns compared as one tuple, e.g. `players(team_id, season)` →
//!   `teams(id, season)`.
//! - **Merged**: several related columns each reference the same single
//!   parent key, and a record belongs to every parent it references, e.g.
//!   `matches(home_team_id, away_team_id)` → `teams(id)`.
//!
//! # Example
//!
//! ```no_run
//! use has_many_merged::HasManyMerged;
//! # use has_many_merged::{impl_attributes, LoadedRelations, ModelTrait, RelationSlots};
//! # #[derive(Debug, Clone)] struct Player { id: i64, team_id: i64, season: String }
//! # impl_attributes!(Player { id, team_id, season });
//! # impl ModelTrait for Player { fn table_name() -> &'static str { "players" } }
//! # #[derive(Debug, Clone)] struct Team { id: i64, season: String, rel: LoadedRelations<Player> }
//! # impl_attributes!(Team { id, season });
//! # impl ModelTrait for Team { fn table_name() -> &'static str { "teams" } }
//! # impl RelationSlots<Player> for Team {
//! #     fn set_relation(&mut self, r: &str, m: Vec<Player>) { self.rel.set(r, m) }
//! #     fn relation(&self, r: &str) -> Option<&[Player]> { self.rel.get(r) }
//! # }
//! # let mut teams: Vec<Team> = vec![];
//! # struct Db;
//! # impl has_many_merged::RelationExecutor<Player> for Db {
//! #     fn fetch_all(&self, _: &has_many_merged::sea_query::SelectStatement)
//! #         -> Result<Vec<Player>, has_many_merged::RelationError> { Ok(vec![]) }
//! # }
//! # let executor = Db;
//!
//! let roster = HasManyMerged::<Team, Player>::new(["team_id", "season"], ["id", "season"])?;
//! roster.get_eager(&mut teams, "players", &executor)?;
//! # Ok::<(), has_many_merged::RelationError>(())
//! ```

use crate::collection::unique_by_identity;
use crate::config::EagerLoadConfig;
use crate::error::{RelationError, Result};
use crate::executor::RelationExecutor;
use crate::model::{ModelTrait, RelationSlots};
use crate::relation::columns::KeyColumns;
use crate::relation::eager::{merged_condition, resolve_methods, tuple_condition};
use crate::relation::key_selector::{
    choose_membership_method, extract_foreign_key_tuple, extract_local_key_value,
    extract_merged_keys, MembershipMethod,
};
use crate::relation::matcher::RelationMatcher;
use crate::value::CompositeKey;
use sea_query::{Asterisk, Condition, Query, SelectStatement, Value};
use std::collections::HashSet;

/// How the related columns reference the parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMode {
    /// Foreign columns form one tuple paired positionally with the local columns
    Composite,
    /// Each foreign column alone references the single local column
    Merged,
}

/// A one-to-many relationship from `P` to `R`
#[derive(Debug)]
pub struct HasManyMerged<P, R> {
    foreign_keys: KeyColumns,
    local_keys: KeyColumns,
    mode: KeyMode,
    config: EagerLoadConfig,
    matcher: RelationMatcher<P, R>,
}

impl<P, R> HasManyMerged<P, R>
where
    P: ModelTrait + 'static,
    R: ModelTrait + Clone + 'static,
{
    /// Composite relation: `foreign_keys[i]` on `R` references `local_keys[i]` on `P`
    ///
    /// # Errors
    ///
    /// `KeyColumnCountMismatch` when the lists differ in length, `EmptyKey`
    /// for an empty list and `InvalidIdentifier` for a name that is not a
    /// plain SQL identifier.
    pub fn new<F, L, S, T>(foreign_keys: F, local_keys: L) -> Result<Self>
    where
        F: IntoIterator<Item = S>,
        L: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let foreign_keys = KeyColumns::new("foreign", foreign_keys)?;
        let local_keys = KeyColumns::new("local", local_keys)?;
        if foreign_keys.arity() != local_keys.arity() {
            return Err(RelationError::KeyColumnCountMismatch {
                local: local_keys.arity(),
                foreign: foreign_keys.arity(),
            });
        }
        Ok(Self::build(foreign_keys, local_keys, KeyMode::Composite, EagerLoadConfig::default()))
    }

    /// Merged relation: every column in `foreign_keys` on `R` references `local_key` on `P`
    pub fn merged<F, S>(foreign_keys: F, local_key: impl Into<String>) -> Result<Self>
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let foreign_keys = KeyColumns::new("foreign", foreign_keys)?;
        let local_keys = KeyColumns::new("local", [local_key.into()])?;
        Ok(Self::build(foreign_keys, local_keys, KeyMode::Merged, EagerLoadConfig::default()))
    }

    fn build(
        foreign_keys: KeyColumns,
        local_keys: KeyColumns,
        mode: KeyMode,
        config: EagerLoadConfig,
    ) -> Self {
        let local = local_keys.clone();
        let foreign = foreign_keys.clone();
        let parent_key = move |parent: &P| extract_local_key_value(parent, local.as_slice());

        let matcher = match mode {
            KeyMode::Composite => RelationMatcher::single(parent_key, move |related: &R| {
                extract_foreign_key_tuple(related, foreign.as_slice())
            })
            .verify_identities(config.verify_identities),
            KeyMode::Merged => RelationMatcher::new(parent_key, move |related: &R| {
                extract_merged_keys(related, foreign.as_slice())
            }),
        };

        Self {
            foreign_keys,
            local_keys,
            mode,
            config,
            matcher,
        }
    }

    /// Replace the eager-load settings
    pub fn with_config(self, config: EagerLoadConfig) -> Self {
        Self::build(self.foreign_keys, self.local_keys, self.mode, config)
    }
}

impl<P, R> HasManyMerged<P, R>
where
    P: ModelTrait,
    R: ModelTrait + Clone,
{
    pub fn foreign_keys(&self) -> &[String] {
        self.foreign_keys.as_slice()
    }

    pub fn local_keys(&self) -> &[String] {
        self.local_keys.as_slice()
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    pub fn config(&self) -> &EagerLoadConfig {
        &self.config
    }

    /// The parent's local key tuple
    pub fn parent_key(&self, parent: &P) -> Result<CompositeKey> {
        self.matcher.parent_key(parent)
    }

    /// Local key columns qualified with the parent table
    pub fn qualified_parent_key_names(&self) -> Vec<String> {
        self.local_keys.qualified(P::table_name())
    }

    /// Foreign key columns qualified with the related table
    pub fn qualified_foreign_key_names(&self) -> Vec<String> {
        self.foreign_keys.qualified(R::table_name())
    }

    /// The membership method chosen for each local key column
    ///
    /// Values in the batch predicate come from the parent's local key, so
    /// the raw integer path is only taken for the parent's own integer
    /// identity column.
    fn local_methods(&self) -> Vec<MembershipMethod> {
        self.qualified_parent_key_names()
            .iter()
            .map(|column| {
                if self.config.integer_fast_path {
                    choose_membership_method(P::key_name(), column, &P::key_type())
                } else {
                    MembershipMethod::GenericMembership
                }
            })
            .collect()
    }

    /// Filtered column and membership method pairs for the batch predicate
    pub fn membership_methods(&self) -> Vec<(String, MembershipMethod)> {
        let methods = self.local_methods();
        let foreign = self.qualified_foreign_key_names();
        match self.mode {
            KeyMode::Composite => foreign.into_iter().zip(methods).collect(),
            KeyMode::Merged => foreign
                .into_iter()
                .map(|column| (column, methods[0]))
                .collect(),
        }
    }

    /// Raw local key values of `parent`, in column order
    fn local_values(&self, parent: &P) -> Result<Vec<Value>> {
        self.local_keys
            .iter()
            .map(|column| {
                parent
                    .get_attribute(column)
                    .ok_or_else(|| RelationError::missing_column(P::table_name(), column))
            })
            .collect()
    }

    /// Distinct, NULL-free local key rows across `parents`, in first-seen order
    fn key_rows(&self, parents: &[P]) -> Result<Vec<Vec<Value>>> {
        let mut seen: HashSet<CompositeKey> = HashSet::new();
        let mut rows = Vec::new();
        for parent in parents {
            let values = self.local_values(parent)?;
            let key = CompositeKey::from_values(&values);
            if !key.has_null() && seen.insert(key) {
                rows.push(values);
            }
        }
        Ok(rows)
    }

    /// The `WHERE` condition fetching every related record of `parents`
    pub fn eager_constraints(&self, parents: &[P]) -> Result<Condition> {
        let rows = self.key_rows(parents)?;
        let methods = resolve_methods(
            &self.qualified_parent_key_names(),
            &self.local_methods(),
            &rows,
            self.config.mixed_key_policy,
        )?;

        log::trace!(
            "eager constraints for `{}`: {} key row(s), methods {:?}",
            R::table_name(),
            rows.len(),
            methods
        );

        let table = R::table_name();
        let condition = match self.mode {
            KeyMode::Composite => tuple_condition(table, self.foreign_keys(), &methods, rows),
            KeyMode::Merged => {
                let values = rows.into_iter().flatten().collect();
                let methods = vec![methods[0]; self.foreign_keys.arity()];
                merged_condition(table, self.foreign_keys(), &methods, values)
            }
        };
        Ok(condition)
    }

    /// `SELECT * FROM related WHERE <eager constraints>`
    pub fn eager_query(&self, parents: &[P]) -> Result<SelectStatement> {
        let condition = self.eager_constraints(parents)?;
        let mut query = Query::select();
        query
            .column(Asterisk)
            .from(R::table_name())
            .cond_where(condition);
        Ok(query)
    }

    /// Fetch and return the related records of a single parent
    ///
    /// No relation slot is written. A parent whose key contains NULL has no
    /// related records and no query is issued.
    pub fn get_results<E>(&self, parent: &P, executor: &E) -> Result<Vec<R>>
    where
        E: RelationExecutor<R> + ?Sized,
    {
        let key = self.parent_key(parent)?;
        if key.has_null() {
            return Ok(Vec::new());
        }

        let query = self.eager_query(std::slice::from_ref(parent))?;
        let related = executor.fetch_all(&query)?;
        let dictionary = self.matcher.build_dictionary(related)?;

        match dictionary.get(&key) {
            Some(models) => unique_by_identity(models.to_vec()),
            None => Ok(Vec::new()),
        }
    }
}

impl<P, R> HasManyMerged<P, R>
where
    P: ModelTrait + RelationSlots<R>,
    R: ModelTrait + Clone,
{
    /// Set every parent's `relation` slot to an empty collection
    pub fn init_relation<'a>(&self, parents: &'a mut [P], relation: &str) -> &'a mut [P] {
        self.matcher.init_relation(parents, relation)
    }

    /// Attach the fetched `related` records to their parents
    pub fn match_models<'a>(
        &self,
        parents: &'a mut [P],
        related: Vec<R>,
        relation: &str,
    ) -> Result<&'a mut [P]> {
        self.matcher.match_models(parents, related, relation)
    }

    /// Run a full eager load: one query, then init and match
    ///
    /// Slots are only touched once the fetch has succeeded.
    pub fn get_eager<'a, E>(
        &self,
        parents: &'a mut [P],
        relation: &str,
        executor: &E,
    ) -> Result<&'a mut [P]>
    where
        E: RelationExecutor<R> + ?Sized,
    {
        if parents.is_empty() {
            return Ok(parents);
        }

        let query = self.eager_query(parents)?;
        let related = executor.fetch_all(&query)?;

        log::debug!(
            "eager loading `{}` for {} `{}` parent(s): fetched {} `{}` record(s)",
            relation,
            parents.len(),
            P::table_name(),
            related.len(),
            R::table_name()
        );

        self.init_relation(parents, relation);
        self.match_models(parents, related, relation)
    }
}
