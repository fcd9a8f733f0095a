//! `RelationExecutor` - the query execution seam
//!
//! Relationship resolution never talks to a database. It hands a finished
//! `sea_query::SelectStatement` to a [`RelationExecutor`], which renders it
//! with the backend of its choice, runs it and decodes the rows into related
//! records.

use crate::error::Result;
use sea_query::SelectStatement;

/// Fetches related records for an eager-load query
///
/// # Examples
///
/// ```no_run
/// use has_many_merged::{RelationError, RelationExecutor};
/// use has_many_merged::sea_query::{PostgresQueryBuilder, SelectStatement};
///
/// struct PgExecutor;
///
/// # #[derive(Clone)] struct Player;
/// impl RelationExecutor<Player> for PgExecutor {
///     fn fetch_all(&self, query: &SelectStatement) -> Result<Vec<Player>, RelationError> {
///         let (sql, _values) = query.build(PostgresQueryBuilder);
///         // run `sql` with the bound values and decode each row
///         # let _ = sql;
///         Ok(vec![])
///     }
/// }
/// ```
pub trait RelationExecutor<R> {
    /// Execute `query` and return every decoded row
    ///
    /// # Errors
    ///
    /// Implementations report driver and decoding failures as
    /// [`RelationError::Query`](crate::RelationError::Query).
    fn fetch_all(&self, query: &SelectStatement) -> Result<Vec<R>>;
}

impl<R, E> RelationExecutor<R> for &E
where
    E: RelationExecutor<R> + ?Sized,
{
    fn fetch_all(&self, query: &SelectStatement) -> Result<Vec<R>> {
        (**self).fetch_all(query)
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockExecutor;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::*;
    use crate::error::RelationError;
    use std::cell::RefCell;

    /// Executor returning canned rows and recording the queries it received
    ///
    /// Rows are returned as-is; the query is not evaluated.
    #[derive(Debug, Default)]
    pub struct MockExecutor<R> {
        rows: Vec<R>,
        failure: Option<String>,
        queries: RefCell<Vec<SelectStatement>>,
    }

    impl<R: Clone> MockExecutor<R> {
        pub fn new(rows: Vec<R>) -> Self {
            Self {
                rows,
                failure: None,
                queries: RefCell::new(Vec::new()),
            }
        }

        /// An executor whose every fetch fails with `message`
        pub fn failing(message: &str) -> Self {
            Self {
                rows: Vec::new(),
                failure: Some(message.to_string()),
                queries: RefCell::new(Vec::new()),
            }
        }

        /// Queries received so far, in order
        pub fn queries(&self) -> Vec<SelectStatement> {
            self.queries.borrow().clone()
        }
    }

    impl<R: Clone> RelationExecutor<R> for MockExecutor<R> {
        fn fetch_all(&self, query: &SelectStatement) -> Result<Vec<R>> {
            self.queries.borrow_mut().push(query.clone());
            match &self.failure {
                Some(message) => Err(RelationError::Query(message.clone())),
                None => Ok(self.rows.clone()),
            }
        }
    }
}
