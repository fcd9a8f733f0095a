//! Error types for relationship resolution

use thiserror::Error;

/// Errors raised while defining or resolving a relationship.
///
/// All variants are structural: they come from the relationship definition
/// or from the shape of the fetched data, so retrying never helps. Any error
/// during a match pass aborts the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// A declared key column is absent from a materialized record
    #[error("column `{column}` is missing from a `{table}` record")]
    MissingColumn { table: String, column: String },

    /// Local and foreign key column lists have different lengths
    #[error("relationship declares {local} local key column(s) but {foreign} foreign key column(s)")]
    KeyColumnCountMismatch { local: usize, foreign: usize },

    /// A key column list was empty
    #[error("relationship declares no {side} key columns")]
    EmptyKey { side: &'static str },

    /// A column name is not a plain SQL identifier
    #[error("invalid column identifier `{0}`")]
    InvalidIdentifier(String),

    /// Raw integer membership was selected but a key value is not an integer
    #[error("column `{column}` uses raw integer membership but holds non-integer value {value}")]
    TypeComparisonAmbiguity { column: String, value: String },

    /// The same related identity was seen under two different key tuples
    #[error("`{table}` identity {identity} appears under key {first} and key {second}")]
    IdentityCollision {
        table: String,
        identity: String,
        first: String,
        second: String,
    },

    /// The external executor failed to fetch related records
    #[error("query error: {0}")]
    Query(String),
}

impl RelationError {
    pub(crate) fn missing_column(table: &str, column: &str) -> Self {
        RelationError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelationError>;
