//! Eager-load predicate construction.
//!
//! Turns the parents' key values into the `WHERE` condition of the single
//! batch query that fetches all related records (the "selectinload"
//! strategy):
//!
//! - single column: `fk IN (...)`
//! - composite key: `(fk1 = .. AND fk2 = ..) OR (fk1 = .. AND fk2 = ..) ...`
//! - merged columns: `fk1 IN (...) OR fk2 IN (...)`
//!
//! Each column is rendered according to its [`MembershipMethod`]. Generic
//! membership binds parameters through sea-query, while raw integer
//! membership inlines integer literals with [`Expr::cust`]. Column names are
//! always quoted by the query builder.

use crate::config::MixedKeyPolicy;
use crate::error::{RelationError, Result};
use crate::relation::key_selector::MembershipMethod;
use crate::value::KeyPart;
use sea_query::{Condition, DynIden, Expr, ExprTrait, Value};

/// A condition that matches no rows, for batches without usable keys
pub fn no_match() -> Condition {
    Condition::all().add(Expr::cust("1 = 0"))
}

/// `table.column` as a sea-query column expression
fn column_expr(table: &str, column: &str) -> Expr {
    Expr::col((
        DynIden::from(table.to_string()),
        DynIden::from(column.to_string()),
    ))
}

/// Render an integer key value as a SQL literal
fn integer_literal(value: &Value) -> Option<String> {
    KeyPart::from(value).as_integer().map(|i| i.to_string())
}

/// Confirm or downgrade the chosen method of each column against the actual values
///
/// `rows` holds one value per column. A raw integer column holding a
/// non-integer value fails with [`RelationError::TypeComparisonAmbiguity`]
/// under [`MixedKeyPolicy::Fail`], and becomes generic under
/// [`MixedKeyPolicy::Fallback`].
pub fn resolve_methods(
    columns: &[String],
    methods: &[MembershipMethod],
    rows: &[Vec<Value>],
    policy: MixedKeyPolicy,
) -> Result<Vec<MembershipMethod>> {
    let mut resolved = methods.to_vec();

    for (index, method) in resolved.iter_mut().enumerate() {
        if *method != MembershipMethod::RawIntegerMembership {
            continue;
        }
        let offending = rows
            .iter()
            .filter_map(|row| row.get(index))
            .find(|value| integer_literal(value).is_none());

        if let Some(value) = offending {
            let column = columns.get(index).cloned().unwrap_or_default();
            match policy {
                MixedKeyPolicy::Fail => {
                    return Err(RelationError::TypeComparisonAmbiguity {
                        column,
                        value: KeyPart::from(value).to_string(),
                    });
                }
                MixedKeyPolicy::Fallback => {
                    log::warn!(
                        "column `{}` holds non-integer key {}, using generic membership",
                        column,
                        KeyPart::from(value)
                    );
                    *method = MembershipMethod::GenericMembership;
                }
            }
        }
    }

    Ok(resolved)
}

/// `table.column IN (values)` using `method`
///
/// `method` must already be resolved against `values`; non-integer values in
/// a raw integer column are skipped.
pub fn in_condition(
    table: &str,
    column: &str,
    method: MembershipMethod,
    values: Vec<Value>,
) -> Condition {
    if values.is_empty() {
        return no_match();
    }

    let expr = match method {
        MembershipMethod::RawIntegerMembership => {
            let literals = values.iter().filter_map(integer_literal).map(Expr::cust);
            column_expr(table, column).is_in(literals)
        }
        MembershipMethod::GenericMembership => column_expr(table, column).is_in(values),
    };
    Condition::all().add(expr)
}

/// `table.column = value` using `method`
fn eq_expr(table: &str, column: &str, method: MembershipMethod, value: Value) -> Expr {
    match (method, integer_literal(&value)) {
        (MembershipMethod::RawIntegerMembership, Some(literal)) => {
            column_expr(table, column).eq(Expr::cust(literal))
        }
        _ => column_expr(table, column).eq(value),
    }
}

/// OR of per-row AND equalities over `columns`
///
/// A one-column key collapses to [`in_condition`].
pub fn tuple_condition(
    table: &str,
    columns: &[String],
    methods: &[MembershipMethod],
    rows: Vec<Vec<Value>>,
) -> Condition {
    if rows.is_empty() {
        return no_match();
    }

    if let ([column], [method]) = (columns, methods) {
        let values = rows.into_iter().filter_map(|row| row.into_iter().next()).collect();
        return in_condition(table, column, *method, values);
    }

    let mut any = Condition::any();
    for row in rows {
        let mut all = Condition::all();
        for ((column, method), value) in columns.iter().zip(methods).zip(row) {
            all = all.add(eq_expr(table, column, *method, value));
        }
        any = any.add(all);
    }
    any
}

/// OR of `fk IN (values)` over every column, for merged relations
pub fn merged_condition(
    table: &str,
    columns: &[String],
    methods: &[MembershipMethod],
    values: Vec<Value>,
) -> Condition {
    if values.is_empty() {
        return no_match();
    }

    let mut any = Condition::any();
    for (column, method) in columns.iter().zip(methods) {
        any = any.add(in_condition(table, column, *method, values.clone()));
    }
    any
}
