/// Implement [`AttributeReadable`](crate::AttributeReadable) for a plain struct.
///
/// Each listed field is exposed under its own name as a column. Field types
/// must be convertible into `sea_query::Value` (integers, `String`, `bool`,
/// `Option<T>` of those, ...).
///
/// ```
/// use has_many_merged::{impl_attributes, AttributeReadable};
/// use has_many_merged::sea_query::Value;
///
/// #[derive(Debug, Clone)]
/// struct Match { id: i64, home_id: i64, away_id: Option<i64> }
/// impl_attributes!(Match { id, home_id, away_id });
///
/// let m = Match { id: 1, home_id: 2, away_id: None };
/// assert_eq!(m.get_attribute("home_id"), Some(Value::BigInt(Some(2))));
/// assert_eq!(m.get_attribute("away_id"), Some(Value::BigInt(None)));
/// assert_eq!(m.get_attribute("score"), None);
/// ```
#[macro_export]
macro_rules! impl_attributes {
    ($model:ty { $($field:ident),* $(,)? }) => {
        impl $crate::AttributeReadable for $model {
            fn get_attribute(&self, column: &str) -> Option<$crate::sea_query::Value> {
                match column {
                    $(stringify!($field) => Some($crate::sea_query::Value::from(self.$field.clone())),)*
                    _ => None,
                }
            }
        }
    };
}
