//! Conversion from JSON row values to `sea_query::Value`
//!
//! Executors that decode rows as JSON objects can hand them to the matcher
//! directly; see the `AttributeReadable` impl for `serde_json::Map`.

use sea_query::Value;
use serde_json::Value as Json;

/// Convert a JSON scalar into the `sea_query::Value` a typed column would hold
///
/// - integers become `BigInt` (or `BigUnsigned` above `i64::MAX`)
/// - other numbers become `Double`
/// - strings and booleans map directly
/// - `null` becomes a typed NULL
/// - arrays and objects stay as `Json`
pub fn json_to_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Json(None),
        Json::Bool(b) => Value::Bool(Some(*b)),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::BigInt(Some(i))
            } else if let Some(u) = n.as_u64() {
                Value::BigUnsigned(Some(u))
            } else {
                Value::Double(n.as_f64())
            }
        }
        Json::String(s) => Value::String(Some(s.clone())),
        other => Value::Json(Some(Box::new(other.clone()))),
    }
}
