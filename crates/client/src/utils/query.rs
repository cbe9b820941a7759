//! Query-string building.

use serde_json::Value;

/// Build a query string from key/value pairs, keeping insertion order.
///
/// Pairs whose value is falsy (`null`, `false`, `0`, `""`) are skipped.
/// Values are URL-encoded; keys are used as given. The result has no leading
/// `?`.
///
/// ```
/// use boxoffice_client::utils::build_query;
/// use serde_json::{Value, json};
///
/// let query = build_query([("a", json!(1)), ("b", Value::Null), ("c", json!("x y"))]);
/// assert_eq!(query, "a=1&c=x%20y");
/// ```
pub fn build_query<I, K>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    pairs
        .into_iter()
        .filter(|(_, value)| is_truthy(value))
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            format!("{}={}", key.as_ref(), urlencoding::encode(&text))
        })
        .collect::<Vec<_>>()
        .join("&")
}

// NaN can't be represented in a `Value`; `json!(f64::NAN)` is already `null`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
