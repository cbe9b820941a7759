//! Picking the modified subset of a form's values.

use serde::Serialize;
use serde_json::{Map, Value};

/// Keep only the entries whose key `is_modified` accepts.
///
/// Values are cloned untouched, so numbers stay numbers and nested objects
/// stay nested.
#[must_use]
pub fn changed_fields<P>(values: &Map<String, Value>, is_modified: P) -> Map<String, Value>
where
    P: Fn(&str) -> bool,
{
    values
        .iter()
        .filter(|(key, _)| is_modified(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// [`changed_fields`] for a typed record.
///
/// # Errors
///
/// Returns an error if `record` fails to serialize or isn't a struct or map.
pub fn changed_fields_of<T, P>(record: &T, is_modified: P) -> Result<Map<String, Value>, serde_json::Error>
where
    T: Serialize + ?Sized,
    P: Fn(&str) -> bool,
{
    match serde_json::to_value(record)? {
        Value::Object(values) => Ok(changed_fields(&values, is_modified)),
        other => Err(serde::ser::Error::custom(format!(
            "expected a record with named fields, got {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boxoffice_core::PromoterAccountUpdate;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_only_modified_keys() {
        let values = json!({ "a": 1, "b": 2, "c": 3 });
        let changed = changed_fields(values.as_object().unwrap(), |key| key == "b");
        assert_eq!(Value::Object(changed), json!({ "b": 2 }));
    }

    #[test]
    fn test_value_types_preserved() {
        let values = json!({ "tags": ["a", "b"], "limit": 4, "name": "VIP" });
        let changed = changed_fields(values.as_object().unwrap(), |key| key != "name");
        assert_eq!(changed["tags"], json!(["a", "b"]));
        assert_eq!(changed["limit"], json!(4));
        assert!(!changed.contains_key("name"));
    }

    #[test]
    fn test_typed_record() {
        let update = PromoterAccountUpdate {
            first_name: Some("Kay".to_string()),
            phone: Some("+2348012345678".to_string()),
            ..Default::default()
        };
        let changed = changed_fields_of(&update, |key| key == "phone").unwrap();
        assert_eq!(Value::Object(changed), json!({ "phone": "+2348012345678" }));

        assert!(changed_fields_of(&42, |_| true).is_err());
    }
}
