// ── Shape canonicalization ──
//
// A repeating element arrives as a list when it occurs twice and as a bare
// map when it occurs once. Every extractor funnels repeatable elements
// through here instead of checking for lists itself.
//
// Callers decide whether a key is present; these functions only ever see a
// value that exists. An empty element (`null`) carries no entries.

use serde_json::{Map, Value};
use thiserror::Error;

/// A value that should have been a map (or list of maps) but was not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a map{position}, found {found}")]
pub struct ShapeError {
    /// Empty for the value itself, `[i]` for a list element.
    pub position: String,
    pub found: &'static str,
}

/// Canonicalize a map-or-list-of-maps into an ordered sequence of maps.
pub fn normalize(value: &Value) -> Result<Vec<&Map<String, Value>>, ShapeError> {
    match value {
        Value::Object(map) => Ok(vec![map]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(ShapeError {
                    position: format!("[{idx}]"),
                    found: type_name(other),
                }),
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(ShapeError {
            position: String::new(),
            found: type_name(other),
        }),
    }
}

/// Canonicalize a value-or-list into an ordered sequence of values.
///
/// For leaf lists (client addresses, management addresses) whose items may
/// be strings or maps.
pub fn as_items(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_map_is_one_element() {
        let raw = json!({"name": "10.1.1.1"});
        let items = normalize(&raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "10.1.1.1");
    }

    #[test]
    fn list_length_is_preserved() {
        for n in 0..5 {
            let raw = Value::Array((0..n).map(|i| json!({ "name": i })).collect());
            let items = normalize(&raw).unwrap();
            assert_eq!(items.len(), n);
            for (i, item) in items.iter().enumerate() {
                assert_eq!(item["name"], i);
            }
        }
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let raw = json!({"name": "ge-0/0/0", "speed": "1000mbps"});
        let once: Vec<Value> = normalize(&raw)
            .unwrap()
            .into_iter()
            .map(|m| Value::Object(m.clone()))
            .collect();
        let wrapped = Value::Array(once.clone());
        let twice: Vec<Value> = normalize(&wrapped)
            .unwrap()
            .into_iter()
            .map(|m| Value::Object(m.clone()))
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_element_has_no_entries() {
        assert!(normalize(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn scalars_are_shape_errors() {
        let err = normalize(&json!("ge-0/0/0")).unwrap_err();
        assert_eq!(err.found, "string");

        let err = normalize(&json!([{"name": "a"}, 7])).unwrap_err();
        assert_eq!(err.position, "[1]");
        assert_eq!(err.found, "number");
    }

    #[test]
    fn leaf_lists_accept_scalars() {
        assert_eq!(as_items(&json!("10.0.0.0/8")).len(), 1);
        assert_eq!(as_items(&json!(["10.0.0.0/8", "192.168.0.0/16"])).len(), 2);
        assert!(as_items(&Value::Null).is_empty());
    }
}
