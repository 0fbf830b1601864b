// ── Junos JSON → raw payload ──
//
// The REST API renders operational XML as JSON where every element is an
// array of `{"data": ..., "attributes": {...}}` objects. We fold that back
// into the element-tree convention the normalizers consume:
//
//   - an element that occurs once becomes its value, repeated ones a list
//   - text-only elements become strings
//   - attributes become `@name` keys, next to `#text` for the text
//   - empty elements (`[null]`) become `null`

use serde_json::{Map, Value};

/// Decode an operational RPC reply.
pub fn decode_operational(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(decode_children(map)),
        other => other,
    }
}

/// Decode a configuration reply.
///
/// Configuration JSON already uses plain keys and scalar leaves; only flag
/// leaves (`[null]`) and `@` metadata blocks need rewriting.
pub fn decode_config(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| key != "@")
                .map(|(key, value)| (key, decode_config(value)))
                .collect(),
        ),
        Value::Array(items) if is_flag(&items) => Value::Null,
        Value::Array(items) => Value::Array(items.into_iter().map(decode_config).collect()),
        other => other,
    }
}

fn is_flag(items: &[Value]) -> bool {
    matches!(items, [Value::Null])
}

fn decode_children(map: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        if key == "attributes" {
            continue;
        }
        out.insert(key, decode_occurrences(value));
    }
    out
}

fn decode_occurrences(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let mut decoded: Vec<Value> = items.into_iter().map(decode_element).collect();
            if decoded.len() == 1 {
                decoded.pop().unwrap_or(Value::Null)
            } else {
                Value::Array(decoded)
            }
        }
        other => decode_element(other),
    }
}

fn decode_element(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };

    let attributes = match map.remove("attributes") {
        Some(Value::Object(attrs)) => attrs,
        _ => Map::new(),
    };

    if let Some(data) = map.remove("data") {
        if attributes.is_empty() {
            return data;
        }
        let mut out = Map::with_capacity(attributes.len() + 1);
        out.insert("#text".into(), data);
        push_attributes(&mut out, attributes);
        return Value::Object(out);
    }

    let mut out = decode_children(map);
    push_attributes(&mut out, attributes);
    if out.is_empty() {
        Value::Null
    } else {
        Value::Object(out)
    }
}

fn push_attributes(out: &mut Map<String, Value>, attributes: Map<String, Value>) {
    for (name, value) in attributes {
        out.insert(format!("@{name}"), value);
    }
}
