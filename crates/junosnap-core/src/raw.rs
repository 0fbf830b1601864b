// ── Raw payload cursor ──
//
// `Node` is a borrowed view into a decoded reply that remembers how it was
// reached. Required lookups fail with the exact path, text reads look
// through `#text` wrappers, and numeric reads fail with a typed coercion
// error instead of a silent zero.

use std::str::FromStr;

use serde_json::Value;

use crate::domain::Domain;
use crate::error::CoreError;
use crate::shape;

#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: &'a Value,
    domain: Domain,
    path: String,
}

impl<'a> Node<'a> {
    /// Start a cursor at the top of a payload.
    pub fn root(domain: Domain, value: &'a Value) -> Self {
        Self {
            value,
            domain,
            path: String::new(),
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn path(&self) -> &str {
        if self.path.is_empty() { "/" } else { &self.path }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    fn descend(&self, value: &'a Value, segment: &str) -> Self {
        let path = if segment.starts_with('[') {
            format!("{}{segment}", self.path)
        } else {
            format!("{}/{segment}", self.path)
        };
        Self {
            value,
            domain: self.domain,
            path,
        }
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// Whether the key is present at all, including as an empty element.
    pub fn has(&self, key: &str) -> bool {
        self.value.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        self.value.get(key).map(|v| self.descend(v, key))
    }

    /// A key the detected schema guarantees.
    pub fn child(&self, key: &str) -> Result<Node<'a>, CoreError> {
        self.get(key)
            .ok_or_else(|| self.malformed_at(key, "required element missing"))
    }

    // ── Text ─────────────────────────────────────────────────────────

    /// Text content, looking through attribute wrappers. Empty elements have none.
    pub fn text(&self) -> Option<String> {
        text_of_value(self.value)
    }

    pub fn text_of(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|n| n.text())
    }

    pub fn required_text(&self, key: &str) -> Result<String, CoreError> {
        self.text_of(key)
            .ok_or_else(|| self.malformed_at(key, "required text missing"))
    }

    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.text_of(key).unwrap_or_else(|| default.to_owned())
    }

    /// An XML attribute carried as `@name`.
    pub fn attr(&self, name: &str) -> Option<String> {
        self.value.get(format!("@{name}")).and_then(text_of_value)
    }

    // ── Collections ──────────────────────────────────────────────────

    /// This node as an ordered list of map elements.
    pub fn items(&self) -> Result<Vec<Node<'a>>, CoreError> {
        let maps = shape::normalize(self.value).map_err(|e| CoreError::MalformedPayload {
            domain: self.domain,
            path: format!("{}{}", self.path(), e.position),
            reason: e.to_string(),
        })?;

        match self.value {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(idx, item)| self.descend(item, &format!("[{idx}]")))
                .collect()),
            _ if maps.is_empty() => Ok(Vec::new()),
            _ => Ok(vec![self.clone()]),
        }
    }

    /// A repeatable child element; absent means no entries.
    pub fn items_of(&self, key: &str) -> Result<Vec<Node<'a>>, CoreError> {
        match self.get(key) {
            Some(node) => node.items(),
            None => Ok(Vec::new()),
        }
    }

    /// A repeatable leaf element whose items may be scalars.
    pub fn leaves_of(&self, key: &str) -> Vec<Node<'a>> {
        let Some(node) = self.get(key) else {
            return Vec::new();
        };
        shape::as_items(node.value)
            .into_iter()
            .enumerate()
            .map(|(idx, item)| node.descend(item, &format!("[{idx}]")))
            .collect()
    }

    // ── Numbers ──────────────────────────────────────────────────────

    /// Parse an optional numeric leaf. Absent is `None`; unparseable is an error.
    pub fn parse<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<Option<T>, CoreError> {
        let Some(text) = self.text_of(key) else {
            return Ok(None);
        };
        text.parse::<T>()
            .map(Some)
            .map_err(|_| self.coercion_error(key, &text, expected))
    }

    pub fn parse_or<T: FromStr>(
        &self,
        key: &str,
        expected: &'static str,
        default: T,
    ) -> Result<T, CoreError> {
        Ok(self.parse(key, expected)?.unwrap_or(default))
    }

    /// Parse a numeric leaf the schema guarantees.
    pub fn require<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<T, CoreError> {
        self.parse(key, expected)?
            .ok_or_else(|| self.malformed_at(key, "required value missing"))
    }

    // ── Error builders ───────────────────────────────────────────────

    pub fn malformed(&self, reason: impl Into<String>) -> CoreError {
        CoreError::MalformedPayload {
            domain: self.domain,
            path: self.path().to_owned(),
            reason: reason.into(),
        }
    }

    pub fn malformed_at(&self, key: &str, reason: impl Into<String>) -> CoreError {
        CoreError::MalformedPayload {
            domain: self.domain,
            path: format!("{}/{key}", self.path),
            reason: reason.into(),
        }
    }

    pub fn coercion_error(&self, key: &str, value: &str, expected: &'static str) -> CoreError {
        CoreError::NumericCoercion {
            domain: self.domain,
            field: format!("{}/{key}", self.path),
            value: value.to_owned(),
            expected,
        }
    }
}

fn text_of_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get("#text").and_then(text_of_value),
        Value::Null | Value::Array(_) => None,
    }
}

/// First whitespace-separated token, for values like `2048 MB` or `45 degrees C`.
pub(crate) fn leading_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
