//! Safe access to loosely-typed source records.
//!
//! Recipe dumps come from many exporters and rarely agree on field types.
//! [`RawRecord`] wraps a JSON object and exposes accessors that return
//! `None` on a missing key or a type mismatch instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One untyped JSON object from the source dump, pre-normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value if it is object-shaped.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Raw value for `key`. JSON `null` is reported as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// JavaScript-style truthiness, which is what recipe exporters tend to assume
/// when they leave `0`, `""` or `false` in place of a missing value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a loosely typed value. Integral numbers have no fraction
/// (`4.0` -> "4"), array items are joined with commas and nulls inside them
/// are empty. Objects keep their compact JSON text.
pub fn loose_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(loose_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(RawRecord::from_value(json!([1, 2])).is_none());
        assert!(RawRecord::from_value(json!("title")).is_none());
        assert!(RawRecord::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_accessors_return_none_on_type_mismatch() {
        let r = record(json!({"title": 42, "rating": "4.5", "nutrients": "lots"}));
        assert_eq!(r.get_str("title"), None);
        assert_eq!(r.get_number("rating"), None);
        assert!(r.get_object("nutrients").is_none());
        assert!(r.get("missing").is_none());
    }

    #[test]
    fn test_null_is_absent() {
        let r = record(json!({"title": null}));
        assert!(r.get("title").is_none());
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(-1)));
    }

    #[test]
    fn test_loose_text() {
        assert_eq!(loose_text(&json!(4.0)), "4");
        assert_eq!(loose_text(&json!(-3)), "-3");
        assert_eq!(loose_text(&json!(0.25)), "0.25");
        assert_eq!(loose_text(&json!([4, "x", null, [1, 2]])), "4,x,,1,2");
        assert_eq!(loose_text(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
