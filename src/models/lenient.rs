//! Forgiving field deserializers.
//!
//! Content files are hand-edited, so a wrong-typed field falls back to its
//! default instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a scalar to a string; null, arrays and objects become "".
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_string(Value::deserialize(deserializer)?))
}

pub(crate) fn coerce_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// A list of strings; anything but an array is empty.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(coerce_string).collect()),
        _ => Ok(Vec::new()),
    }
}

/// A nested object; anything that does not fit becomes the default.
pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(from_value_or_default(Value::deserialize(deserializer)?))
}

/// A list of objects; non-array input is empty and bad entries become defaults.
///
/// Entries are never dropped, so positions (and "Section N" numbering) match
/// the source document.
pub fn objects<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(from_value_or_default).collect()),
        _ => Ok(Vec::new()),
    }
}

pub(crate) fn from_value_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    if !value.is_object() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Tagged {
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "strings")]
        tags: Vec<String>,
    }

    #[test]
    fn test_scalar_coercion() {
        let p: Tagged = serde_json::from_value(json!({"name": 42, "tags": ["a", 1, true, null]})).unwrap();
        assert_eq!(p.name, "42");
        assert_eq!(p.tags, vec!["a", "1", "true", ""]);
    }

    #[test]
    fn test_wrong_shapes_fall_back() {
        let p: Tagged = serde_json::from_value(json!({"name": {"x": 1}, "tags": "solo"})).unwrap();
        assert_eq!(p, Tagged::default());
    }

    #[test]
    fn test_from_value_or_default_rejects_non_objects() {
        let p: Tagged = from_value_or_default(json!([1, 2]));
        assert_eq!(p, Tagged::default());
        let p: Tagged = from_value_or_default(json!(null));
        assert_eq!(p, Tagged::default());
    }
}
