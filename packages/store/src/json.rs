//! Conversions between Value and serde types.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::value::Value;

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::Json {
        message: e.to_string(),
    })
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::Json {
        message: e.to_string(),
    })?;
    Ok(json_to_value(json))
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for very large numbers
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        theme: String,
        retries: i64,
    }

    #[test]
    fn typed_roundtrip() {
        let settings = Settings {
            theme: "dark".to_string(),
            retries: 3,
        };
        let value = to_value(&settings).unwrap();
        let back: Settings = from_value(value).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn json_roundtrip() {
        let json = json!({
            "name": "cart",
            "items": [1, 2, 3],
            "open": true,
            "ratio": 0.5,
            "empty": null,
        });
        let value = json_to_value(json.clone());
        assert_eq!(value_to_json(value), json);
    }

    #[test]
    fn json_literal_builds_state() {
        let state = json_to_value(json!({"count": 7}));
        assert_eq!(state.get("count"), Some(&Value::Integer(7)));
    }

    #[test]
    fn from_value_type_mismatch_errors() {
        let result: Result<Settings, _> = from_value(Value::from("not a struct"));
        assert!(matches!(result, Err(Error::Json { .. })));
    }
}
