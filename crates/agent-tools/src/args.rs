//! Argument helpers for tool implementations

use agent_core::{Error, Result};
use serde_json::Value;

/// Extract a required text argument
///
/// Models sometimes pass a bare string instead of an object for
/// single-parameter tools, so both `{"query": "Tesla"}` and `"Tesla"` are
/// accepted. Surrounding whitespace is trimmed and empty values are rejected.
pub fn text_argument(params: &Value, key: &str) -> Result<String> {
    let raw = match params {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get(key).and_then(Value::as_str),
        _ => None,
    };

    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::ProcessingFailed(format!(
            "Missing '{key}' argument"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_argument() {
        let value = text_argument(&json!({"symbol": " TSLA "}), "symbol").unwrap();
        assert_eq!(value, "TSLA");
    }

    #[test]
    fn test_bare_string_argument() {
        let value = text_argument(&json!("Tesla news"), "query").unwrap();
        assert_eq!(value, "Tesla news");
    }

    #[test]
    fn test_missing_or_empty_argument() {
        assert!(text_argument(&json!({}), "query").is_err());
        assert!(text_argument(&json!({"query": ""}), "query").is_err());
        assert!(text_argument(&json!({"query": 42}), "query").is_err());
        assert!(text_argument(&json!(null), "query").is_err());
    }
}
