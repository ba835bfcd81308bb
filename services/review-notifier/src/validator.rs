//! Structural checks on decoded review API payloads

use serde_json::Value;

use crate::ReviewError;

/// Name of a JSON value's type, as reported in `TypeMismatch` errors
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate the payload shape and return the homework entries.
///
/// The mapping check runs before the key lookup, which runs before the
/// element type check. An empty slice is a valid result.
pub fn check_response(payload: &Value) -> crate::Result<&[Value]> {
    let object = payload.as_object().ok_or_else(|| ReviewError::TypeMismatch {
        location: "API response".to_string(),
        expected: "object",
        actual: json_type_name(payload),
    })?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| ReviewError::MissingKey("homeworks".to_string()))?;

    match homeworks {
        Value::Array(entries) => Ok(entries.as_slice()),
        other => Err(ReviewError::TypeMismatch {
            location: "\"homeworks\"".to_string(),
            expected: "array",
            actual: json_type_name(other),
        }),
    }
}
