//! Lenient deserializers for form-driven clients.
//!
//! Browser forms routinely send numeric inputs as strings (`"3"`) and empty inputs as `""`.
//! These helpers accept either shape and treat blanks as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `3`, `"3"`, `" 3 "`, `null`, `""` or a missing field.
///
/// Anything that is neither a number nor a numeric string is rejected.
pub fn deserialize_i32_lax<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected a 32-bit integer")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("expected an integer or a numeric string")),
        Some(_) => Err(serde::de::Error::custom(
            "expected an integer or a numeric string",
        )),
    }
}

/// Accepts strings and numbers (stringified); blanks become `None`.
pub fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a string or a number")),
    }
}
