//! Lenient readers for values that arrive from external JSON.
//!
//! The remote service and the local reference store disagree on number and id
//! encodings (integers vs strings, costs missing or `null`). These helpers are
//! used through `#[serde(deserialize_with = ...)]` so that records stay
//! strongly-typed without rejecting the whole payload over one odd field.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a finite number.
///
/// Accepts numbers and numeric strings; everything else is `None`.
pub fn as_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Deserialize a number, treating missing, `null` or non-numeric values as `0.0`.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value).unwrap_or(0.0))
}

/// Deserialize an optional number; non-numeric values become `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value))
}

/// Deserialize an identifier that may be encoded as a JSON string or number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}
