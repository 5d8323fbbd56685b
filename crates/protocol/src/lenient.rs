//! Forgiving field decoders for backend-generated chart data.
//!
//! Chart points are produced by a language model on the backend, so a year
//! may arrive as `2020` or `"2020"` and a value as `42` or `"42"`. These
//! decoders accept both shapes and treat anything else as absent instead of
//! failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, numbers become their decimal text.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers pass through, numeric strings are parsed.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}
