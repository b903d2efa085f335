//! Defensive parsing for coordinate components
//!
//! The persisted vehicle list has passed through a key-value store that
//! does not enforce types, so a latitude may arrive as a JSON number or
//! as numeric-looking text. Every read tolerates both and degrades to
//! `0.0` instead of failing deserialization. The map rendering a stale
//! blob must never crash on a malformed coordinate.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a single coordinate component to `f64`.
///
/// Accepts JSON numbers and numeric strings; anything else (including
/// unparsable text such as `"abc"`) coerces to `0.0`.
pub fn coerce_component(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Deserialize an `f64` field leniently via [`coerce_component`]
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_component(&value))
}

/// Unix epoch, the fallback for unparsable timestamps
pub fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).unwrap()
}

/// Deserialize a coordinate timestamp leniently.
///
/// Accepts an RFC 3339 string or an integer of Unix seconds; anything
/// else falls back to the epoch rather than erroring.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s.parse::<DateTime<Utc>>().unwrap_or_else(|_| epoch()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(epoch),
        _ => epoch(),
    })
}
