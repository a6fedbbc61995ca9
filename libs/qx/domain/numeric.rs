//! Lenient numeric decoding for API payloads.
//!
//! The epoch backend serializes decimals as strings (`"1250"`), the QX API
//! as JSON numbers. Both decode to `f64`. Text that does not parse becomes
//! NaN so one bad row never fails a whole page; the aggregators treat
//! non-finite values as zero contributions.

use serde::{Deserialize, Deserializer};

/// Deserialize a number or numeric string into `f64`
pub fn deserialize_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;

    match value {
        serde_json::Value::Number(n) => Ok(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Ok(s.trim().parse().unwrap_or(f64::NAN)),
        serde_json::Value::Null => Ok(f64::NAN),
        _ => Err(serde::de::Error::custom(
            "expected string or number for numeric field",
        )),
    }
}

/// Same as [`deserialize_f64`] but keeps `null`/missing as `None`
pub fn deserialize_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Deserialize::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Some(serde_json::Value::String(s)) => Ok(s.trim().parse().ok()),
        Some(_) => Err(serde::de::Error::custom(
            "expected string or number for numeric field",
        )),
    }
}

/// Deserialize an identifier that may arrive as a number or a string
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;

    match value {
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom("expected string or number for id")),
    }
}

/// Zero out values that cannot take part in a sum
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
