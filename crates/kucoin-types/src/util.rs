//! Small helpers shared by request builders and the trigger

use chrono::{DateTime, SecondsFormat};
use rand::Rng;
use rust_decimal::prelude::*;
use serde_json::{Map, Value};

/// Timestamps below this are taken to be in seconds
const SECONDS_CUTOFF: i64 = 10_000_000_000;

/// Generate a client order ID: 32 lowercase hex characters, no dashes
pub fn generate_client_oid() -> String {
    format!("{:032x}", rand::thread_rng().gen::<u128>())
}

/// Normalize a timestamp to milliseconds
pub fn to_milliseconds(timestamp: i64) -> i64 {
    if timestamp < SECONDS_CUTOFF {
        timestamp.saturating_mul(1000)
    } else {
        timestamp
    }
}

/// Format a second or millisecond timestamp as ISO-8601, e.g.
/// `2021-01-01T00:00:00.000Z`
pub fn format_timestamp(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp_millis(to_milliseconds(timestamp))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Drop null and empty-string entries; `0` and `false` are kept
pub fn clean_object(object: Map<String, Value>) -> Map<String, Value> {
    object
        .into_iter()
        .filter(|(_, v)| !matches!(v, Value::Null) && v.as_str() != Some(""))
        .collect()
}

/// Read a number or numeric string as a decimal
pub fn parse_numeric(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) if !s.trim().is_empty() => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .ok(),
        _ => None,
    }
}
