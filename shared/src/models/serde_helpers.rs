//! Common serde helpers for partial-update payloads and timestamps

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Distinguish an absent field from an explicit `null`.
///
/// Use together with `#[serde(default)]`:
/// - field absent → `None`
/// - `null` → `Some(None)`
/// - value → `Some(Some(v))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T08:30:00.123Z`
pub fn millis_utc<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
