//! Timestamp helpers
//!
//! Records carry `DateTime<Utc>` in memory and ISO-8601 strings with
//! millisecond precision on the wire (`2024-05-01T12:30:00.000Z`).

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Current time truncated to whole milliseconds
///
/// Truncating keeps a freshly created record equal to itself after a trip
/// through its millisecond-precision JSON form.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Format a timestamp the way records are persisted
pub fn to_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for millisecond ISO-8601 timestamps
///
/// Deserialization accepts any RFC 3339 string and normalises it to UTC.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_iso(ts))
    }

    /// Parse any RFC 3339 timestamp
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
