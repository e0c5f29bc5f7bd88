//! Serde helpers for token expiry timestamps.
//!
//! The backend reports expiries either as epoch seconds or as a datetime
//! string; both are accepted. Expiries are always written back as RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpiry {
    Seconds(i64),
    Fractional(f64),
    Text(String),
}

/// Serialize an expiry as an RFC 3339 string.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

/// Deserialize an expiry from epoch seconds or a datetime string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawExpiry::deserialize(deserializer)? {
        RawExpiry::Seconds(secs) => from_epoch(secs).map_err(D::Error::custom),
        RawExpiry::Fractional(secs) => from_epoch(secs.trunc() as i64).map_err(D::Error::custom),
        RawExpiry::Text(text) => parse_text(&text).map_err(D::Error::custom),
    }
}

fn from_epoch(secs: i64) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| format!("expiry out of range: {secs}"))
}

/// Parse the textual expiry formats seen from the backend.
pub fn parse_text(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(secs) = text.parse::<i64>() {
        return from_epoch(secs);
    }
    Err(format!("unrecognized expiry timestamp: {text}"))
}
