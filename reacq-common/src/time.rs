//! Wire timestamp handling
//!
//! The scheduling service speaks naive ISO-8601 timestamps that are always UTC,
//! sometimes with a trailing `Z`, sometimes with a fractional second.
//! Outbound timestamps are always written with exactly three fractional digits
//! and a `Z` suffix.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};

use crate::error::{Error, Result};

/// Accepted inbound layouts, tried in order.
const INBOUND_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Outbound layout. `%.3f` truncates, it never rounds up into the next second.
const OUTBOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse a service timestamp into UTC.
///
/// A single trailing `Z` is stripped before matching.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    INBOUND_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| dt.and_utc())
        .ok_or_else(|| Error::TimestampParseFailed(value.to_string()))
}

/// Format a timestamp the way the scheduling service expects it.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(OUTBOUND_FORMAT).to_string()
}

/// True when `value` falls exactly on a UTC midnight boundary.
///
/// The potentials endpoint pads its answer with windows ending at midnight;
/// these are placeholders rather than real visibility windows.
pub fn is_utc_midnight(value: &DateTime<Utc>) -> bool {
    value.time() == NaiveTime::MIN
}

/// `#[serde(with = "...")]` adapter for wire timestamps.
pub mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
