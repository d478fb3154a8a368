//! Serialization utilities for remote payloads
//!
//! The PBX API is not consistent about timestamp offsets, so call record
//! dates go through [`flexible_utc`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a timestamp that is either RFC 3339 or a naive ISO-8601 date-time.
///
/// Naive values are interpreted as UTC.
pub fn parse_flexible_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Serde adapter for `DateTime<Utc>` that accepts RFC 3339 and naive input
/// and always writes RFC 3339.
///
/// # Usage
/// ```rust
/// use ats2_domain::utils::serde::flexible_utc;
/// use chrono::{DateTime, Utc};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(with = "flexible_utc")]
///     date: DateTime<Utc>,
/// }
/// ```
pub mod flexible_utc {
    use super::*;

    /// Serialize as RFC 3339
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// Deserialize from RFC 3339 or naive ISO-8601
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_flexible_utc(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
