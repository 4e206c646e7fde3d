//! Completion timestamps.
//!
//! A connector that has never succeeded (or never failed) reports `null` for
//! that field. Such a value is mapped to [`NEVER`], which compares lower than
//! every real timestamp, so "last completion" is a plain `max`.

use chrono::{DateTime, Utc};

use crate::error::ArgumentError;

/// Sentinel for "no such event": earlier than any representable instant.
pub const NEVER: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Parse an RFC 3339 timestamp, or [`NEVER`] when absent.
///
/// Malformed input is an error; it is never silently defaulted.
pub fn parse_timestamp(value: Option<&str>) -> Result<DateTime<Utc>, ArgumentError> {
    match value {
        None => Ok(NEVER),
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| ArgumentError::Timestamp {
                value: raw.to_owned(),
                source,
            }),
    }
}

/// Decoded nullable timestamp, or [`NEVER`].
pub fn or_never(value: Option<DateTime<Utc>>) -> DateTime<Utc> {
    value.unwrap_or(NEVER)
}

/// `max(a, b)` over nullable timestamps.
pub fn latest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> DateTime<Utc> {
    or_never(a).max(or_never(b))
}
