//! Input validation utilities
//!
//! Every create payload arrives with optional fields; [`RequiredFields`]
//! collects the ones that are absent or empty so the handler can reject the
//! request with the resource's message before touching the store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, de};
use tracing::debug;

use crate::error::ApiError;

/// Whether a supplied value counts as "present" for a required field
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for i32 {
    fn is_present(&self) -> bool {
        *self != 0
    }
}

impl Presence for DateTime<Utc> {
    fn is_present(&self) -> bool {
        true
    }
}

/// Accumulates missing required fields
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the value of a required field, recording it as missing when it
    /// is absent or empty. The returned default is never persisted because
    /// [`RequiredFields::finish`] fails in that case.
    pub fn take<T: Presence + Default>(&mut self, name: &'static str, value: Option<T>) -> T {
        match value {
            Some(value) if value.is_present() => value,
            _ => {
                self.missing.push(name);
                T::default()
            }
        }
    }

    /// Fail with `message` when any field was recorded as missing
    pub fn finish(self, message: &str) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            return Ok(());
        }

        debug!(missing = %self.missing.join(", "), "Rejecting incomplete payload");
        Err(ApiError::Validation(message.to_string()))
    }
}

/// Parse a date-valued field from its textual representation.
///
/// Accepts RFC 3339 timestamps, naive timestamps (taken as UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(format!("Invalid date: {value}"))
}

/// Serde adapter for optional date fields; empty strings count as absent.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some).map_err(de::Error::custom),
    }
}

/// Serde adapter telling an explicit `null` apart from an absent field.
///
/// Use with `#[serde(default)]`: absent gives `None`, `null` gives
/// `Some(None)`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
