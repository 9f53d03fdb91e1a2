//! Field-level diffing of a submitted payload against the stored record.
//!
//! A payload field that is absent (or blank) never produces a change. For an
//! addition there is no stored record, so every submitted field becomes a
//! change with `old: None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use db::models::changes::FieldChange;
use serde::{Deserialize, Deserializer};

/// Compares one submitted value with the current one.
///
/// `None` when nothing was submitted or the submitted value equals the
/// current one.
pub fn diff_field<T>(current: Option<&T>, submitted: Option<T>) -> Option<FieldChange<T>>
where
    T: PartialEq + Clone,
{
    let new = submitted?;
    if current == Some(&new) {
        return None;
    }
    Some(FieldChange::replaced(current.cloned(), new))
}

/// Trims a submitted text value, treating whitespace-only input as absent.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parses a calendar day from `YYYY-MM-DD`, an RFC 3339 timestamp or a
/// zone-less `YYYY-MM-DDTHH:MM:SS`. Timestamps are reduced to their UTC day.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// Serde adapter for optional day fields. Blank strings read as `None`.
pub fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match clean(raw) {
        None => Ok(None),
        Some(s) => parse_day(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}"))),
    }
}
