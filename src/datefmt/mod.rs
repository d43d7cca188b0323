//! Date parsing and display formatting.
//!
//! Event start times are shown in US Eastern time ("Saturday 03.29.2025 at
//! 04:00 PM ET"); other dates use long US English forms ("April 13, 2024").

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use serde::Serialize;

/// Parse a timestamp as returned by the data store.
///
/// Accepts RFC 3339, Postgres-style `2025-03-29 22:00:00+00`, naive
/// date-times (taken as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}

/// Convert an instant to America/New_York wall-clock time.
pub fn to_eastern(instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&New_York)
}

/// Event start line, e.g. "Saturday 03.29.2025 at 04:00 PM ET".
pub fn format_event_start_et(instant: DateTime<Utc>) -> String {
    to_eastern(instant)
        .format("%A %m.%d.%Y at %I:%M %p ET")
        .to_string()
}

/// "April 13, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Month bucket label for event listings, e.g. "April 2024".
pub fn month_bucket(instant: DateTime<Utc>) -> String {
    instant.format("%B %Y").to_string()
}

/// Format a birth date column (any accepted timestamp form) as a long date.
pub fn format_birth_date(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| format_long_date(dt.date_naive()))
}

/// Combine a fight row's `month_day` ("April 13" / "Apr 13") and `year`.
pub fn fight_date(month_day: &str, year: i32) -> Option<NaiveDate> {
    let joined = format!("{} {}", month_day.trim().trim_end_matches(','), year);
    ["%B %d %Y", "%b %d %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&joined, fmt).ok())
}

/// Time remaining until an event starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Remaining time from `now` to `target`; all zeros once the target has passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = (target - now).num_seconds();
        if remaining <= 0 {
            return Self::default();
        }
        Self {
            days: remaining / 86_400,
            hours: (remaining / 3600) % 24,
            minutes: (remaining / 60) % 60,
            seconds: remaining % 60,
        }
    }
}
