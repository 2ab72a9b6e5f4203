//! Lenient ISO-8601 timestamp parsing and newest-first ordering.

use crate::Message;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Reverse;

/// ISO-8601 layouts with a zone that RFC 3339 rejects: minute precision,
/// `+hhmm` offsets and the basic (separator-less) form. `%#z` also takes `Z`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
];

/// Offset-less layouts; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 (`Z` or a numeric offset), the other common ISO-8601
/// zoned forms, offset-less date-times and bare dates. Returns `None` for
/// anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort messages newest first.
///
/// Unparseable timestamps rank as the minimum instant and end up last. The sort
/// is stable: equal timestamps keep their input order.
pub fn sort_newest_first(messages: &mut [&Message]) {
    // `None < Some(_)`, so reversing puts unparseable timestamps at the end.
    messages.sort_by_cached_key(|m| Reverse(parse_timestamp(&m.timestamp)));
}
