//! FILENAME: core/dataset/src/timestamp.rs
//! PURPOSE: Normalises textual timestamps into comparable `NaiveDateTime`s.
//! CONTEXT: Dates arrive as text from CSV files and SQLite TEXT columns. Any
//! value that cannot be read is reported as `None` instead of an error so a
//! single bad row never aborts a dashboard run.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Canonical text form written by the generator.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a timestamp in any of the accepted shapes:
/// - `2024-03-01T10:20:30` / `2024-03-01 10:20:30` (optional fractional seconds)
/// - RFC 3339 with an offset (converted to UTC)
/// - a bare date `2024-03-01` (midnight)
/// - an all-digit Unix epoch in seconds
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc());
    }

    None
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parses_iso_forms() {
        assert_eq!(parse_timestamp("2024-03-01T10:20:30"), Some(dt(2024, 3, 1, 10, 20, 30)));
        assert_eq!(parse_timestamp("2024-03-01 10:20:30"), Some(dt(2024, 3, 1, 10, 20, 30)));
        assert_eq!(
            parse_timestamp("2024-03-01T10:20:30.123456").map(|t| t.date()),
            Some(dt(2024, 3, 1, 0, 0, 0).date())
        );
    }

    #[test]
    fn test_parses_rfc3339_as_utc() {
        assert_eq!(
            parse_timestamp("2024-03-01T10:20:30+02:00"),
            Some(dt(2024, 3, 1, 8, 20, 30))
        );
    }

    #[test]
    fn test_parses_bare_date_and_epoch() {
        assert_eq!(parse_timestamp(" 2024-03-01 "), Some(dt(2024, 3, 1, 0, 0, 0)));
        assert_eq!(parse_timestamp("0"), Some(dt(1970, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_unparsable_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }

    #[test]
    fn test_format_matches_parse() {
        let value = dt(2023, 12, 31, 23, 59, 59);
        assert_eq!(format_timestamp(&value), "2023-12-31T23:59:59");
        assert_eq!(parse_timestamp(&format_timestamp(&value)), Some(value));
    }
}
