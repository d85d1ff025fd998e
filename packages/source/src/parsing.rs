//! Timestamp parsing for exported incident logs.
//!
//! Exports mix ISO-style and day-first timestamps, with and without
//! seconds. Values that match none of the accepted formats are coerced to
//! `None` rather than failing the load.

use chrono::{NaiveDate, NaiveDateTime};

/// Datetime formats tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// Date-only formats, interpreted as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parses a reported-at cell. Returns `None` if empty or unparseable.
#[must_use]
pub fn parse_reported_at(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_datetime() {
        let dt = parse_reported_at("2024-01-15 14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_iso_datetime_with_fraction_and_t() {
        let dt = parse_reported_at("2024-01-15T14:30:00.250").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_day_first_datetime() {
        let dt = parse_reported_at("05/03/2025 08:15").unwrap();
        assert_eq!(dt.to_string(), "2025-03-05 08:15:00");
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let dt = parse_reported_at(" 2024-12-31 ").unwrap();
        assert_eq!(dt.to_string(), "2024-12-31 00:00:00");
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_reported_at("not-a-date").is_none());
        assert!(parse_reported_at("").is_none());
        assert!(parse_reported_at("2024-13-01 00:00:00").is_none());
    }
}
