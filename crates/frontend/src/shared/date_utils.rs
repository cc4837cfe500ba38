//! Utilities for date and time formatting
//!
//! Timestamps are shown in the browser's local time zone.
use chrono::{Local, TimeZone};
use contracts::system::entitlements::parse_timestamp;
use std::fmt::Display;

const MEDIUM_DATETIME: &str = "%b %-d, %Y %-I:%M %p";

/// Format ISO datetime string to the medium form in the given zone
/// Example (UTC): "2021-06-01T14:05:00Z" -> "Jun 1, 2021 2:05 PM"
///
/// Unparseable input is returned as is.
pub fn format_datetime_medium_in<Tz>(datetime_str: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp(datetime_str) {
        Ok(ts) => ts.with_timezone(tz).format(MEDIUM_DATETIME).to_string(),
        Err(_) => datetime_str.to_string(),
    }
}

/// Medium form in the local time zone
pub fn format_datetime_medium(datetime_str: &str) -> String {
    format_datetime_medium_in(datetime_str, &Local)
}

/// Same as [`format_datetime_medium`], empty string for a missing value
pub fn format_datetime_medium_opt(datetime_str: Option<&str>) -> String {
    datetime_str
        .map(format_datetime_medium)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_datetime_medium_in_utc() {
        assert_eq!(format_datetime_medium_in("2021-01-01T00:00:00Z", &Utc), "Jan 1, 2021 12:00 AM");
        assert_eq!(
            format_datetime_medium_in("2021-06-01T14:05:33.123+03:00", &Utc),
            "Jun 1, 2021 11:05 AM"
        );
        assert_eq!(format_datetime_medium_in("2024-12-31T23:59:59", &Utc), "Dec 31, 2024 11:59 PM");
    }

    #[test]
    fn test_format_converts_to_target_zone() {
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(
            format_datetime_medium_in("2021-12-31T22:30:00Z", &moscow),
            "Jan 1, 2022 1:30 AM"
        );
    }

    #[test]
    fn test_local_matches_explicit_local_zone() {
        let value = "2021-06-01T14:05:00Z";
        assert_eq!(format_datetime_medium(value), format_datetime_medium_in(value, &Local));
        assert_eq!(format_datetime_medium_opt(None), "");
        assert_eq!(format_datetime_medium_opt(Some(value)), format_datetime_medium(value));
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime_medium("invalid"), "invalid");
        assert_eq!(format_datetime_medium_in("invalid", &Utc), "invalid");
    }
}
