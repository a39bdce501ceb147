//! Time utilities for business timezone conversions
//!
//! Date → timestamp conversion happens at the service layer; payments
//! carry `i64` Unix millis and day boundaries are computed in the store's
//! configured timezone, never UTC.

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::utils::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format: {date}")))
}

/// Parse an IANA timezone name, falling back to UTC
pub fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!("Unknown timezone '{}', falling back to UTC", name);
        chrono_tz::UTC
    })
}

/// Today's date in the business timezone
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Date start (00:00:00) → Unix millis in the business timezone
///
/// DST gap fallback: if local midnight does not exist, fall back to UTC.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    tz.from_local_datetime(&naive)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Date end → next day 00:00:00 as Unix millis (exclusive bound)
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-03-14").is_ok());
        assert!(parse_date("14/03/2025").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_day_bounds_are_local_not_utc() {
        let tz = parse_timezone("America/Bogota"); // UTC-5, no DST
        let date = parse_date("2025-03-14").unwrap();

        let start = day_start_millis(date, tz);
        let end = day_end_millis(date, tz);

        // Local midnight is 05:00 UTC
        let start_utc = chrono::DateTime::from_timestamp_millis(start).unwrap();
        assert_eq!(start_utc.to_rfc3339(), "2025-03-14T05:00:00+00:00");
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        assert_eq!(parse_timezone("Mars/Olympus"), chrono_tz::UTC);
    }
}
