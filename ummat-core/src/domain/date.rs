//! Ledger dates
//!
//! The sheet is filled in by hand, mostly as `DD/MM/YYYY` but sometimes as
//! ISO dates, timestamps pasted from other tools, or American `MM/DD/YYYY`.
//!
//! Parsing contract:
//! 1. `D/M/YYYY` is tried first and read **day-first**. `03/04/2024` is
//!    3 April, never 4 March. The triple must be a real calendar date with
//!    a year in 1900..=2100.
//! 2. Only when that fails are the generic formats tried, month-first
//!    `MM/DD/YYYY` among them (so `06/13/2024` still resolves).
//! 3. If nothing matches, the caller-supplied `today` is used.
//!
//! The codec never reads the clock; callers pass `today` in.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Generic date-only formats, in priority order
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Generic date-time formats; only the calendar date is kept
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const INDONESIAN_MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

fn day_first_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("day-first date pattern")
    })
}

/// Parse a ledger date, falling back to `today` when nothing matches.
pub fn parse_date(raw: &str, today: NaiveDate) -> NaiveDate {
    try_parse_date(raw).unwrap_or(today)
}

/// Strict variant of [`parse_date`]: `None` when no format matches.
pub fn try_parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    parse_day_first(cleaned).or_else(|| parse_fallback(cleaned))
}

fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let caps = day_first_pattern().captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    // from_ymd_opt rejects 31/02, 31/04 and 29/02 outside leap years
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_fallback(s: &str) -> Option<NaiveDate> {
    if let Some(date) = FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Canonical ledger form: `DD/MM/YYYY`, day and month zero-padded.
pub fn format_date_to_indonesian(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Long display form used for "last updated" labels: `5 Maret 2024`.
pub fn format_long_indonesian(date: NaiveDate) -> String {
    let month = INDONESIAN_MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2026, 10, 18)
    }

    #[test]
    fn test_parse_day_first() {
        assert_eq!(parse_date("01/06/2024", today()), ymd(2024, 6, 1));
        assert_eq!(parse_date("5/3/2024", today()), ymd(2024, 3, 5));
        assert_eq!(parse_date("  15/08/2023 ", today()), ymd(2023, 8, 15));
    }

    #[test]
    fn test_ambiguous_date_is_day_first() {
        assert_eq!(parse_date("03/04/2024", today()), ymd(2024, 4, 3));
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(parse_date("29/02/2024", today()), ymd(2024, 2, 29));
        assert_eq!(try_parse_date("29/02/2023"), None);
    }

    #[test]
    fn test_invalid_calendar_date_falls_back_to_today() {
        assert_eq!(try_parse_date("31/02/2025"), None);
        assert_eq!(parse_date("31/02/2025", today()), today());
    }

    #[test]
    fn test_month_first_only_when_day_first_fails() {
        assert_eq!(parse_date("06/13/2024", today()), ymd(2024, 6, 13));
    }

    #[test]
    fn test_year_out_of_range_uses_generic_parse() {
        // Rejected by the day-first rule, accepted month-first
        assert_eq!(try_parse_date("5/3/1850"), Some(ymd(1850, 5, 3)));
        assert_eq!(try_parse_date("13/13/2150"), None);
    }

    #[test]
    fn test_generic_formats() {
        assert_eq!(try_parse_date("2024-06-01"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("2024-6-1"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("2024/06/01"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("2024-06-01T10:30:00Z"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("2024-06-01T10:30:00+07:00"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("2024-06-01 10:30:00"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("June 1, 2024"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("Jun 1 2024"), Some(ymd(2024, 6, 1)));
        assert_eq!(try_parse_date("1 June 2024"), Some(ymd(2024, 6, 1)));
    }

    #[test]
    fn test_garbage_and_empty_use_today() {
        assert_eq!(parse_date("", today()), today());
        assert_eq!(parse_date("   ", today()), today());
        assert_eq!(parse_date("kemarin", today()), today());
        assert_eq!(parse_date("1/2", today()), today());
    }

    #[test]
    fn test_format_date_to_indonesian() {
        assert_eq!(format_date_to_indonesian(ymd(2024, 3, 5)), "05/03/2024");
        assert_eq!(format_date_to_indonesian(ymd(2023, 12, 31)), "31/12/2023");
        assert_eq!(
            format_date_to_indonesian(parse_date("5/3/2024", today())),
            "05/03/2024"
        );
    }

    #[test]
    fn test_canonical_form_round_trips() {
        let date = ymd(2025, 1, 9);
        assert_eq!(parse_date(&format_date_to_indonesian(date), today()), date);
    }

    #[test]
    fn test_format_long_indonesian() {
        assert_eq!(format_long_indonesian(ymd(2024, 3, 5)), "5 Maret 2024");
        assert_eq!(format_long_indonesian(ymd(2026, 10, 18)), "18 Oktober 2026");
        assert_eq!(format_long_indonesian(ymd(2025, 1, 1)), "1 Januari 2025");
    }
}
