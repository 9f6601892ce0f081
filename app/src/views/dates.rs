//! Calendar date helpers
//!
//! Weekday indices follow the school calendar convention used throughout
//! the document: 0 = Sunday through 6 = Saturday.

use crate::config::SOON_WINDOW_DAYS;
use crate::store::settings::WeekLayout;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Parse a stored "YYYY-MM-DD" date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored "HH:MM" (or "HH:MM:SS") time
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Weekday index, 0 = Sunday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// ISO-8601 week number: week 1 is the week containing the year's first Thursday
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Food-plan key for a date, e.g. "2024-01-wk2-day1"
///
/// Combines the calendar year and month with the ISO week number and the
/// weekday index. Around New Year the calendar year and the ISO week can
/// disagree (2024-12-31 is "2024-12-wk1-day2"); the key is still unique
/// per date.
pub fn plan_key(date: NaiveDate) -> String {
    format!(
        "{}-{:02}-wk{}-day{}",
        date.year(),
        date.month(),
        iso_week_number(date),
        weekday_index(date)
    )
}

/// First displayed day of the week `offset` weeks away from the week containing `today`
pub fn week_start(today: NaiveDate, offset: i32, layout: WeekLayout) -> Option<NaiveDate> {
    let back = match layout {
        WeekLayout::SunThu | WeekLayout::FullWeek => today.weekday().num_days_from_sunday(),
        WeekLayout::MonFri => today.weekday().num_days_from_monday(),
    };

    today
        .checked_sub_signed(Duration::days(i64::from(back)))?
        .checked_add_signed(Duration::weeks(i64::from(offset)))
}

/// Displayed days of a week, in order
///
/// Five school days for `SunThu` and `MonFri`, seven for `FullWeek`.
/// Empty only when the week lies outside the representable calendar.
pub fn week_days(today: NaiveDate, offset: i32, layout: WeekLayout) -> Vec<NaiveDate> {
    let len = match layout {
        WeekLayout::SunThu | WeekLayout::MonFri => 5,
        WeekLayout::FullWeek => 7,
    };

    match week_start(today, offset, layout) {
        Some(start) => start.iter_days().take(len).collect(),
        None => Vec::new(),
    }
}

/// True when `date` is today or within the following `SOON_WINDOW_DAYS` days
pub fn is_soon(date: NaiveDate, today: NaiveDate) -> bool {
    let days_away = date.signed_duration_since(today).num_days();
    (0..=SOON_WINDOW_DAYS).contains(&days_away)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(parse_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(format_date(date(2024, 3, 5)), "2024-03-05");

        assert_eq!(parse_time("09:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time("09:05:30"), NaiveTime::from_hms_opt(9, 5, 30));
        assert_eq!(parse_time(""), None);
        assert_eq!(format_time(NaiveTime::from_hms_opt(14, 0, 0).unwrap()), "14:00");
    }

    #[test]
    fn test_weekday_index_starts_on_sunday() {
        assert_eq!(weekday_index(date(2024, 1, 7)), 0); // Sunday
        assert_eq!(weekday_index(date(2024, 1, 8)), 1); // Monday
        assert_eq!(weekday_index(date(2024, 1, 13)), 6); // Saturday
    }

    #[test]
    fn test_iso_week_year_boundaries() {
        // 2020 has 53 ISO weeks; 2021-01-01 (Friday) still belongs to week 53
        assert_eq!(iso_week_number(date(2020, 12, 31)), 53);
        assert_eq!(iso_week_number(date(2021, 1, 1)), 53);
        assert_eq!(iso_week_number(date(2021, 1, 4)), 1);

        // 2024-12-30 (Monday) starts week 1 of 2025
        assert_eq!(iso_week_number(date(2024, 12, 29)), 52);
        assert_eq!(iso_week_number(date(2024, 12, 30)), 1);
        assert_eq!(iso_week_number(date(2025, 1, 1)), 1);
    }

    #[test]
    fn test_plan_key() {
        assert_eq!(plan_key(date(2024, 1, 8)), "2024-01-wk2-day1");
        assert_eq!(plan_key(date(2024, 12, 31)), "2024-12-wk1-day2");
        assert_eq!(plan_key(date(2025, 1, 1)), "2025-01-wk1-day3");
        assert_eq!(plan_key(date(2020, 12, 31)), "2020-12-wk53-day4");
        assert_eq!(plan_key(date(2021, 1, 1)), "2021-01-wk53-day5");

        // Stable across calls
        assert_eq!(plan_key(date(2021, 1, 1)), plan_key(date(2021, 1, 1)));
    }

    #[test]
    fn test_plan_keys_unique_across_year_boundary() {
        let keys: std::collections::HashSet<String> = date(2020, 12, 20)
            .iter_days()
            .take(30)
            .map(plan_key)
            .collect();
        assert_eq!(keys.len(), 30);
    }

    #[test]
    fn test_mon_fri_week() {
        // Wednesday
        let today = date(2024, 1, 10);
        assert_eq!(
            week_days(today, 0, WeekLayout::MonFri),
            date(2024, 1, 8).iter_days().take(5).collect::<Vec<_>>()
        );
        assert_eq!(week_days(today, -1, WeekLayout::MonFri)[0], date(2024, 1, 1));
        assert_eq!(week_days(today, 2, WeekLayout::MonFri)[0], date(2024, 1, 22));
    }

    #[test]
    fn test_mon_fri_week_on_sunday_looks_back() {
        let sunday = date(2024, 1, 14);
        assert_eq!(week_days(sunday, 0, WeekLayout::MonFri)[0], date(2024, 1, 8));
    }

    #[test]
    fn test_sun_thu_and_full_week() {
        let today = date(2024, 1, 10);

        let sun_thu = week_days(today, 0, WeekLayout::SunThu);
        assert_eq!(sun_thu.len(), 5);
        assert_eq!(sun_thu[0], date(2024, 1, 7));
        assert_eq!(sun_thu[4], date(2024, 1, 11));

        let full = week_days(today, 0, WeekLayout::FullWeek);
        assert_eq!(full.len(), 7);
        assert_eq!(full[0], date(2024, 1, 7));
        assert_eq!(full[6], date(2024, 1, 13));
    }

    #[test]
    fn test_week_anchor_independent_of_today() {
        // Every day of the same week yields the same displayed week
        let expected = week_days(date(2024, 1, 8), 1, WeekLayout::MonFri);
        for today in date(2024, 1, 8).iter_days().take(7) {
            assert_eq!(week_days(today, 1, WeekLayout::MonFri), expected);
        }
    }

    #[test]
    fn test_is_soon_window() {
        let today = date(2024, 1, 10);

        assert!(is_soon(today, today));
        assert!(is_soon(date(2024, 1, 17), today));
        assert!(!is_soon(date(2024, 1, 18), today));
        assert!(!is_soon(date(2024, 1, 9), today));
    }
}
