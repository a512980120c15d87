//! Working-day calendar.
//!
//! Scoring distinguishes "3 calendar days away" from "3 working days away";
//! everything that needs that distinction goes through this module.

mod holidays;

pub use holidays::{common_holidays, Holidays};

use chrono::{Datelike, Local, NaiveDate};

/// Current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

/// True if `date` is neither a weekend nor a holiday.
///
/// `holidays` is only trusted when it was computed for `date`'s year;
/// otherwise that year's holidays are computed on the spot.
pub fn is_working_day(date: NaiveDate, holidays: Option<&Holidays>) -> bool {
    if is_weekend(date) {
        return false;
    }
    match holidays {
        Some(h) if h.covers(date.year()) => !h.contains(&date),
        _ => !common_holidays(date.year()).contains(&date),
    }
}

/// Count working days in `[start, due)`. Zero when `due` is before `start`.
pub fn working_days_remaining(due: NaiveDate, start: NaiveDate) -> i64 {
    if due < start {
        return 0;
    }
    working_days_remaining_with(due, start, &Holidays::for_years(start.year()..=due.year()))
}

/// Same as [`working_days_remaining`], reading holidays from a set shared
/// across calls. Years the set does not cover are computed on the spot.
pub fn working_days_remaining_with(due: NaiveDate, start: NaiveDate, holidays: &Holidays) -> i64 {
    if due < start {
        return 0;
    }

    let extended;
    let holidays = if (start.year()..=due.year()).all(|y| holidays.covers(y)) {
        holidays
    } else {
        let mut wider = holidays.clone();
        for year in start.year()..=due.year() {
            wider.add_year(year);
        }
        extended = wider;
        &extended
    };

    let span = (due - start).num_days();
    let full_weeks = span / 7;
    let tail_start = start + chrono::Duration::days(full_weeks * 7);
    let tail = (0..span % 7)
        .map(|i| tail_start + chrono::Duration::days(i))
        .filter(|d| !is_weekend(*d))
        .count() as i64;

    let weekday_holidays = holidays
        .between(start, due)
        .filter(|d| !is_weekend(**d))
        .count() as i64;

    full_weeks * 5 + tail - weekday_holidays
}

/// Signed calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Reference count: walk every day.
    fn count_by_walking(due: NaiveDate, start: NaiveDate) -> i64 {
        let mut current = start;
        let mut n = 0;
        while current < due {
            if is_working_day(current, None) {
                n += 1;
            }
            current = current.succ_opt().unwrap();
        }
        n
    }

    #[test]
    fn test_weekend_detection() {
        let monday = ymd(2024, 1, 8);
        assert!(!is_weekend(monday));
        assert!(!is_weekend(ymd(2024, 1, 12)));
        assert!(is_weekend(ymd(2024, 1, 13)));
        assert!(is_weekend(ymd(2024, 1, 14)));
    }

    #[test]
    fn test_working_day_excludes_holidays() {
        let holidays = Holidays::for_year(2024);
        assert!(!is_working_day(ymd(2024, 1, 1), Some(&holidays)));
        assert!(!is_working_day(ymd(2024, 7, 4), Some(&holidays)));
        assert!(is_working_day(ymd(2024, 1, 2), Some(&holidays)));
    }

    #[test]
    fn test_working_day_recomputes_for_uncovered_year() {
        let holidays = Holidays::for_year(2024);
        // 2025-01-01 is a Wednesday; the 2024 set must not be trusted for it
        assert!(!is_working_day(ymd(2025, 1, 1), Some(&holidays)));
        assert!(!is_working_day(ymd(2025, 1, 1), None));
    }

    #[test]
    fn test_shared_holidays_match_fresh_count() {
        let shared = Holidays::for_years(2024..=2026);
        let start = ymd(2024, 11, 20);
        for due in [ymd(2024, 12, 31), ymd(2025, 7, 7), ymd(2026, 1, 2)] {
            assert_eq!(
                working_days_remaining_with(due, start, &shared),
                working_days_remaining(due, start)
            );
        }
    }

    #[test]
    fn test_shared_holidays_missing_year_still_counted() {
        // only 2024 cached; 2025-01-01 (Wednesday) must still be excluded
        let partial = Holidays::for_year(2024);
        assert_eq!(
            working_days_remaining_with(ymd(2025, 1, 3), ymd(2024, 12, 30), &partial),
            3
        );
    }

    #[test]
    fn test_monday_to_friday_is_four() {
        assert_eq!(working_days_remaining(ymd(2024, 1, 12), ymd(2024, 1, 8)), 4);
    }

    #[test]
    fn test_monday_to_next_monday_is_five() {
        assert_eq!(working_days_remaining(ymd(2024, 1, 15), ymd(2024, 1, 8)), 5);
    }

    #[test]
    fn test_due_before_start_is_zero() {
        assert_eq!(working_days_remaining(ymd(2024, 1, 1), ymd(2024, 1, 8)), 0);
    }

    #[test]
    fn test_same_day_is_zero() {
        assert_eq!(working_days_remaining(ymd(2024, 1, 8), ymd(2024, 1, 8)), 0);
    }

    #[test]
    fn test_week_with_holiday() {
        // July 4 2024 is a Thursday
        assert_eq!(working_days_remaining(ymd(2024, 7, 8), ymd(2024, 7, 1)), 4);
    }

    #[test]
    fn test_across_year_boundary() {
        // Dec 30 2024 (Mon) .. Jan 6 2025 (Mon), Jan 1 is a Wednesday
        assert_eq!(working_days_remaining(ymd(2025, 1, 6), ymd(2024, 12, 30)), 4);
    }

    #[test]
    fn test_holiday_on_weekend_not_subtracted() {
        // Dec 25 2022 is a Sunday
        assert_eq!(working_days_remaining(ymd(2022, 12, 26), ymd(2022, 12, 19)), 5);
    }

    #[test]
    fn test_matches_day_by_day_walk() {
        let start = ymd(2023, 10, 27);
        for offset in 0..500 {
            let due = start + chrono::Duration::days(offset);
            assert_eq!(
                working_days_remaining(due, start),
                count_by_walking(due, start),
                "due {}",
                due
            );
        }
    }

    #[test]
    fn test_days_between_signed() {
        assert_eq!(days_between(ymd(2024, 1, 8), ymd(2024, 1, 3)), -5);
        assert_eq!(days_between(ymd(2024, 1, 8), ymd(2024, 1, 8)), 0);
    }
}
