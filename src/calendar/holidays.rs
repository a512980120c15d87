use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Fixed holidays observed every year: New Year's Day, Independence Day,
/// Thanksgiving and Christmas Day.
pub fn common_holidays(year: i32) -> BTreeSet<NaiveDate> {
    [
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 7, 4),
        NaiveDate::from_ymd_opt(year, 12, 25),
        thanksgiving(year),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Thanksgiving as read off a Monday-first November calendar grid: the
/// Thursday in the fourth week row, or the fifth row if the fourth has none.
///
/// When November 1st falls on a Friday, Saturday or Sunday the first row has
/// no Thursday, so the fourth row holds the month's third Thursday.
fn thanksgiving(year: i32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 11, 1)?;
    let offset = first.weekday().num_days_from_monday() as i32;
    let thursday_col = Weekday::Thu.num_days_from_monday() as i32;

    [3, 4].into_iter().find_map(|row| {
        let day = 7 * row - offset + thursday_col + 1;
        if (1..=30).contains(&day) {
            NaiveDate::from_ymd_opt(year, 11, day as u32)
        } else {
            None
        }
    })
}

/// A holiday set together with the years it was computed for.
///
/// Lookups for a year outside `years()` are not authoritative; callers fall
/// back to computing that year on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holidays {
    years: BTreeSet<i32>,
    dates: BTreeSet<NaiveDate>,
}

impl Holidays {
    pub fn for_year(year: i32) -> Self {
        Self::for_years(year..=year)
    }

    pub fn for_years(years: RangeInclusive<i32>) -> Self {
        let mut holidays = Self::default();
        for year in years {
            holidays.add_year(year);
        }
        holidays
    }

    pub fn add_year(&mut self, year: i32) {
        if self.years.insert(year) {
            self.dates.extend(common_holidays(year));
        }
    }

    pub fn covers(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    /// Holidays in the half-open range `[start, end)`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = &NaiveDate> {
        self.dates.range(start..end.max(start))
    }
}
