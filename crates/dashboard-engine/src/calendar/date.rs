use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Local, Months, NaiveDate};

/// A date without any time-of-day component.
///
/// Ordering is chronological, so two values compare equal only when year,
/// month and day-of-month all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its parts, `None` if the triple is not a real day
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date on the local calendar
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day 1 of this date's month
    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Shift by whole months, carrying into the year in both directions.
    ///
    /// The day-of-month is kept when the target month has it and clamped to
    /// the target month's last day otherwise (Mar 31 - 1 month = Feb 28/29).
    pub fn add_months(&self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.0.checked_add_months(months)
        } else {
            self.0.checked_sub_months(months)
        };
        // Only fails outside chrono's representable range (~262,000 years)
        Self(shifted.unwrap_or(self.0))
    }

    /// Shift by whole days
    pub fn add_days(&self, delta: i64) -> Self {
        Self(
            self.0
                .checked_add_signed(chrono::Duration::days(delta))
                .unwrap_or(self.0),
        )
    }

    /// Day of the week, Monday = 1 through Sunday = 7
    pub fn weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Parse an ISO `YYYY-MM-DD` string
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok().map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// An inclusive, ordered interval of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: CalendarDate,
    to: CalendarDate,
}

impl DateRange {
    /// Build a range from two endpoints given in either order
    pub fn new(a: CalendarDate, b: CalendarDate) -> Self {
        let (from, to) = normalize_order(a, b);
        Self { from, to }
    }

    /// A one-day range
    pub fn single(date: CalendarDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    /// One month back from `today` up to and including `today`
    pub fn month_ending(today: CalendarDate) -> Self {
        Self {
            from: today.add_months(-1),
            to: today,
        }
    }

    pub fn from(&self) -> CalendarDate {
        self.from
    }

    pub fn to(&self) -> CalendarDate {
        self.to
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of days covered, both ends included
    pub fn len_days(&self) -> u64 {
        (self.to.0 - self.from.0).num_days() as u64 + 1
    }

    /// Every date in the range, in order
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.from
            .0
            .iter_days()
            .take_while(move |d| *d <= self.to.0)
            .map(CalendarDate)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.from, self.to)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Weekday of the 1st of the month, Monday = 1 through Sunday = 7
pub fn weekday_of_first(year: i32, month: u32) -> u32 {
    CalendarDate::new(year, month, 1)
        .map(|d| d.weekday())
        .unwrap_or(1)
}

pub fn compare(a: CalendarDate, b: CalendarDate) -> Ordering {
    a.cmp(&b)
}

/// Return the pair as (earlier, later)
pub fn normalize_order(a: CalendarDate, b: CalendarDate) -> (CalendarDate, CalendarDate) {
    match compare(a, b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}
