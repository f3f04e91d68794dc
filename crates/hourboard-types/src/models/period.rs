//! Calendar month selector used by every period-aware query

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest year accepted from callers
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted from callers
pub const MAX_YEAR: i32 = 9999;

/// A calendar month (year + month), totally ordered by time.
///
/// Internally anchored on the first day of the month so date arithmetic
/// never has to re-validate the calendar.
///
/// # Examples
///
/// ```
/// use hourboard_types::MonthYear;
///
/// let april = MonthYear::new(2025, 4).unwrap();
/// assert_eq!(april.to_string(), "2025-04");
/// assert_eq!(april.last_day().to_string(), "2025-04-30");
/// assert!(MonthYear::new(2025, 13).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear {
    first: NaiveDate,
}

impl MonthYear {
    /// Build a month from caller input. Returns `None` for a month outside
    /// 1-12 or a year outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Duration::days(i64::from(self.days_in_month()) - 1)
    }

    /// Number of days in this month (leap years included)
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            2 if self.first.leap_year() => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last_day()
    }

    /// Following month, `None` past [`MAX_YEAR`]
    pub fn succ(&self) -> Option<Self> {
        let next = self.first + Duration::days(i64::from(self.days_in_month()));
        (next.year() <= MAX_YEAR).then_some(Self { first: next })
    }

    /// Preceding month
    pub fn pred(&self) -> Self {
        Self::from_date(self.first - Duration::days(1))
    }

    /// Every month from `self` through `end`, inclusive, in chronological order.
    /// Empty when `end` precedes `self`.
    pub fn through(self, end: MonthYear) -> impl Iterator<Item = MonthYear> {
        std::iter::successors(Some(self), |m| m.succ()).take_while(move |m| *m <= end)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Error returned when a `YYYY-MM` string cannot be parsed into a [`MonthYear`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMonthYearError {
    input: String,
}

impl fmt::Display for ParseMonthYearError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "invalid month '{}' (expected YYYY-MM, month 1-12, year {}-{})",
            self.input, MIN_YEAR, MAX_YEAR
        )
    }
}

impl std::error::Error for ParseMonthYearError {}

impl FromStr for MonthYear {
    type Err = ParseMonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMonthYearError {
            input: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        MonthYear::new(year, month).ok_or_else(err)
    }
}

impl TryFrom<String> for MonthYear {
    type Error = ParseMonthYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthYear> for String {
    fn from(value: MonthYear) -> Self {
        value.to_string()
    }
}
