//! Calendar month arithmetic for the date range popup.

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

/// Errors constructing calendar months.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    /// Month number outside 1-12, or the year is out of the supported range.
    #[error("invalid calendar month {month} of year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One month of the calendar grid.
///
/// Internally anchored to the first day of the month, which makes every
/// derived date valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// Create a month from year and month number (1-12).
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(CalendarError::InvalidMonth { year, month })
    }

    /// The month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Year of this month.
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number (1-12).
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        next.pred_opt().map(|d| d.day()).unwrap_or(28)
    }

    /// A specific day of this month, if it exists.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), day)
    }

    /// Whether a date falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month.
    pub fn next(&self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// The preceding month.
    pub fn prev(&self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// Header title, e.g. `August 2025`.
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month() - 1) as usize], self.year())
    }
}
