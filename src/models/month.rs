//! Calendar month addressing for payroll and reports.
//!
//! Payroll is computed per calendar month; this module provides the
//! [`PayMonth`] value type that the calculator, reports, and API all use to
//! address one. The wire format is the `YYYY-MM` string the operator surface
//! submits.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A calendar month in a specific year, used to scope payroll runs.
///
/// Internally stored as the first day of the month, so every constructed
/// value is a valid calendar month and date arithmetic needs no re-checking.
///
/// # Example
///
/// ```
/// use attend_engine::models::PayMonth;
/// use chrono::NaiveDate;
///
/// let month: PayMonth = "2026-01".parse().unwrap();
/// assert_eq!(month.days_in_month(), 31);
/// assert!(month.contains(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(month.to_string(), "2026-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayMonth(NaiveDate);

impl PayMonth {
    /// Creates a pay month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the month is outside `1..=12` or the
    /// year is outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(PayMonth)
            .ok_or_else(|| EngineError::Validation {
                field: "month".to_string(),
                message: format!("{year}-{month} is not a valid calendar month"),
            })
    }

    /// Returns the pay month containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        // Day 1 exists in every month, so the fallback never fires.
        PayMonth(date.with_day(1).unwrap_or(date))
    }

    /// The year of this month.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// The 1-based month number.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// The first day of this month.
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Iterates every calendar day of this month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let year = self.0.year();
        let month = self.0.month();
        self.0
            .iter_days()
            .take_while(move |d| d.year() == year && d.month() == month)
    }

    /// The number of calendar days in this month.
    ///
    /// # Example
    ///
    /// ```
    /// use attend_engine::models::PayMonth;
    ///
    /// assert_eq!(PayMonth::new(2026, 2).unwrap().days_in_month(), 28);
    /// assert_eq!(PayMonth::new(2028, 2).unwrap().days_in_month(), 29);
    /// ```
    pub fn days_in_month(self) -> u32 {
        self.days().count() as u32
    }

    /// Returns true if the given date falls inside this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.0.year() && date.month() == self.0.month()
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0.year(), self.0.month())
    }
}

impl FromStr for PayMonth {
    type Err = EngineError;

    /// Parses the `YYYY-MM` form submitted by the operator surface.
    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::Validation {
            field: "month".to_string(),
            message: format!("'{s}' is not in YYYY-MM format"),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        PayMonth::new(year, month)
    }
}

impl Serialize for PayMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PayMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
