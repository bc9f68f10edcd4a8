use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// A calendar month (`YYYY-MM`), the keying unit for goals and radar
/// snapshots.
///
/// Ordering is chronological, so "before the current month" checks are
/// plain comparisons.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthId {
    year: i32,
    month: u32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MonthError {
    #[error("month must be between 1 and 12, got {0}")]
    OutOfRange(u32),

    #[error("invalid month string: {0:?}")]
    Parse(String),
}

impl MonthId {
    /// Creates a `MonthId` from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns `MonthError::OutOfRange` if `month` is not in 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthError> {
        if !(1..=12).contains(&month) {
            return Err(MonthError::OutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The immediately preceding month.
    #[must_use]
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The immediately following month.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The first calendar day of this month.
    ///
    /// # Panics
    ///
    /// Never panics: day 1 of a validated month is always representable.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("day 1 of a valid month")
    }

    /// Number of calendar days in this month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        let next_first = self.next().first_day();
        next_first
            .signed_duration_since(self.first_day())
            .num_days() as u32
    }

    /// The date of the given 1-based day within this month, if it exists.
    #[must_use]
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// True if `date` falls inside this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Debug for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonthId({self})")
    }
}

impl FromStr for MonthId {
    type Err = MonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || MonthError::Parse(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(parse_err)?;
        let year: i32 = year.parse().map_err(|_| parse_err())?;
        let month: u32 = month.parse().map_err(|_| parse_err())?;
        Self::new(year, month).map_err(|_| parse_err())
    }
}

// Months serialize as their `YYYY-MM` string so they can key JSON maps.

impl Serialize for MonthId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
