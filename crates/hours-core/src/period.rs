//! Target month validation and calendar day enumeration.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors raised while resolving the report period.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// The month number is not 1 through 12.
    #[error("invalid month: {year}-{month} (month must be 1-12)")]
    InvalidMonth { year: i32, month: u32 },
    /// The year is outside the supported calendar range.
    #[error("year {year} is out of range")]
    YearOutOfRange { year: i32 },
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month after checking that its first day exists.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth { year, month });
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodError::YearOutOfRange { year });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The 1st of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated in the constructors.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Every day of the month in ascending order.
    pub fn days(&self) -> Vec<NaiveDate> {
        enumerate_month_days(self.first_day())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

/// Resolves the report month from optional CLI values, defaulting to `today`.
pub fn resolve_month(
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
) -> Result<Month, PeriodError> {
    Month::new(
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| today.month()),
    )
}

/// Returns every day from the 1st through the last day of `anchor`'s month.
pub fn enumerate_month_days(anchor: NaiveDate) -> Vec<NaiveDate> {
    let Some(first) = anchor.with_day(1) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect()
}
