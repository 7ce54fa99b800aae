//! Core domain logic for monthly hours reports.
//!
//! This crate contains the fundamental types and logic for:
//! - Periods: validating a target month and enumerating its days
//! - Aggregation: bucketing interval durations into calendar days
//! - Reports: converting per-day durations into truncated hour rows

mod aggregate;
pub mod interval;
pub mod period;
pub mod report;

pub use aggregate::{DailyDurations, DayDuration, aggregate_durations};
pub use interval::{Interval, IntervalSource, SourceError};
pub use period::{Month, PeriodError, enumerate_month_days, resolve_month};
pub use report::{
    HourRow, MonthlyReport, ReportRow, build_report, monthly_report, to_hour_rows,
    truncate_hundredths,
};
