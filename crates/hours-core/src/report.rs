//! Hour rows and report table assembly.
//!
//! Durations are shown as fractional hours truncated (not rounded) to two
//! decimals: 7199 seconds is 1.99 hours, never 2.0.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{DailyDurations, aggregate_durations};
use crate::interval::Interval;
use crate::period::Month;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Label of the header row's first column.
pub const HEADER_LABEL: &str = "date";
/// Label of the header row's second column.
pub const HEADER_VALUE: &str = "hours";
/// Label of the total row.
pub const TOTAL_LABEL: &str = "total";

/// Truncates toward zero at the second decimal: `floor(value * 100) / 100`.
///
/// The multiplication runs on the binary value, so a quotient that is only
/// nearly exact can lose a hundredth: 1044 seconds (0.29 h) becomes 0.28.
pub fn truncate_hundredths(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// One day's hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub hours: f64,
}

impl HourRow {
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            hours,
        }
    }
}

/// A line of the rendered report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    /// The `date | hours` column titles.
    Header,
    /// A single day.
    Day(HourRow),
    /// The monthly total.
    Total(f64),
}

impl ReportRow {
    /// Left column text.
    pub fn label(&self) -> &str {
        match self {
            Self::Header => HEADER_LABEL,
            Self::Day(row) => &row.date,
            Self::Total(_) => TOTAL_LABEL,
        }
    }

    /// Numeric value, `None` for the header.
    pub const fn hours(&self) -> Option<f64> {
        match self {
            Self::Header => None,
            Self::Day(row) => Some(row.hours),
            Self::Total(hours) => Some(*hours),
        }
    }

    /// Both columns as display strings, hours with two decimals.
    pub fn cells(&self) -> [String; 2] {
        let value = self
            .hours()
            .map_or_else(|| HEADER_VALUE.to_string(), |h| format!("{h:.2}"));
        [self.label().to_string(), value]
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [label, value] = self.cells();
        write!(f, "{label}: {value}")
    }
}

/// Converts per-day durations to truncated hour rows, keeping day order.
#[allow(clippy::cast_precision_loss)]
pub fn to_hour_rows(daily: &DailyDurations) -> Vec<HourRow> {
    daily
        .entries()
        .iter()
        .map(|entry| {
            let hours = entry.duration.num_seconds() as f64 / SECONDS_PER_HOUR;
            HourRow::new(entry.date, truncate_hundredths(hours))
        })
        .collect()
}

/// Frames hour rows with a header row and a truncated total row.
pub fn build_report(hour_rows: Vec<HourRow>) -> Vec<ReportRow> {
    let total = truncate_hundredths(hour_rows.iter().map(|r| r.hours).sum());

    let mut rows = Vec::with_capacity(hour_rows.len() + 2);
    rows.push(ReportRow::Header);
    rows.extend(hour_rows.into_iter().map(ReportRow::Day));
    rows.push(ReportRow::Total(total));
    rows
}

/// A finished report for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub month: Month,
    pub rows: Vec<ReportRow>,
}

impl MonthlyReport {
    /// The day rows, without header and total.
    pub fn days(&self) -> impl Iterator<Item = &HourRow> {
        self.rows.iter().filter_map(|row| match row {
            ReportRow::Day(day) => Some(day),
            _ => None,
        })
    }

    /// The monthly total in hours.
    pub fn total_hours(&self) -> f64 {
        self.rows
            .iter()
            .rev()
            .find_map(|row| match row {
                ReportRow::Total(hours) => Some(*hours),
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// Runs the whole pipeline for `month`: enumerate, aggregate, convert, frame.
pub fn monthly_report(intervals: &[Interval], month: Month) -> MonthlyReport {
    let days = month.days();
    let daily = aggregate_durations(intervals, &days);
    let rows = build_report(to_hour_rows(&daily));
    tracing::debug!(%month, rows = rows.len(), "built monthly report");
    MonthlyReport { month, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::enumerate_month_days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(y: i32, m: u32, d: u32, seconds: i64) -> Interval {
        Interval::from_seconds(date(y, m, d).and_hms_opt(10, 0, 0).unwrap(), seconds)
    }

    #[test]
    fn test_truncate_hundredths_truncates() {
        assert!((truncate_hundredths(1.9997) - 1.99).abs() < f64::EPSILON);
        assert!((truncate_hundredths(2.999) - 2.99).abs() < f64::EPSILON);
        assert!((truncate_hundredths(1.5) - 1.5).abs() < f64::EPSILON);
        assert!(truncate_hundredths(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_7199_seconds_is_1_99_hours() {
        let days = vec![date(2024, 2, 1)];
        let daily = aggregate_durations(&[interval(2024, 2, 1, 7199)], &days);
        let rows = to_hour_rows(&daily);
        assert_eq!(rows, vec![HourRow::new(date(2024, 2, 1), 1.99)]);
    }

    #[test]
    fn test_truncation_can_drop_a_hundredth_on_inexact_quotients() {
        // 0.29 * 100.0 == 28.999999999999996
        assert_eq!(truncate_hundredths(1044.0 / SECONDS_PER_HOUR), 0.28);
        assert_eq!(truncate_hundredths(4104.0 / SECONDS_PER_HOUR), 1.13);
        assert_eq!(truncate_hundredths(5400.0 / SECONDS_PER_HOUR), 1.5);
    }

    #[test]
    fn test_hour_rows_use_iso_dates() {
        let days = enumerate_month_days(date(2024, 3, 1));
        let rows = to_hour_rows(&aggregate_durations(&[], &days));
        assert_eq!(rows[0].date, "2024-03-01");
        assert_eq!(rows[30].date, "2024-03-31");
    }

    #[test]
    fn test_build_report_framing() {
        let rows = build_report(vec![
            HourRow::new(date(2024, 2, 1), 1.5),
            HourRow::new(date(2024, 2, 2), 2.25),
        ]);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], ReportRow::Header);
        assert_eq!(rows[1].label(), "2024-02-01");
        assert_eq!(rows[2].label(), "2024-02-02");
        assert_eq!(rows[3], ReportRow::Total(3.75));
    }

    #[test]
    fn test_build_report_empty() {
        assert_eq!(
            build_report(Vec::new()),
            vec![ReportRow::Header, ReportRow::Total(0.0)]
        );
    }

    #[test]
    fn test_total_truncates_sum() {
        let rows = build_report(vec![
            HourRow::new(date(2024, 2, 1), 0.1),
            HourRow::new(date(2024, 2, 2), 0.2),
        ]);
        // 0.1 + 0.2 == 0.30000000000000004
        assert_eq!(rows.last(), Some(&ReportRow::Total(0.3)));
    }

    #[test]
    fn test_cells() {
        assert_eq!(ReportRow::Header.cells(), ["date", "hours"]);
        assert_eq!(
            ReportRow::Day(HourRow::new(date(2024, 2, 1), 1.5)).cells(),
            ["2024-02-01", "1.50"]
        );
        assert_eq!(ReportRow::Total(3.5).cells(), ["total", "3.50"]);
        assert_eq!(ReportRow::Total(3.5).to_string(), "total: 3.50");
    }

    #[test]
    fn test_rows_ordered_regardless_of_interval_order() {
        let month = Month::new(2024, 2).unwrap();
        let report = monthly_report(
            &[
                interval(2024, 2, 28, 600),
                interval(2024, 2, 3, 600),
                interval(2024, 2, 17, 600),
            ],
            month,
        );

        assert_eq!(report.rows.first(), Some(&ReportRow::Header));
        assert!(matches!(report.rows.last(), Some(ReportRow::Total(_))));
        let dates: Vec<_> = report.days().map(|d| d.date.clone()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(dates.len(), 29);
    }

    #[test]
    fn test_february_2024_end_to_end() {
        let month = Month::new(2024, 2).unwrap();
        let report = monthly_report(
            &[
                interval(2024, 2, 1, 3600),
                interval(2024, 2, 1, 1800),
                interval(2024, 2, 15, 7200),
            ],
            month,
        );

        assert_eq!(report.rows.len(), 31);
        for day in report.days() {
            let expected = match day.date.as_str() {
                "2024-02-01" => 1.5,
                "2024-02-15" => 2.0,
                _ => 0.0,
            };
            assert!(
                (day.hours - expected).abs() < f64::EPSILON,
                "{} had {}",
                day.date,
                day.hours
            );
        }
        assert!((report.total_hours() - 3.5).abs() < f64::EPSILON);
        assert_eq!(report.rows.last(), Some(&ReportRow::Total(3.5)));
    }

    #[test]
    fn test_boundary_interval_excluded_from_april() {
        let month = Month::new(2024, 4).unwrap();
        let late_march =
            Interval::from_seconds(date(2024, 3, 31).and_hms_opt(23, 30, 0).unwrap(), 3600);
        let report = monthly_report(&[late_march], month);

        assert_eq!(report.days().count(), 30);
        assert!(report.total_hours().abs() < f64::EPSILON);
    }

    #[test]
    fn test_hour_row_serializes() {
        let json = serde_json::to_string(&HourRow::new(date(2024, 2, 15), 2.0)).unwrap();
        assert_eq!(json, r#"{"date":"2024-02-15","hours":2.0}"#);
    }
}
