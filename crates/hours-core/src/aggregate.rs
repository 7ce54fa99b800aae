//! Per-day duration aggregation.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::interval::Interval;

/// Accumulated duration for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayDuration {
    pub date: NaiveDate,
    pub duration: Duration,
}

/// Dense, ordered per-day durations.
///
/// Holds exactly one entry per day passed to [`aggregate_durations`], in the
/// order they were given. Days without intervals carry a zero duration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyDurations {
    entries: Vec<DayDuration>,
}

impl DailyDurations {
    pub fn entries(&self) -> &[DayDuration] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Duration recorded for `date`, or `None` if the day is not covered.
    pub fn get(&self, date: NaiveDate) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| e.date == date)
            .map(|e| e.duration)
    }

    /// Sum over all days.
    pub fn total(&self) -> Duration {
        self.entries
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.duration)
    }
}

impl IntoIterator for DailyDurations {
    type Item = DayDuration;
    type IntoIter = std::vec::IntoIter<DayDuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Sums interval durations into the given days.
///
/// Intervals whose start date is not among `days` are skipped.
pub fn aggregate_durations(intervals: &[Interval], days: &[NaiveDate]) -> DailyDurations {
    let mut entries: Vec<DayDuration> = days
        .iter()
        .map(|&date| DayDuration {
            date,
            duration: Duration::zero(),
        })
        .collect();

    let index: HashMap<NaiveDate, usize> = days
        .iter()
        .enumerate()
        .map(|(i, &date)| (date, i))
        .collect();

    let mut skipped = 0usize;
    for interval in intervals {
        if let Some(&i) = index.get(&interval.start_date()) {
            entries[i].duration = entries[i].duration + interval.duration();
        } else {
            skipped += 1;
            tracing::trace!(start = %interval.start(), "interval outside target days");
        }
    }

    tracing::debug!(
        intervals = intervals.len(),
        skipped,
        days = days.len(),
        "aggregated durations"
    );

    DailyDurations { entries }
}
