//! Tracked intervals and the source seam that supplies them.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Errors from an interval source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be started (e.g. the binary is missing).
    #[error("interval source unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
    /// The source did not answer within the allotted time.
    #[error("interval source timed out after {timeout:?}")]
    Timeout { timeout: std::time::Duration },
    /// The source ran but reported failure.
    #[error("interval source failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
    /// The source's output could not be understood.
    #[error("malformed interval data: {0}")]
    Malformed(String),
    /// The runtime driving the source could not be set up.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// One tracked time span.
///
/// `start` is a local wall-clock timestamp; the interval belongs to the
/// calendar day it started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: NaiveDateTime,
    duration: Duration,
}

impl Interval {
    /// Creates an interval. Negative durations are clamped to zero.
    pub fn new(start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            start,
            duration: duration.max(Duration::zero()),
        }
    }

    /// Convenience constructor from a whole number of seconds.
    pub fn from_seconds(start: NaiveDateTime, seconds: i64) -> Self {
        Self::new(start, Duration::seconds(seconds))
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The calendar date the interval started on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

/// Supplies intervals matching a tag filter.
pub trait IntervalSource {
    /// Returns all intervals carrying every tag in `tags`. An empty filter
    /// returns everything.
    fn intervals(&self, tags: &[String]) -> Result<Vec<Interval>, SourceError>;
}

impl<S: IntervalSource + ?Sized> IntervalSource for &S {
    fn intervals(&self, tags: &[String]) -> Result<Vec<Interval>, SourceError> {
        (**self).intervals(tags)
    }
}
