//! Timewarrior interval source.
//!
//! Runs `timew export <tags...>` and turns its JSON into [`Interval`]s.
//!
//! # Export format
//!
//! Timewarrior prints a JSON array of objects. Timestamps are UTC in the
//! compact `YYYYMMDDTHHMMSSZ` form; `end` is absent for the interval that is
//! still being tracked:
//!
//! ```json
//! [
//!   {"id": 2, "start": "20240201T080000Z", "end": "20240201T090000Z", "tags": ["client"]},
//!   {"id": 1, "start": "20240215T130000Z", "tags": ["client"]}
//! ]
//! ```
//!
//! Start times are moved into the local time zone before the interval is
//! bucketed, so work started at 23:30 local time counts for that local day.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use hours_core::{Interval, IntervalSource, SourceError};
use serde::Deserialize;

/// Default binary name, resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "timew";
/// Default limit for one export invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// One entry of `timew export`. Other fields (`id`, `tags`, `annotation`)
/// are ignored.
#[derive(Debug, Deserialize)]
struct ExportedInterval {
    start: String,
    end: Option<String>,
}

/// Interval source backed by the `timew` command.
#[derive(Debug, Clone)]
pub struct TimewSource {
    binary: PathBuf,
    timeout: Duration,
}

impl Default for TimewSource {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, DEFAULT_TIMEOUT)
    }
}

impl TimewSource {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Runs the export and returns its raw stdout.
    pub fn export(&self, tags: &[String]) -> Result<String, SourceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceError::Runtime)?;
        runtime.block_on(self.run_export(tags))
    }

    async fn run_export(&self, tags: &[String]) -> Result<String, SourceError> {
        let mut command = tokio::process::Command::new(&self.binary);
        command
            .arg("export")
            .args(tags)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(binary = %self.binary.display(), ?tags, "running timew export");

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(SourceError::Unavailable)?,
            Err(_) => {
                return Err(SourceError::Timeout {
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(SourceError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|err| SourceError::Malformed(format!("export is not UTF-8: {err}")))
    }
}

impl IntervalSource for TimewSource {
    fn intervals(&self, tags: &[String]) -> Result<Vec<Interval>, SourceError> {
        let raw = self.export(tags)?;
        let intervals = parse_export(&raw, &chrono::Local, Utc::now())?;
        tracing::debug!(count = intervals.len(), "parsed timew export");
        Ok(intervals)
    }
}

/// Parses `timew export` output.
///
/// Start times are converted to `tz` wall-clock time. An interval without an
/// end is measured up to `now`. Empty output means no intervals.
pub fn parse_export<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<Vec<Interval>, SourceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let exported: Vec<ExportedInterval> = serde_json::from_str(raw)
        .map_err(|err| SourceError::Malformed(format!("invalid export JSON: {err}")))?;

    exported
        .into_iter()
        .map(|entry| {
            let start = parse_timestamp(&entry.start)?;
            let end = match entry.end.as_deref() {
                Some(end) => parse_timestamp(end)?,
                None => {
                    tracing::debug!(%start, "open interval measured up to now");
                    now.max(start)
                }
            };
            if end < start {
                return Err(SourceError::Malformed(format!(
                    "interval ends before it starts: {} > {}",
                    entry.start,
                    entry.end.unwrap_or_default()
                )));
            }
            Ok(Interval::new(
                start.with_timezone(tz).naive_local(),
                end - start,
            ))
        })
        .collect()
}

/// Parses a `YYYYMMDDTHHMMSSZ` timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SourceError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| SourceError::Malformed(format!("invalid timestamp {value:?}: {err}")))
}
