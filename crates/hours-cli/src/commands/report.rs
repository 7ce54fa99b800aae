//! Report command: fetch intervals, aggregate the month, render.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use hours_core::{IntervalSource, Month, MonthlyReport, monthly_report};
use serde::Serialize;

use crate::{pdf, table};

/// What to report and where to send it.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub month: Month,
    pub tags: Vec<String>,
    /// PDF destination; `None` skips the PDF.
    pub output: Option<PathBuf>,
    pub json: bool,
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub period: JsonPeriod,
    pub days: Vec<&'a hours_core::HourRow>,
    pub total_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonPeriod {
    pub year: i32,
    pub month: u32,
}

/// Formats the report as pretty-printed JSON.
pub fn format_report_json(report: &MonthlyReport) -> Result<String> {
    let json = JsonReport {
        period: JsonPeriod {
            year: report.month.year(),
            month: report.month.month(),
        },
        days: report.days().collect(),
        total_hours: report.total_hours(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

// ========== Public Interface ==========

/// Runs the report command, writing human output to `writer`.
///
/// Returns the PDF path when one was written.
pub fn run<W: Write, S: IntervalSource>(
    writer: &mut W,
    source: &S,
    options: &ReportOptions,
) -> Result<Option<PathBuf>> {
    let intervals = source
        .intervals(&options.tags)
        .context("failed to read intervals from timew")?;
    tracing::debug!(count = intervals.len(), month = %options.month, "fetched intervals");

    let report = monthly_report(&intervals, options.month);

    // Nothing reaches the writer until every sink has succeeded.
    let rendered = if options.json {
        format!("{}\n", format_report_json(&report)?)
    } else {
        format!(
            "Working hours for {}\n{}",
            report.month,
            table::format_table(&report.rows)
        )
    };

    let Some(path) = options.output.as_ref() else {
        write!(writer, "{rendered}")?;
        return Ok(None);
    };

    pdf::write_pdf(&report, path)
        .with_context(|| format!("failed to write PDF report to {}", path.display()))?;

    write!(writer, "{rendered}")?;
    if options.json {
        // Keep stdout valid JSON.
        eprintln!("PDF report in {}", path.display());
    } else {
        writeln!(writer, "PDF report in {}", path.display())?;
    }

    Ok(Some(path.clone()))
}
