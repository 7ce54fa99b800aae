//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Monthly hours report.
///
/// Sums Timewarrior intervals per day for one calendar month, prints them as
/// a table and writes a one-page PDF.
#[derive(Debug, Parser)]
#[command(name = "hours", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report year (defaults to the current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Report month, 1-12 (defaults to the current month).
    #[arg(long)]
    pub month: Option<u32>,

    /// Only count intervals with this tag. Repeat for several tags.
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Where to write the PDF report.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Skip writing the PDF.
    #[arg(long)]
    pub no_pdf: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hours"]).unwrap();
        assert_eq!(cli.year, None);
        assert_eq!(cli.month, None);
        assert!(cli.tags.is_empty());
        assert!(!cli.json);
        assert!(!cli.no_pdf);
    }

    #[test]
    fn test_period_and_tags() {
        let cli = Cli::try_parse_from([
            "hours", "--year", "2024", "--month", "2", "-t", "client", "--tag", "billable",
        ])
        .unwrap();
        assert_eq!(cli.year, Some(2024));
        assert_eq!(cli.month, Some(2));
        assert_eq!(cli.tags, ["client", "billable"]);
    }

    #[test]
    fn test_month_must_be_numeric() {
        assert!(Cli::try_parse_from(["hours", "--month", "feb"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
