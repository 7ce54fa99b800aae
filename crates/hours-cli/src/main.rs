use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hours_cli::commands::report::{self, ReportOptions};
use hours_cli::{Cli, Config};
use hours_core::resolve_month;
use hours_timew::TimewSource;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // Validate the period before touching config or timew.
    let today = Local::now().date_naive();
    let month = resolve_month(cli.year, cli.month, today)?;

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let tags = if cli.tags.is_empty() {
        config.tags.clone()
    } else {
        cli.tags
    };
    let output = (!cli.no_pdf).then(|| cli.output.unwrap_or_else(|| config.output_path.clone()));

    let source = TimewSource::new(&config.timew_binary, config.timeout());
    let options = ReportOptions {
        month,
        tags,
        output,
        json: cli.json,
    };

    let mut stdout = std::io::stdout().lock();
    report::run(&mut stdout, &source, &options)?;

    Ok(())
}
