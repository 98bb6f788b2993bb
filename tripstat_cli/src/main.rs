use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tripstat::{render_histogram, render_hour_histogram, render_summary, scan_trips};

#[derive(Parser, Debug)]
#[command(author, version, about = "Vehicle trip-log summary CLI", long_about = None)]
struct Cli {
    /// Semicolon-delimited UTF-16 trip export to summarize
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Usage problems exit with status 1, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let data = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let acc = scan_trips(&data)
        .with_context(|| format!("failed to scan {}", cli.input.display()))?;
    let summary = acc.summary()?;
    info!(
        "scanned {} usable trips over {:.1} km",
        summary.trips, summary.total_distance_km
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(render_summary(&summary).as_bytes())?;
    if let Some(block) = render_histogram(acc.distances(), "Trip distance", "km", 50, 50) {
        out.write_all(block.as_bytes())?;
    }
    if let Some(block) = render_histogram(acc.durations(), "Trip duration", "minutes", 10, 50) {
        out.write_all(block.as_bytes())?;
    }
    if let Some(block) = render_hour_histogram(acc.start_hours(), 50) {
        out.write_all(block.as_bytes())?;
    }
    Ok(())
}
