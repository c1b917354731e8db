use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ratings::{Reports, AVERAGE_RATING};

/// Reads product ratings from CSV files and prints brands ranked by their
/// average rating.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Paths to the CSV files to read
    #[arg(long, num_args = 1.., required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Name of the report to produce
    #[arg(long, default_value = AVERAGE_RATING, value_name = "NAME")]
    report: String,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    run(&args, &Reports::default())
}

fn run(args: &Args, reports: &Reports) -> Result<ExitCode> {
    if reports.get(&args.report).is_none() {
        eprintln!("unknown report: {}", args.report);
        eprintln!(
            "available reports: {}",
            reports.names().collect::<Vec<_>>().join(", ")
        );
        return Ok(ExitCode::from(2));
    }
    let report = reports
        .run(&args.report, &args.files)
        .with_context(|| format!("building {} report", args.report))?;
    print!("{report}");
    Ok(ExitCode::SUCCESS)
}
