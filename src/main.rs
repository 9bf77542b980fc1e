use anyhow::Result;
use chrono::Local;
use clap::Parser;
use raceprep::{
    config::{Config, YearPolicy},
    pipeline::{run_summary, write_report},
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Aggregate yearly race CSVs into the front-end statistics module"
)]
struct Args {
    /// YAML config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory with `<prefix>_<year>.csv` files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    prefix: Option<String>,
    /// Generated TypeScript module
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Fail on input files whose year segment is not a number
    #[arg(long)]
    strict_years: bool,
    /// Also write the per-file run summary as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("race data processor");

    // ─── 2) configure ────────────────────────────────────────────────
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(prefix) = args.prefix {
        config.file_prefix = prefix;
    }
    if let Some(output) = args.output {
        config.summary_output = output;
    }
    if args.strict_years {
        config.invalid_year = YearPolicy::Reject;
    }

    // ─── 3) aggregate + write module ─────────────────────────────────
    let result = run_summary(&config, Local::now().naive_local())?;
    info!(years = result.years.len(), "statistics module at {}", result.output.display());
    if !result.run.is_clean() {
        for failed in result.run.failed() {
            warn!(year = failed.year, "skipped {}", failed.path.display());
        }
    }

    // ─── 4) optional run report ──────────────────────────────────────
    if let Some(path) = &args.report {
        write_report(&result.run, path)?;
        info!("wrote run report to {}", path.display());
    }

    info!("done");
    Ok(())
}
