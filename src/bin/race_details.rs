// src/bin/race_details.rs

use anyhow::Result;
use clap::Parser;
use raceprep::{
    config::{Config, YearPolicy, YearRange},
    pipeline::{run_details, write_report},
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Write one cleaned participant JSON per race year"
)]
struct Args {
    /// YAML config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    prefix: Option<String>,
    /// Directory receiving `race_<year>.json`
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// First year to convert; requires --last
    #[arg(long, requires = "last")]
    first: Option<i32>,
    #[arg(long, requires = "first")]
    last: Option<i32>,
    #[arg(long)]
    strict_years: bool,
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

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
    if let Some(dir) = args.out_dir {
        config.details_dir = dir;
    }
    if let (Some(first), Some(last)) = (args.first, args.last) {
        config.detail_years = Some(YearRange { first, last });
    }
    if args.strict_years {
        config.invalid_year = YearPolicy::Reject;
    }

    let run = run_details(&config)?;
    if !run.is_clean() {
        warn!("{} files failed to convert", run.failed().count());
    }
    if let Some(path) = &args.report {
        write_report(&run, path)?;
        info!("wrote run report to {}", path.display());
    }
    Ok(())
}
