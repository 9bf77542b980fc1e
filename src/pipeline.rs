// src/pipeline.rs
//! Batch drivers: one sequential pass over the input files per run.
//!
//! A file that is missing or fails to parse is recorded in the `RunSummary`
//! and the batch moves on. Discovery errors and output write errors are
//! returned to the caller.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::fetch::{discover_year_files, year_files_in_range, YearFile};
use crate::history::{FileStatus, RunSummary};
use crate::process::{details::load_race_detail, stats::summarize_file};
use crate::render::{render_race_detail, render_summary_module};
use crate::schema::{summary, write_output, YearStats};

/// Result of the summary pipeline.
#[derive(Debug)]
pub struct SummaryRun {
    /// Per-year statistics, ascending by year, as written to the module.
    pub years: Vec<YearStats>,
    pub output: PathBuf,
    pub run: RunSummary,
}

/// Aggregate every discovered year and write the TypeScript module.
pub fn run_summary(config: &Config, generated_at: NaiveDateTime) -> Result<SummaryRun> {
    let files = discover_year_files(&config.data_dir, &config.file_prefix, config.invalid_year)?;
    info!("found {} CSV files in {}", files.len(), config.data_dir.display());

    let mut run = RunSummary::new();
    let mut years = Vec::with_capacity(files.len());

    for YearFile { year, path } in files {
        let start = Utc::now();
        let status = match summarize_file(
            year,
            &path,
            &config.null_values,
            config.top_nationalities,
        ) {
            Ok(Some(stats)) => {
                info!(
                    year,
                    "OK: {} participants, {} finishers",
                    stats.total_participants,
                    stats.finishers
                );
                let rows = stats.total_participants;
                years.push(stats);
                FileStatus::Converted { rows }
            }
            Ok(None) => {
                warn!(year, "{} disappeared before it could be read", path.display());
                FileStatus::Missing
            }
            Err(e) => {
                error!(year, "processing {} failed: {:#}", path.display(), e);
                FileStatus::Failed {
                    reason: format!("{:#}", e),
                }
            }
        };
        run.record(year, path, status, start);
    }

    years.sort_by_key(|y| y.year);

    let text = render_summary_module(&years, generated_at)?;
    write_output(&config.summary_output, &text)
        .context("writing summary module")?;
    info!(
        "wrote {} chars to {}",
        text.len(),
        config.summary_output.display()
    );

    run.finish();
    log_totals(&years);

    Ok(SummaryRun {
        years,
        output: config.summary_output.clone(),
        run,
    })
}

fn log_totals(years: &[YearStats]) {
    info!(
        years = years.len(),
        participants = summary::total_participants(years),
        finishers = summary::total_finishers(years),
        "overall DNF rate {:.1}%",
        summary::overall_dnf_rate(years)
    );
}

/// Write `race_<year>.json` for every year that has data.
///
/// Years come from `config.detail_years` when set, otherwise from discovery;
/// years without a file are recorded as missing.
pub fn run_details(config: &Config) -> Result<RunSummary> {
    let files = match config.detail_years {
        Some(range) => year_files_in_range(&config.data_dir, &config.file_prefix, range),
        None => discover_year_files(&config.data_dir, &config.file_prefix, config.invalid_year)?,
    };

    let mut run = RunSummary::new();
    for YearFile { year, path } in files {
        let start = Utc::now();
        let status = match load_race_detail(year, &path) {
            Ok(Some(detail)) => {
                let out = config.detail_path(year);
                let json = render_race_detail(&detail)?;
                write_output(&out, &json)?;
                info!(year, "generated {} ({} participants)", out.display(), detail.total);
                FileStatus::Converted {
                    rows: detail.total as u64,
                }
            }
            Ok(None) => FileStatus::Missing,
            Err(e) => {
                error!(year, "processing {} failed: {:#}", path.display(), e);
                FileStatus::Failed {
                    reason: format!("{:#}", e),
                }
            }
        };
        run.record(year, path, status, start);
    }
    run.finish();

    info!(
        "race details: {} written, {} missing, {} failed",
        run.converted().count(),
        run.missing().count(),
        run.failed().count()
    );
    Ok(run)
}

/// Write the run summary as pretty JSON.
pub fn write_report(run: &RunSummary, path: &std::path::Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(run).context("serializing run summary")?;
    json.push('\n');
    write_output(path, &json)
}
