// src/fetch/mod.rs

use anyhow::{bail, Context, Result};
use glob::{glob, Pattern};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{YearPolicy, YearRange};

/// One input file and the race year taken from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFile {
    pub year: i32,
    pub path: PathBuf,
}

/// Find every `<prefix>_<year>.csv` in `dir`, ascending by year.
///
/// The year segment must be exactly four ASCII digits; names like
/// `utmb_+2003.csv` or `utmb_02003.csv` are invalid. Invalid names and
/// repeated years are handled per `policy` (a skipped duplicate is the
/// later path in sort order). A missing `dir` yields no files.
pub fn discover_year_files<P: AsRef<Path>>(
    dir: P,
    prefix: &str,
    policy: YearPolicy,
) -> Result<Vec<YearFile>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        warn!("data directory {} not found", dir.display());
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/{}_*.csv",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(prefix)
    );
    let stem_re = Regex::new(&format!(r"^{}_(.+)$", regex::escape(prefix)))?;
    let year_re = Regex::new(r"^[0-9]{4}$")?;

    let mut files = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
        let path = entry?;
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(caps) = stem_re.captures(stem) else {
            continue;
        };

        let segment = &caps[1];
        match segment.parse::<i32>() {
            Ok(year) if year_re.is_match(segment) => {
                debug!(year, path = %path.display(), "found input");
                files.push(YearFile { year, path });
            }
            _ => match policy {
                YearPolicy::Skip => {
                    warn!("skipping {}: `{}` is not a year", path.display(), segment);
                }
                YearPolicy::Reject => {
                    bail!("{}: `{}` is not a year", path.display(), segment);
                }
            },
        }
    }

    files.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.path.cmp(&b.path)));
    unique_years(files, policy)
}

/// Keep one file per year from a year-sorted list; later repeats follow `policy`.
fn unique_years(files: Vec<YearFile>, policy: YearPolicy) -> Result<Vec<YearFile>> {
    let mut unique: Vec<YearFile> = Vec::with_capacity(files.len());
    for file in files {
        let earlier = unique
            .last()
            .filter(|p| p.year == file.year)
            .map(|p| p.path.clone());
        let Some(earlier) = earlier else {
            unique.push(file);
            continue;
        };
        match policy {
            YearPolicy::Skip => warn!(
                "skipping {}: year {} already read from {}",
                file.path.display(),
                file.year,
                earlier.display()
            ),
            YearPolicy::Reject => bail!(
                "{}: year {} already read from {}",
                file.path.display(),
                file.year,
                earlier.display()
            ),
        }
    }
    Ok(unique)
}

/// Expected `<prefix>_<year>.csv` path for every year in `range`, present or not.
pub fn year_files_in_range<P: AsRef<Path>>(dir: P, prefix: &str, range: YearRange) -> Vec<YearFile> {
    let dir = dir.as_ref();
    range
        .years()
        .map(|year| YearFile {
            year,
            path: dir.join(format!("{}_{}.csv", prefix, year)),
        })
        .collect()
}
