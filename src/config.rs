//! Pipeline configuration.
//!
//! Every field has a default matching the layout the front-end expects, so
//! both binaries run without arguments. A YAML file may override any subset.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// What to do with `<prefix>_<year>.csv` files whose year segment is not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearPolicy {
    /// Log a warning and leave the file out of the batch.
    #[default]
    Skip,
    /// Abort discovery with an error naming the file.
    Reject,
}

/// Inclusive range of race years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first..=self.last
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `<prefix>_<year>.csv` inputs.
    pub data_dir: PathBuf,
    pub file_prefix: String,
    /// Generated TypeScript module with every year's statistics.
    pub summary_output: PathBuf,
    /// Directory receiving one `race_<year>.json` per year.
    pub details_dir: PathBuf,
    /// Field values treated as absent by the summary pipeline.
    pub null_values: Vec<String>,
    /// How many nationalities each year keeps.
    pub top_nationalities: usize,
    pub invalid_year: YearPolicy,
    /// Fixed list of years for the detail pipeline; `None` means discover from `data_dir`.
    pub detail_years: Option<YearRange>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_prefix: "utmb".to_string(),
            summary_output: PathBuf::from("src/data/processedData.ts"),
            details_dir: PathBuf::from("public/data/races"),
            null_values: ["", " ", "NA", "N/A"].map(String::from).to_vec(),
            top_nationalities: 10,
            invalid_year: YearPolicy::Skip,
            detail_years: None,
        }
    }
}

impl Config {
    /// Load a YAML file; missing keys keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Output path of the detail JSON for `year`.
    pub fn detail_path(&self, year: i32) -> PathBuf {
        self.details_dir.join(format!("race_{}.json", year))
    }
}
