// src/history/mod.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of converting one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Parsed and aggregated; `rows` is the count that made it into the output.
    Converted { rows: u64 },
    /// No file at the expected path; the year has no data.
    Missing,
    /// The file could not be read or parsed and was left out.
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub year: i32,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
    pub processing_start: DateTime<Utc>,
    pub processing_end: DateTime<Utc>,
}

/// Per-file results of one batch run, in processing order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started: DateTime<Utc>,
    pub finished: Option<DateTime<Utc>>,
    pub files: Vec<FileRecord>,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started: Utc::now(),
            finished: None,
            files: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        year: i32,
        path: impl Into<PathBuf>,
        status: FileStatus,
        processing_start: DateTime<Utc>,
    ) {
        self.files.push(FileRecord {
            year,
            path: path.into(),
            status,
            processing_start,
            processing_end: Utc::now(),
        });
    }

    pub fn finish(&mut self) {
        self.finished = Some(Utc::now());
    }

    pub fn converted(&self) -> impl Iterator<Item = &FileRecord> {
        self.with_status(|s| matches!(s, FileStatus::Converted { .. }))
    }

    pub fn missing(&self) -> impl Iterator<Item = &FileRecord> {
        self.with_status(|s| matches!(s, FileStatus::Missing))
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileRecord> {
        self.with_status(|s| matches!(s, FileStatus::Failed { .. }))
    }

    fn with_status(&self, pred: fn(&FileStatus) -> bool) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(move |f| pred(&f.status))
    }

    /// True when no file failed. Missing files do not count as failures.
    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_records() {
        let mut run = RunSummary::new();
        let now = Utc::now();
        run.record(2003, "data/utmb_2003.csv", FileStatus::Converted { rows: 67 }, now);
        run.record(2004, "data/utmb_2004.csv", FileStatus::Missing, now);
        run.record(
            2005,
            "data/utmb_2005.csv",
            FileStatus::Failed { reason: "bad utf-8".into() },
            now,
        );
        run.finish();

        assert_eq!(run.converted().count(), 1);
        assert_eq!(run.missing().map(|f| f.year).collect::<Vec<_>>(), vec![2004]);
        assert_eq!(run.failed().map(|f| f.year).collect::<Vec<_>>(), vec![2005]);
        assert!(!run.is_clean());
        assert!(run.finished.is_some());
    }

    #[test]
    fn serializes_status_inline() {
        let mut run = RunSummary::new();
        run.record(2003, "data/utmb_2003.csv", FileStatus::Converted { rows: 5 }, Utc::now());
        let json = serde_json::to_value(&run).unwrap();
        let file = &json["files"][0];
        assert_eq!(file["status"], "converted");
        assert_eq!(file["rows"], 5);
        assert_eq!(file["year"], 2003);
    }
}
