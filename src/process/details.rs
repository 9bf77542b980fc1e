use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::process::{load_csv, RawRow};
use crate::schema::{ParticipantRecord, RaceDetail};

impl ParticipantRecord {
    /// Build from a CSV row; absent fields become `""`.
    pub fn from_row(row: &RawRow<'_>) -> Self {
        let field = |name: &str| row.get(name).unwrap_or_default().to_string();
        Self {
            bib: field("bib"),
            name: field("name"),
            team: field("team"),
            category: field("category"),
            rank: field("rank"),
            nationality: field("nationality"),
            time: field("time"),
            timediff: field("timediff"),
        }
    }

    /// Only ranked, named participants make it into the detail view.
    pub fn is_listed(&self) -> bool {
        !self.name.is_empty() && !self.rank.is_empty()
    }
}

/// Load the cleaned participant list for one year. `Ok(None)` if the file is missing.
///
/// Only blank fields count as absent here; values like `NA` are kept as-is.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_race_detail<P: AsRef<Path>>(year: i32, path: P) -> Result<Option<RaceDetail>> {
    let Some(table) = load_csv(path, &[])? else {
        return Ok(None);
    };

    let participants: Vec<ParticipantRecord> = table
        .rows()
        .map(|row| ParticipantRecord::from_row(&row))
        .filter(ParticipantRecord::is_listed)
        .collect();

    debug!(
        rows = table.len(),
        kept = participants.len(),
        "cleaned participants"
    );
    Ok(Some(RaceDetail::new(year, participants)))
}
