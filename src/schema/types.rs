// src/schema/types.rs

use serde::{Deserialize, Serialize};

use super::Counts;

/// One participant row for the per-year detail view.
///
/// All fields are trimmed strings; an absent CSV field is `""`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Default)]
pub struct ParticipantRecord {
    pub bib: String,
    pub name: String,
    pub team: String,
    pub category: String,
    pub rank: String,
    pub nationality: String,
    pub time: String,
    pub timediff: String,
}

/// Content of `race_<year>.json`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct RaceDetail {
    pub year: i32,
    pub participants: Vec<ParticipantRecord>,
    /// Always `participants.len()`.
    pub total: usize,
}

impl RaceDetail {
    pub fn new(year: i32, participants: Vec<ParticipantRecord>) -> Self {
        let total = participants.len();
        Self {
            year,
            participants,
            total,
        }
    }
}

/// Aggregate statistics for one race edition.
///
/// `finishers + dnf_count == total_participants`, and `dnf_rate` is the DNF
/// percentage rounded to 2 decimals (0 for an empty year).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct YearStats {
    pub year: i32,
    pub total_participants: u64,
    pub finishers: u64,
    pub dnf_count: u64,
    pub dnf_rate: f64,
    /// Mean finish time in minutes, 1 decimal.
    pub avg_time_minutes: f64,
    pub categories: Counts,
    pub top_nationalities: Counts,
}
