use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::process::{load_csv, time_parser::time_to_minutes, utils::round_to, RawTable};
use crate::schema::{Counts, YearStats};

pub const TIME_COLUMN: &str = "time";
pub const CATEGORY_COLUMN: &str = "category";
pub const NATIONALITY_COLUMN: &str = "nationality";

/// Aggregate one year's rows.
///
/// A finisher is a row with a present `time`. The average covers only the
/// finisher times that parse as `HH:MM:SS`. Distributions skip absent values
/// and are empty when their column is missing; nationalities keep the
/// `top_n` most frequent.
pub fn compute_year_stats(year: i32, table: &RawTable, top_n: usize) -> YearStats {
    let total_participants = table.len() as u64;

    let (finishers, minutes) = match table.column(TIME_COLUMN) {
        Some(times) => {
            let present: Vec<&str> = times.flatten().collect();
            let minutes: Vec<f64> = present.iter().filter_map(|t| time_to_minutes(t)).collect();
            (present.len() as u64, minutes)
        }
        None => (0, Vec::new()),
    };
    let dnf_count = total_participants - finishers;

    let dnf_rate = if total_participants > 0 {
        dnf_count as f64 / total_participants as f64 * 100.0
    } else {
        0.0
    };
    let avg_time_minutes = if minutes.is_empty() {
        0.0
    } else {
        minutes.iter().sum::<f64>() / minutes.len() as f64
    };

    let categories = table
        .column(CATEGORY_COLUMN)
        .map(|col| Counts::tally(col.flatten()))
        .unwrap_or_default();
    let top_nationalities = table
        .column(NATIONALITY_COLUMN)
        .map(|col| Counts::tally(col.flatten()).truncated(top_n))
        .unwrap_or_default();

    debug!(
        year,
        total_participants,
        finishers,
        timed = minutes.len(),
        "computed year stats"
    );

    YearStats {
        year,
        total_participants,
        finishers,
        dnf_count,
        dnf_rate: round_to(dnf_rate, 2),
        avg_time_minutes: round_to(avg_time_minutes, 1),
        categories,
        top_nationalities,
    }
}

/// Load `path` and aggregate it. `Ok(None)` means the file does not exist.
#[tracing::instrument(level = "info", skip(path, null_values), fields(path = %path.as_ref().display()))]
pub fn summarize_file<P: AsRef<Path>>(
    year: i32,
    path: P,
    null_values: &[String],
    top_n: usize,
) -> Result<Option<YearStats>> {
    let Some(table) = load_csv(path, null_values)? else {
        return Ok(None);
    };
    Ok(Some(compute_year_stats(year, &table, top_n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[Option<&str>]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| v.map(String::from)).collect())
                .collect(),
        }
    }

    #[test]
    fn two_finishers_one_dnf() {
        let t = table(
            &["name", "time"],
            &[
                &[Some("A"), Some("20:00:00")],
                &[Some("B"), Some("30:00:00")],
                &[Some("C"), None],
            ],
        );
        let stats = compute_year_stats(2010, &t, 10);
        assert_eq!(stats.total_participants, 3);
        assert_eq!(stats.finishers, 2);
        assert_eq!(stats.dnf_count, 1);
        assert_eq!(stats.dnf_rate, 33.33);
        assert_eq!(stats.avg_time_minutes, 1500.0);
        assert!(stats.categories.is_empty());
        assert!(stats.top_nationalities.is_empty());
    }

    #[test]
    fn malformed_time_counts_as_finisher_but_not_in_average() {
        let t = table(
            &["time"],
            &[&[Some("10:00:00")], &[Some("garbage")], &[Some("11:00:00")]],
        );
        let stats = compute_year_stats(2011, &t, 10);
        assert_eq!(stats.finishers, 3);
        assert_eq!(stats.dnf_count, 0);
        assert_eq!(stats.avg_time_minutes, 630.0);
    }

    #[test]
    fn empty_table_has_zero_rates() {
        let t = table(&["time", "category"], &[]);
        let stats = compute_year_stats(2012, &t, 10);
        assert_eq!(stats.total_participants, 0);
        assert_eq!(stats.dnf_rate, 0.0);
        assert_eq!(stats.avg_time_minutes, 0.0);
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn missing_time_column_means_everyone_dnf() {
        let t = table(&["name"], &[&[Some("A")], &[Some("B")]]);
        let stats = compute_year_stats(2013, &t, 10);
        assert_eq!(stats.finishers, 0);
        assert_eq!(stats.dnf_count, 2);
        assert_eq!(stats.dnf_rate, 100.0);
    }

    #[test]
    fn distributions_rank_and_truncate() {
        let t = table(
            &["category", "nationality", "time"],
            &[
                &[Some("SEH"), Some("FR"), None],
                &[Some("V1H"), Some("FR"), None],
                &[Some("SEH"), Some("IT"), None],
                &[Some("SEF"), Some("US"), None],
                &[None, None, None],
            ],
        );
        let stats = compute_year_stats(2014, &t, 2);
        assert_eq!(
            stats.categories.iter().collect::<Vec<_>>(),
            vec![("SEH", 2), ("SEF", 1), ("V1H", 1)]
        );
        assert_eq!(
            stats.top_nationalities.iter().collect::<Vec<_>>(),
            vec![("FR", 2), ("IT", 1)]
        );
    }

    #[test]
    fn invariants_hold() {
        let t = table(
            &["time"],
            &[&[Some("01:00:00")], &[None], &[None], &[Some("02:00:00")], &[None]],
        );
        let s = compute_year_stats(2015, &t, 10);
        assert_eq!(s.finishers + s.dnf_count, s.total_participants);
        assert!((0.0..=100.0).contains(&s.dnf_rate));
        assert_eq!(s.dnf_rate, 60.0);
    }
}
