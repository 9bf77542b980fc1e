// src/render.rs
//! Text renderers for the two output artifacts.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use serde_json::Deserializer;

use crate::schema::{RaceDetail, YearStats};

const DATA_DECLARATION: &str = "export const raceData: YearStats[] = ";

const YEAR_STATS_INTERFACE: &str = "export interface YearStats {
  year: number;
  total_participants: number;
  finishers: number;
  dnf_count: number;
  dnf_rate: number;
  avg_time_minutes: number;
  categories: Record<string, number>;
  top_nationalities: Record<string, number>;
}
";

// Mirrors schema::summary; keep the two in step.
const HELPERS: &str = "
// Helper: Get total participants across all years
export const getTotalParticipants = (): number => {
  return raceData.reduce((sum, year) => sum + year.total_participants, 0);
};

// Helper: Get overall DNF rate
export const getOverallDNFRate = (): number => {
  const totalParticipants = raceData.reduce((sum, y) => sum + y.total_participants, 0);
  const totalDNF = raceData.reduce((sum, y) => sum + y.dnf_count, 0);
  return totalParticipants > 0 ? (totalDNF / totalParticipants) * 100 : 0;
};

// Helper: Get all unique categories
export const getAllCategories = (): string[] => {
  const categories = new Set<string>();
  raceData.forEach(year => {
    Object.keys(year.categories).forEach(cat => categories.add(cat));
  });
  return Array.from(categories).sort();
};

// Helper: Get top nationalities across all years (ties ordered by code)
export const getTopNationalities = (limit: number = 10): Record<string, number> => {
  const combined: Record<string, number> = {};
  raceData.forEach(year => {
    Object.entries(year.top_nationalities).forEach(([nat, count]) => {
      combined[nat] = (combined[nat] || 0) + count;
    });
  });
  return Object.fromEntries(
    Object.entries(combined)
      .sort((a, b) => b[1] - a[1] || (a[0] < b[0] ? -1 : a[0] > b[0] ? 1 : 0))
      .slice(0, limit)
  );
};
";

/// Pretty JSON for `race_<year>.json`, 2-space indent, trailing newline.
pub fn render_race_detail(detail: &RaceDetail) -> Result<String> {
    let mut json = serde_json::to_string_pretty(detail)
        .with_context(|| format!("serializing race detail {}", detail.year))?;
    json.push('\n');
    Ok(json)
}

/// The generated TypeScript module: timestamp header, `YearStats` interface,
/// the `raceData` literal (in the given order) and the helper functions.
pub fn render_summary_module(years: &[YearStats], generated_at: NaiveDateTime) -> Result<String> {
    let data = serde_json::to_string_pretty(years).context("serializing year stats")?;

    let mut out = String::with_capacity(data.len() + HELPERS.len() + 512);
    out.push_str("// Auto-generated from CSV data\n");
    out.push_str(&format!(
        "// Last updated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(YEAR_STATS_INTERFACE);
    out.push('\n');
    out.push_str(DATA_DECLARATION);
    out.push_str(&data);
    out.push_str(";\n\n");
    out.push_str(HELPERS);
    Ok(out)
}

/// Read the `raceData` literal back out of a generated module.
pub fn parse_summary_module(text: &str) -> Result<Vec<YearStats>> {
    let start = text
        .find(DATA_DECLARATION)
        .ok_or_else(|| anyhow!("no `raceData` declaration found"))?;
    let literal = &text[start + DATA_DECLARATION.len()..];

    // the literal is followed by `;` and the helpers, so read one value only
    Deserializer::from_str(literal)
        .into_iter::<Vec<YearStats>>()
        .next()
        .ok_or_else(|| anyhow!("empty `raceData` literal"))?
        .context("parsing `raceData` literal")
}
