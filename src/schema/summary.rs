//! Cross-year helpers over a `YearStats` sequence.
//!
//! These are the Rust counterparts of the helpers emitted into the generated
//! TypeScript module and must agree with them.

use std::collections::{BTreeSet, HashMap};

use super::{Counts, YearStats};

/// Default `limit` for `top_nationalities`.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Sum of `total_participants` over all years.
pub fn total_participants(years: &[YearStats]) -> u64 {
    years.iter().map(|y| y.total_participants).sum()
}

pub fn total_finishers(years: &[YearStats]) -> u64 {
    years.iter().map(|y| y.finishers).sum()
}

/// `sum(dnf_count) / sum(total_participants) * 100`, or 0 when nobody started.
pub fn overall_dnf_rate(years: &[YearStats]) -> f64 {
    let total = total_participants(years);
    if total == 0 {
        return 0.0;
    }
    let dnf: u64 = years.iter().map(|y| y.dnf_count).sum();
    dnf as f64 / total as f64 * 100.0
}

/// Every category seen in any year, sorted ascending.
pub fn all_categories(years: &[YearStats]) -> Vec<String> {
    years
        .iter()
        .flat_map(|y| y.categories.labels())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Nationality counts summed across years, highest first (ties by label),
/// cut to `limit`.
pub fn top_nationalities(years: &[YearStats], limit: usize) -> Counts {
    let mut combined: HashMap<&str, u64> = HashMap::new();
    for (nat, count) in years.iter().flat_map(|y| y.top_nationalities.iter()) {
        *combined.entry(nat).or_default() += count;
    }
    Counts::ranked(combined.into_iter().map(|(n, c)| (n.to_string(), c))).truncated(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(year: i32, total: u64, dnf: u64, cats: &[(&str, u64)], nats: &[(&str, u64)]) -> YearStats {
        YearStats {
            year,
            total_participants: total,
            finishers: total - dnf,
            dnf_count: dnf,
            dnf_rate: 0.0,
            avg_time_minutes: 0.0,
            categories: cats.iter().map(|&(l, c)| (l, c)).collect(),
            top_nationalities: nats.iter().map(|&(l, c)| (l, c)).collect(),
        }
    }

    #[test]
    fn sums_participants_and_finishers() {
        let years = vec![year(2003, 67, 0, &[], &[]), year(2004, 1376, 958, &[], &[])];
        assert_eq!(total_participants(&years), 1443);
        assert_eq!(total_finishers(&years), 485);
        assert_eq!(total_participants(&[]), 0);
    }

    #[test]
    fn overall_dnf_rate_is_weighted() {
        let years = vec![year(2003, 100, 10, &[], &[]), year(2004, 300, 90, &[], &[])];
        assert!((overall_dnf_rate(&years) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn overall_dnf_rate_empty_is_zero() {
        assert_eq!(overall_dnf_rate(&[]), 0.0);
        assert_eq!(overall_dnf_rate(&[year(2003, 0, 0, &[], &[])]), 0.0);
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let years = vec![
            year(2003, 1, 0, &[("M", 1)], &[]),
            year(2004, 5, 0, &[("F", 2), ("M", 3)], &[]),
        ];
        assert_eq!(all_categories(&years), vec!["F", "M"]);
    }

    #[test]
    fn nationalities_combine_across_years() {
        let years = vec![
            year(2003, 7, 0, &[], &[("FR", 5), ("US", 2)]),
            year(2004, 5, 0, &[], &[("FR", 1), ("IT", 4)]),
        ];
        let top = top_nationalities(&years, 3);
        let got: Vec<_> = top.iter().collect();
        assert_eq!(got, vec![("FR", 6), ("IT", 4), ("US", 2)]);

        let top1 = top_nationalities(&years, 1);
        assert_eq!(top1.iter().collect::<Vec<_>>(), vec![("FR", 6)]);
    }

    #[test]
    fn nationality_ties_break_alphabetically() {
        let years = vec![year(2003, 6, 0, &[], &[("US", 3), ("CH", 3)])];
        let got: Vec<_> = top_nationalities(&years, DEFAULT_TOP_LIMIT).labels().map(String::from).collect();
        assert_eq!(got, vec!["CH", "US"]);
    }
}
