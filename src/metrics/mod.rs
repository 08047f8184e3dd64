// src/metrics/mod.rs
//! Read-only views derived from a validated table. Every view accepts an
//! empty table and answers with `None` or an empty collection.

pub mod daily;
pub mod histogram;
pub mod places;
pub mod projection;
pub mod sessions;
pub mod summary;
pub mod trend;

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::process::{CleanRecord, CleanTable};

pub use daily::{daily_summary, DailySummaryRow};
pub use histogram::{pace_histogram, NormalFit, PaceHistogram, DEFAULT_BINS};
pub use places::{place_period_matrix, PlacePeriodMatrix};
pub use projection::{project_rows, ProjectedRow};
pub use sessions::{fastest_sessions, FastestSessions, SessionSeries};
pub use summary::{summarize, SummaryStats};
pub use trend::{pace_trend, PaceTrend};

/// Rows grouped by date, dates ascending, rows in table order.
pub(crate) fn group_by_date(table: &CleanTable) -> BTreeMap<NaiveDate, Vec<&CleanRecord>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&CleanRecord>> = BTreeMap::new();
    for rec in table {
        groups.entry(rec.date).or_default().push(rec);
    }
    groups
}

/// Mean that skips `NaN`; `NaN` when nothing is left.
pub(crate) fn nan_mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, n) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Mean pace of a group of rows, in minutes.
pub(crate) fn mean_pace_minutes(rows: &[&CleanRecord]) -> f64 {
    nan_mean(rows.iter().map(|r| r.pace_minutes()))
}

/// `n` evenly spaced points from `lo` to `hi` inclusive.
pub(crate) fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
                .collect()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{rec, table};
    use super::*;

    #[test]
    fn groups_sort_by_date() {
        let t = table(vec![
            rec(1, "Park", (2025, 7, 10), 5, "05:00", "A"),
            rec(2, "Park", (2025, 7, 9), 3, "04:00", "A"),
            rec(3, "Park", (2025, 7, 10), 2, "06:00", "A"),
        ]);
        let groups = group_by_date(&t);
        let dates: Vec<_> = groups.keys().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2025-07-09", "2025-07-10"]);
        let second = groups.values().nth(1).unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(mean_pace_minutes(second), 5.5);
    }

    #[test]
    fn nan_mean_skips_missing() {
        assert_eq!(nan_mean(vec![1.0, f64::NAN, 3.0]), 2.0);
        assert!(nan_mean(vec![f64::NAN]).is_nan());
        assert!(nan_mean(Vec::new()).is_nan());
    }

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(4.0, 6.0, 5);
        assert_eq!(xs, vec![4.0, 4.5, 5.0, 5.5, 6.0]);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }
}
