use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::process::CleanTable;

/// Horizontal extent of one stacked bar segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub left: usize,
    pub right: usize,
}

/// One period's segments, one per place in `PlacePeriodMatrix::places` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodStack {
    pub period: String,
    pub spans: Vec<Span>,
}

/// Session counts per place and period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlacePeriodMatrix {
    /// Ascending by total sessions; equal totals keep alphabetical order.
    pub places: Vec<String>,
    /// Sorted labels; numeric labels compare as numbers and come first.
    pub periods: Vec<String>,
    /// `counts[place][period]`
    pub counts: Vec<Vec<usize>>,
    pub stacks: Vec<PeriodStack>,
    /// Largest per-place total.
    pub max_total: usize,
}

impl PlacePeriodMatrix {
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn total(&self, place_idx: usize) -> usize {
        self.counts
            .get(place_idx)
            .map(|c| c.iter().sum::<usize>())
            .unwrap_or(0)
    }
}

/// Pivot of session counts. Rows with a blank place or period are left out.
pub fn place_period_matrix(table: &CleanTable) -> PlacePeriodMatrix {
    let mut tally: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for r in table {
        if r.place.is_empty() || r.period.is_empty() {
            continue;
        }
        *tally.entry((r.place.as_str(), r.period.as_str())).or_default() += 1;
    }
    if tally.is_empty() {
        return PlacePeriodMatrix::default();
    }

    let mut periods: Vec<&str> = tally
        .keys()
        .map(|(_, p)| *p)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    periods.sort_by(|a, b| compare_labels(a, b));

    let mut rows: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for ((place, period), n) in &tally {
        let row = rows
            .entry(*place)
            .or_insert_with(|| vec![0; periods.len()]);
        if let Some(j) = periods.iter().position(|p| p == period) {
            row[j] = *n;
        }
    }

    let mut rows: Vec<(&str, Vec<usize>)> = rows.into_iter().collect();
    rows.sort_by_key(|(_, c)| c.iter().sum::<usize>());

    let stacks = periods
        .iter()
        .enumerate()
        .map(|(j, period)| PeriodStack {
            period: period.to_string(),
            spans: rows
                .iter()
                .map(|(_, c)| {
                    let left: usize = c[..j].iter().sum();
                    Span {
                        left,
                        right: left + c[j],
                    }
                })
                .collect(),
        })
        .collect();

    let mut matrix = PlacePeriodMatrix {
        places: rows.iter().map(|(p, _)| p.to_string()).collect(),
        periods: periods.iter().map(|p| p.to_string()).collect(),
        counts: rows.into_iter().map(|(_, c)| c).collect(),
        stacks,
        max_total: 0,
    };
    matrix.max_total = (0..matrix.places.len())
        .map(|i| matrix.total(i))
        .max()
        .unwrap_or(0);
    matrix
}

/// Labels that read as numbers order numerically, ahead of any text label.
fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::{rec, table};

    #[test]
    fn empty_table_gives_empty_matrix() {
        assert!(place_period_matrix(&CleanTable::default()).is_empty());
    }

    #[test]
    fn pivot_orders_places_by_total() {
        let t = table(vec![
            rec(1, "Park", (2025, 7, 1), 5, "05:00", "B"),
            rec(2, "Park", (2025, 7, 2), 5, "05:00", "A"),
            rec(3, "Park", (2025, 7, 3), 5, "05:00", "A"),
            rec(4, "Lago", (2025, 7, 4), 5, "05:00", "B"),
            rec(5, "Pista", (2025, 7, 5), 5, "05:00", "A"),
            rec(6, "Pista", (2025, 7, 6), 5, "05:00", "C"),
        ]);
        let m = place_period_matrix(&t);
        assert_eq!(m.periods, vec!["A", "B", "C"]);
        assert_eq!(m.places, vec!["Lago", "Pista", "Park"]);
        assert_eq!(m.counts[0], vec![0, 1, 0]);
        assert_eq!(m.counts[1], vec![1, 0, 1]);
        assert_eq!(m.counts[2], vec![2, 1, 0]);
        assert_eq!(m.total(2), 3);
        assert_eq!(m.max_total, 3);
    }

    #[test]
    fn stacks_are_cumulative_per_place() {
        let t = table(vec![
            rec(1, "Park", (2025, 7, 1), 5, "05:00", "A"),
            rec(2, "Park", (2025, 7, 2), 5, "05:00", "A"),
            rec(3, "Park", (2025, 7, 3), 5, "05:00", "B"),
            rec(4, "Lago", (2025, 7, 4), 5, "05:00", "B"),
        ]);
        let m = place_period_matrix(&t);
        assert_eq!(m.places, vec!["Lago", "Park"]);
        assert_eq!(m.stacks[0].period, "A");
        assert_eq!(
            m.stacks[0].spans,
            vec![Span { left: 0, right: 0 }, Span { left: 0, right: 2 }]
        );
        assert_eq!(
            m.stacks[1].spans,
            vec![Span { left: 0, right: 1 }, Span { left: 2, right: 3 }]
        );
    }

    #[test]
    fn numeric_periods_sort_as_numbers() {
        let t = table(vec![
            rec(1, "Park", (2025, 7, 1), 5, "05:00", "10"),
            rec(2, "Park", (2025, 7, 2), 5, "05:00", "2"),
            rec(3, "Park", (2025, 7, 3), 5, "05:00", "Base"),
            rec(4, "Lago", (2025, 7, 4), 5, "05:00", "2"),
        ]);
        let m = place_period_matrix(&t);
        assert_eq!(m.periods, vec!["2", "10", "Base"]);
        assert_eq!(m.places, vec!["Lago", "Park"]);
        assert_eq!(m.counts[1], vec![1, 1, 1]);
        assert_eq!(m.stacks[1].spans[1], Span { left: 1, right: 2 });
    }

    #[test]
    fn blank_labels_are_skipped() {
        let t = table(vec![
            rec(1, "", (2025, 7, 1), 5, "05:00", "A"),
            rec(2, "Park", (2025, 7, 2), 5, "05:00", ""),
        ]);
        assert!(place_period_matrix(&t).is_empty());
    }
}
