use serde::Serialize;

use crate::metrics::{group_by_date, mean_pace_minutes};
use crate::process::utils::{format_date, minutes_to_mmss};
use crate::process::CleanTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummaryRow {
    /// `dd-mm-yyyy`
    pub date: String,
    /// Longest distance logged that day.
    pub distance_km: i64,
    /// Mean pace, `mm:ss`.
    pub pace: String,
    /// `distance_km * mean pace`, `mm:ss`.
    pub time: String,
    pub pace_minutes: f64,
    pub time_minutes: f64,
}

/// One row per date, dates ascending.
pub fn daily_summary(table: &CleanTable) -> Vec<DailySummaryRow> {
    group_by_date(table)
        .into_iter()
        .map(|(date, rows)| {
            let distance_km = rows.iter().map(|r| r.distance_km).max().unwrap_or_default();
            let pace_minutes = mean_pace_minutes(&rows);
            let time_minutes = distance_km as f64 * pace_minutes;
            DailySummaryRow {
                date: format_date(date),
                distance_km,
                pace: minutes_to_mmss(pace_minutes),
                time: minutes_to_mmss(time_minutes),
                pace_minutes,
                time_minutes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::{rec, table};
    use crate::process::{validate, Cell, RawTable};

    #[test]
    fn empty_table_has_no_days() {
        assert!(daily_summary(&CleanTable::default()).is_empty());
    }

    #[test]
    fn uploaded_sheet_to_daily_row() {
        let t = |s: &str| Cell::Text(s.to_string());
        let raw = RawTable::new(
            vec!["ID", "Lugar", "Fecha", "Distancia_km", "Ritmos", "Periodo"]
                .into_iter()
                .map(String::from)
                .collect(),
            vec![
                vec![Cell::Int(1), t("Park"), t("09/07/2025"), t("5"), t("05:00"), t("A")],
                vec![Cell::Int(2), t("Park"), t("10/07/2025"), t("0"), t("04:30"), t("A")],
            ],
        );
        let clean = validate(&raw).unwrap();
        let days = daily_summary(&clean);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "09-07-2025");
        assert_eq!(days[0].distance_km, 5);
        assert_eq!(days[0].pace, "05:00");
        assert_eq!(days[0].time, "25:00");
    }

    #[test]
    fn max_distance_and_mean_pace_per_day() {
        let t = table(vec![
            rec(1, "Park", (2025, 7, 9), 3, "04:00", "A"),
            rec(2, "Park", (2025, 7, 9), 10, "05:00", "A"),
            rec(3, "Park", (2025, 7, 8), 21, "05:20", "A"),
        ]);
        let days = daily_summary(&t);
        assert_eq!(days[0].date, "08-07-2025");
        assert_eq!(days[0].time, "112:00");
        assert_eq!(days[1].distance_km, 10);
        assert_eq!(days[1].pace, "04:30");
        assert_eq!(days[1].time, "45:00");
    }
}
