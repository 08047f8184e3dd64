use serde::Serialize;

use crate::process::utils::{format_date, format_mmss};
use crate::process::CleanTable;

/// A table row with display-ready date and pace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedRow {
    pub id: String,
    pub place: String,
    /// `dd-mm-yyyy`
    pub date: String,
    pub distance_km: i64,
    /// `mm:ss`
    pub pace: String,
    pub period: String,
}

pub fn project_rows(table: &CleanTable) -> Vec<ProjectedRow> {
    table
        .iter()
        .map(|r| ProjectedRow {
            id: r.id.to_string(),
            place: r.place.clone(),
            date: format_date(r.date),
            distance_km: r.distance_km,
            pace: format_mmss(r.pace),
            period: r.period.clone(),
        })
        .collect()
}
