use chrono::Duration;
use serde::Serialize;

use crate::process::utils::{format_date, serialize_mmss};
use crate::process::CleanTable;

/// Headline figures for the whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Rows whose distance is exactly 1 km. Reported as the session total,
    /// which only matches the row count for 1 km logs; kept as-is.
    pub sessions: usize,
    /// Row count, reported as accumulated kilometres. Not a sum of
    /// `distance_km`; kept as-is.
    pub total_distance_km: usize,
    #[serde(serialize_with = "serialize_mmss")]
    pub mean_pace: Duration,
    pub longest_km: i64,
    #[serde(serialize_with = "serialize_mmss")]
    pub best_pace: Duration,
    /// `dd-mm-yyyy` of the first row holding the best pace.
    pub best_pace_date: String,
    pub best_pace_place: String,
}

pub fn summarize(table: &CleanTable) -> Option<SummaryStats> {
    let records = table.records();
    let first = records.first()?;

    let sessions = records.iter().filter(|r| r.distance_km == 1).count();
    let total_distance_km = records.len();

    let total_ms: i64 = records.iter().map(|r| r.pace.num_milliseconds()).sum();
    let mean_pace = Duration::milliseconds(total_ms / records.len() as i64);

    let longest_km = records.iter().map(|r| r.distance_km).max().unwrap_or_default();

    // first row wins ties
    let best = records
        .iter()
        .fold(first, |best, r| if r.pace < best.pace { r } else { best });

    Some(SummaryStats {
        sessions,
        total_distance_km,
        mean_pace,
        longest_km,
        best_pace: best.pace,
        best_pace_date: format_date(best.date),
        best_pace_place: best.place.clone(),
    })
}
