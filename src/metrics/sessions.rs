use chrono::NaiveDate;
use serde::Serialize;

use crate::metrics::{group_by_date, mean_pace_minutes};
use crate::process::utils::format_date;
use crate::process::CleanTable;

pub const DEFAULT_TOP_SESSIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionPoint {
    pub distance_km: i64,
    pub pace_minutes: f64,
}

/// All rows of one training date, ready to plot as a pace-vs-distance line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSeries {
    pub date: NaiveDate,
    /// `dd-mm-yyyy`, used as the legend label.
    pub label: String,
    pub mean_pace_minutes: f64,
    /// Sorted by distance ascending.
    pub points: Vec<SessionPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FastestSessions {
    /// Fastest first.
    pub sessions: Vec<SessionSeries>,
    /// Longest distance in the whole table, for framing the x axis.
    pub max_distance_km: i64,
}

/// The `n` dates with the lowest mean pace. Equal means keep date order.
pub fn fastest_sessions(table: &CleanTable, n: usize) -> FastestSessions {
    if table.is_empty() {
        return FastestSessions::default();
    }

    let mut ranked: Vec<SessionSeries> = group_by_date(table)
        .into_iter()
        .map(|(date, rows)| {
            let mean = mean_pace_minutes(&rows);
            let mut points: Vec<SessionPoint> = rows
                .iter()
                .map(|r| SessionPoint {
                    distance_km: r.distance_km,
                    pace_minutes: r.pace_minutes(),
                })
                .collect();
            points.sort_by_key(|p| p.distance_km);
            SessionSeries {
                date,
                label: format_date(date),
                mean_pace_minutes: mean,
                points,
            }
        })
        .filter(|s| !s.mean_pace_minutes.is_nan())
        .collect();

    // stable, so ties stay in date order
    ranked.sort_by(|a, b| a.mean_pace_minutes.total_cmp(&b.mean_pace_minutes));
    ranked.truncate(n);

    FastestSessions {
        sessions: ranked,
        max_distance_km: table.iter().map(|r| r.distance_km).max().unwrap_or_default(),
    }
}
