use chrono::NaiveDate;
use serde::Serialize;

use crate::metrics::{group_by_date, mean_pace_minutes};
use crate::process::CleanTable;

/// Axis padding above and below the plotted paces (15 s).
pub const AXIS_MARGIN_MINUTES: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub pace_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceTrend {
    /// One point per date, ascending.
    pub points: Vec<TrendPoint>,
    pub y_min: f64,
    pub y_max: f64,
}

/// Mean pace per date, with y-axis bounds padded by [`AXIS_MARGIN_MINUTES`].
pub fn pace_trend(table: &CleanTable) -> Option<PaceTrend> {
    let points: Vec<TrendPoint> = group_by_date(table)
        .into_iter()
        .map(|(date, rows)| TrendPoint {
            date,
            pace_minutes: mean_pace_minutes(&rows),
        })
        .collect();

    let paces = points.iter().map(|p| p.pace_minutes).filter(|m| !m.is_nan());
    let (lo, hi) = paces.fold(None, |acc: Option<(f64, f64)>, m| match acc {
        None => Some((m, m)),
        Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
    })?;

    Some(PaceTrend {
        points,
        y_min: lo - AXIS_MARGIN_MINUTES,
        y_max: hi + AXIS_MARGIN_MINUTES,
    })
}
