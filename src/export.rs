// src/export.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::config::Config;
use crate::metrics::{
    daily_summary, fastest_sessions, pace_histogram, pace_trend, place_period_matrix,
    project_rows, summarize, DailySummaryRow, FastestSessions, PaceHistogram, PaceTrend,
    PlacePeriodMatrix, ProjectedRow, SummaryStats,
};
use crate::process::CleanTable;

/// Every view of one session's table, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub name: String,
    pub club: String,
    pub generated_at: DateTime<Local>,
    pub summary: Option<SummaryStats>,
    pub pace_trend: Option<PaceTrend>,
    pub pace_histogram: Option<PaceHistogram>,
    pub fastest_sessions: FastestSessions,
    pub daily_summary: Vec<DailySummaryRow>,
    pub places: PlacePeriodMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ProjectedRow>>,
}

impl Report {
    pub fn build(name: &str, club: &str, table: &CleanTable, config: &Config) -> Self {
        Self {
            name: name.to_string(),
            club: club.to_string(),
            generated_at: Local::now(),
            summary: summarize(table),
            pace_trend: pace_trend(table),
            pace_histogram: pace_histogram(table, config.histogram_bins),
            fastest_sessions: fastest_sessions(table, config.top_sessions),
            daily_summary: daily_summary(table),
            places: place_period_matrix(table),
            rows: config.include_full_table.then(|| project_rows(table)),
        }
    }

    /// `Ana Pérez` → `reporte_Ana_Pérez`
    pub fn file_stem(&self) -> String {
        report_file_stem(&self.name)
    }
}

pub fn report_file_stem(name: &str) -> String {
    format!("reporte_{}", name.replace(' ', "_"))
}

/// Write `report` as pretty JSON into `dir`, creating it if needed.
#[tracing::instrument(level = "info", skip(report), fields(dir = %dir.display()))]
pub fn write_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("{}.json", report.file_stem()));

    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, report)
        .with_context(|| format!("writing {}", path.display()))?;
    w.flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!(path = %path.display(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::{rec, table};
    use tempfile::tempdir;

    fn sample() -> CleanTable {
        table(vec![
            rec(1, "Park", (2025, 7, 9), 5, "05:00", "Enero"),
            rec(2, "Lago", (2025, 7, 10), 8, "04:40", "Enero"),
        ])
    }

    #[test]
    fn file_stem_replaces_spaces() {
        assert_eq!(report_file_stem("Ana María Pérez"), "reporte_Ana_María_Pérez");
        assert_eq!(report_file_stem("Ana"), "reporte_Ana");
    }

    #[test]
    fn full_table_only_on_request() {
        let mut cfg = Config::default();
        let report = Report::build("Ana", "Club", &sample(), &cfg);
        assert!(report.rows.is_none());

        cfg.include_full_table = true;
        let report = Report::build("Ana", "Club", &sample(), &cfg);
        assert_eq!(report.rows.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn empty_table_still_builds() {
        let report = Report::build("Ana", "Club", &CleanTable::default(), &Config::default());
        assert!(report.summary.is_none());
        assert!(report.pace_trend.is_none());
        assert!(report.pace_histogram.is_none());
        assert!(report.daily_summary.is_empty());
        assert!(report.places.is_empty());
    }

    #[test]
    fn written_report_is_json() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("nested");
        let report = Report::build("Ana Pérez", "Club Norte", &sample(), &Config::default());
        let path = write_report(&report, &out)?;

        assert_eq!(path, out.join("reporte_Ana_Pérez.json"));
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(value["name"], "Ana Pérez");
        assert_eq!(value["club"], "Club Norte");
        assert_eq!(value["daily_summary"].as_array().map(Vec::len), Some(2));
        assert!(value.get("rows").is_none());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_is_reported() -> Result<()> {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return Ok(());
        }
        let dir = tempdir()?;
        std::os::unix::fs::symlink(full, dir.path().join("reporte_Ana.json"))?;
        let report = Report::build("Ana", "Club", &sample(), &Config::default());
        assert!(write_report(&report, dir.path()).is_err());
        Ok(())
    }
}
