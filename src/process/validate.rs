use chrono::{Duration, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::process::date_parser::cell_date;
use crate::process::pace::{parse_pace, to_minutes, PaceValue};
use crate::process::raw_table::{Cell, RawTable};
use crate::process::utils::format_mmss;

/// Fixed positional layout of a training sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Place,
    Date,
    Distance,
    Pace,
    Period,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::Place,
        Column::Date,
        Column::Distance,
        Column::Pace,
        Column::Period,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Place => "Lugar",
            Column::Date => "Fecha",
            Column::Distance => "Distancia_km",
            Column::Pace => "Ritmos",
            Column::Period => "Periodo",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Spreadsheet rows are 1-based and the header takes row 1.
const HEADER_ROW_OFFSET: usize = 2;

pub const DATE_FORMAT_HINT: &str = "dd/mm/yyyy (e.g. 09/07/2025)";
pub const PACE_FORMAT_HINT: &str = "mm:ss (e.g. 04:32)";

/// Shown alongside any rejection.
pub const GUIDANCE: &str = "Fix the file in Excel following the expected format and upload it again, \
     or correct it directly in Google Drive.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "the file must have exactly 6 columns: ID, Lugar, Fecha, Distancia_km, Ritmos, Periodo. \
         Found {found} columns."
    )]
    Shape { found: usize },

    #[error(
        "error in column 'Distancia_km': every row must be a positive whole number. Detail: {detail}"
    )]
    DistanceType { detail: String },

    #[error("error in row {row}, column 'Fecha': invalid value '{value}'. Expected format: {hint}", hint = DATE_FORMAT_HINT)]
    DateFormat { row: usize, value: String },

    #[error("error in row {row}, column 'Ritmos': invalid value '{value}'. Expected format: {hint}", hint = PACE_FORMAT_HINT)]
    PaceFormat { row: usize, value: String },
}

/// A validated training session.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    /// Position of the row in the uploaded sheet, 0-based, header excluded.
    pub source_row: usize,
    pub id: Cell,
    pub place: String,
    pub date: NaiveDate,
    pub distance_km: i64,
    pub pace: Duration,
    pub period: String,
}

impl CleanRecord {
    pub fn pace_minutes(&self) -> f64 {
        to_minutes(&PaceValue::Duration(self.pace))
    }

    /// Row number as a spreadsheet user would count it.
    pub fn sheet_row(&self) -> usize {
        self.source_row + HEADER_ROW_OFFSET
    }
}

/// Immutable, validated snapshot of one upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanTable {
    records: Vec<CleanRecord>,
}

impl CleanTable {
    pub fn new(records: Vec<CleanRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Back to sheet form (`dd/mm/yyyy` dates, `mm:ss` paces) so a table can be
    /// re-validated or re-exported.
    pub fn to_raw_table(&self) -> RawTable {
        let headers = Column::ALL.iter().map(|c| c.name().to_string()).collect();
        let rows = self
            .records
            .iter()
            .map(|r| {
                let millis = r.pace.num_milliseconds() % 1_000;
                let pace = if millis == 0 {
                    format_mmss(r.pace)
                } else {
                    format!("{}.{:03}", format_mmss(r.pace), millis)
                };
                vec![
                    r.id.clone(),
                    Cell::Text(r.place.clone()),
                    Cell::Text(r.date.format("%d/%m/%Y").to_string()),
                    Cell::Int(r.distance_km),
                    Cell::Text(pace),
                    Cell::Text(r.period.clone()),
                ]
            })
            .collect();
        RawTable::new(headers, rows)
    }
}

impl<'a> IntoIterator for &'a CleanTable {
    type Item = &'a CleanRecord;
    type IntoIter = std::slice::Iter<'a, CleanRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Validate and normalise an uploaded sheet.
///
/// Steps run in order and stop at the first failure: column count,
/// positional relabelling, distance coercion (non-positive rows dropped
/// silently), day-first dates, then `mm:ss` paces. Date and pace checks scan
/// every row and report the first offender by spreadsheet row number.
#[tracing::instrument(level = "info", skip(raw), fields(rows = raw.rows.len(), columns = raw.column_count()))]
pub fn validate(raw: &RawTable) -> Result<CleanTable, ValidationError> {
    // ─── 1) shape ────────────────────────────────────────────────────
    let found = raw.column_count();
    if found != Column::ALL.len() {
        return Err(ValidationError::Shape { found });
    }

    // ─── 2) relabel: headers are ignored, position decides ───────────
    let col = move |row: usize, c: Column| raw.cell(row, c.index());

    // ─── 3) distance: whole column must coerce, then drop <= 0 ───────
    let distances = (0..raw.rows.len())
        .map(|i| coerce_distance(col(i, Column::Distance)))
        .collect::<Result<Vec<i64>, String>>()
        .map_err(|detail| ValidationError::DistanceType { detail })?;

    let kept: Vec<usize> = (0..raw.rows.len())
        .filter(|&i| distances[i] > 0)
        .collect();
    if kept.len() < raw.rows.len() {
        debug!(
            dropped = raw.rows.len() - kept.len(),
            "dropped rows with non-positive distance"
        );
    }

    // ─── 4) dates ────────────────────────────────────────────────────
    let mut dates = Vec::with_capacity(kept.len());
    let mut date_errors = Vec::new();
    for &i in &kept {
        let cell = col(i, Column::Date);
        match cell_date(cell) {
            Some(d) => dates.push(d),
            None => date_errors.push((i + HEADER_ROW_OFFSET, cell.to_string())),
        }
    }
    if let Some((row, value)) = date_errors.first().cloned() {
        warn!(count = date_errors.len(), first_row = row, "invalid dates");
        return Err(ValidationError::DateFormat { row, value });
    }

    // ─── 5) paces ────────────────────────────────────────────────────
    let mut paces = Vec::with_capacity(kept.len());
    let mut pace_errors = Vec::new();
    for &i in &kept {
        let text = col(i, Column::Pace).to_string();
        match parse_pace(&text) {
            Some(p) => paces.push(p),
            None => pace_errors.push((i + HEADER_ROW_OFFSET, text)),
        }
    }
    if let Some((row, value)) = pace_errors.first().cloned() {
        warn!(count = pace_errors.len(), first_row = row, "invalid paces");
        return Err(ValidationError::PaceFormat { row, value });
    }

    let records = kept
        .iter()
        .zip(dates)
        .zip(paces)
        .map(|((&i, date), pace)| CleanRecord {
            source_row: i,
            id: col(i, Column::Id).clone(),
            place: col(i, Column::Place).to_string(),
            date,
            distance_km: distances[i],
            pace,
            period: col(i, Column::Period).to_string(),
        })
        .collect::<Vec<_>>();

    debug!(kept = records.len(), "validated");
    Ok(CleanTable::new(records))
}

/// Integer cast of one distance cell. Floats truncate toward zero; text must
/// be a whole number.
fn coerce_distance(cell: &Cell) -> Result<i64, String> {
    match cell {
        Cell::Int(n) => Ok(*n),
        Cell::Float(x) if x.is_finite() => Ok(x.trunc() as i64),
        Cell::Float(x) => Err(format!("cannot convert non-finite float {} to integer", x)),
        Cell::Bool(b) => Ok(i64::from(*b)),
        Cell::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("invalid literal for integer: '{}'", s)),
        Cell::Empty => Err("cannot convert an empty cell to integer".to_string()),
        other => Err(format!("cannot convert '{}' to integer", other)),
    }
}
