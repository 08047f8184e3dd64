use chrono::{NaiveDateTime, NaiveTime};
use std::fmt;

use crate::process::utils::clean_str;

/// One untyped spreadsheet cell, as the workbook or CSV reader produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// A date or date-time cell.
    DateTime(NaiveDateTime),
    /// A time-of-day cell with no date part.
    Time(NaiveTime),
}

impl Cell {
    /// Infer a cell from free text, the way a CSV column would be read:
    /// blank → empty, integers, then floats, otherwise text.
    pub fn from_text(raw: &str) -> Self {
        let cleaned = clean_str(raw);
        if cleaned.is_empty() {
            return Cell::Empty;
        }
        if let Ok(n) = cleaned.parse::<i64>() {
            return Cell::Int(n);
        }
        if let Ok(f) = cleaned.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Text(cleaned)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(n) => write!(f, "{}", n),
            // `5.0` stays `5.0`, not `5`
            Cell::Float(x) => write!(f, "{:?}", x),
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
            Cell::Text(s) => f.write_str(s),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Cell::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column labels from the first row of the sheet. Never inspected beyond
    /// their count.
    pub headers: Vec<String>,
    /// Every data row, one `Cell` per column.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Width of the table. Falls back to the widest row when the sheet had
    /// no header row.
    pub fn column_count(&self) -> usize {
        if !self.headers.is_empty() {
            return self.headers.len();
        }
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`); cells past the end of a short row read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}
