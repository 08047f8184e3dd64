// src/fetch/workbook.rs
use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::{fs, io::Cursor, io::Read, path::Path};
use tracing::debug;

use super::FetchError;
use crate::process::utils::clean_str;
use crate::process::{Cell, RawTable};

/// Decode the first worksheet of an `.xlsx` file. Row 1 is the header.
pub fn read_xlsx_bytes(bytes: &[u8]) -> Result<RawTable, FetchError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(FetchError::NoSheets)??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first) => first.iter().map(|d| d.to_string()).collect(),
        None => return Ok(RawTable::default()),
    };
    let rows: Vec<Vec<Cell>> = rows
        .map(|r| r.iter().map(cell_from_data).collect())
        .collect();

    debug!(rows = rows.len(), width = headers.len(), "decoded worksheet");
    Ok(RawTable::new(headers, rows))
}

/// Decode a CSV document. The first record is the header; short records are
/// padded with empty cells.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, FetchError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(clean_str).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<Cell> = record.iter().map(Cell::from_text).collect();
        if row.len() < headers.len() {
            row.resize(headers.len(), Cell::Empty);
        }
        rows.push(row);
    }
    Ok(RawTable::new(headers, rows))
}

/// Pick the decoder from the file extension.
pub fn read_path(path: &Path) -> Result<RawTable, FetchError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let io_err = |source: std::io::Error| FetchError::Io {
        path: path.to_path_buf(),
        source,
    };

    match ext.as_str() {
        "xlsx" | "xlsm" => {
            let bytes = fs::read(path).map_err(io_err)?;
            read_xlsx_bytes(&bytes)
        }
        "csv" => {
            let file = fs::File::open(path).map_err(io_err)?;
            read_csv(file)
        }
        _ => Err(FetchError::UnsupportedFormat(path.display().to_string())),
    }
}

pub(crate) fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(n) => Cell::Int(*n),
        // whole numbers read back as integers, as a spreadsheet shows them
        Data::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => Cell::Int(*x as i64),
        Data::Float(x) => Cell::Float(*x),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            // serials below 1 carry no date, only a time of day
            Some(ndt) if dt.as_f64() < 1.0 => Cell::Time(ndt.time()),
            Some(ndt) => Cell::DateTime(ndt),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SHEET: &str = "ID,Lugar,Fecha,Distancia_km,Ritmos,Periodo
1,Parque,09/07/2025,5,05:00,Enero
2,\"Lago Norte\",10/07/2025,8,04:45,Enero
3,Pista,11/07/2025,,04:30
";

    #[test]
    fn csv_header_and_cells() -> Result<()> {
        let table = read_csv(SHEET.as_bytes())?;
        assert_eq!(table.column_count(), 6);
        assert_eq!(table.headers[0], "ID");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][0], Cell::Int(1));
        assert_eq!(table.rows[1][1], Cell::Text("Lago Norte".into()));
        assert_eq!(table.rows[0][4], Cell::Text("05:00".into()));
        // short record padded, blank cell empty
        assert_eq!(table.rows[2].len(), 6);
        assert_eq!(table.rows[2][3], Cell::Empty);
        assert_eq!(table.rows[2][5], Cell::Empty);
        Ok(())
    }

    #[test]
    fn read_path_dispatches_on_extension() -> Result<()> {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile()?;
        tmp.write_all(SHEET.as_bytes())?;
        let table = read_path(tmp.path())?;
        assert_eq!(table.rows.len(), 3);

        let other = NamedTempFile::new()?;
        assert!(matches!(
            read_path(other.path()),
            Err(FetchError::UnsupportedFormat(_))
        ));
        Ok(())
    }

    #[test]
    fn workbook_numbers_read_as_integers() -> Result<()> {
        use crate::metrics::{place_period_matrix, project_rows};
        use crate::process::validate;
        use super::fixtures::{xlsx_bytes, SheetValue::*};

        let bytes = xlsx_bytes(&[
            vec![Num(1.0), Str("Park"), Str("09/07/2025"), Num(5.0), Str("05:00"), Num(2.0)],
            vec![Num(2.0), Str("Lago"), Str("10/07/2025"), Num(8.0), Str("04:40"), Num(10.0)],
            vec![Num(3.0), Str("Park"), Str("11/07/2025"), Num(6.5), Str("04:50"), Num(2.0)],
        ]);
        let raw = read_xlsx_bytes(&bytes)?;
        assert_eq!(raw.headers, vec!["ID", "Lugar", "Fecha", "Distancia_km", "Ritmos", "Periodo"]);
        assert_eq!(raw.rows.len(), 3);
        assert_eq!(raw.rows[0][0], Cell::Int(1));
        assert_eq!(raw.rows[0][1], Cell::Text("Park".into()));
        assert_eq!(raw.rows[0][5], Cell::Int(2));
        assert_eq!(raw.rows[2][3], Cell::Float(6.5));

        let clean = validate(&raw)?;
        let ids: Vec<String> = project_rows(&clean).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(place_period_matrix(&clean).periods, vec!["2", "10"]);
        Ok(())
    }

    #[test]
    fn workbook_file_is_read_by_extension() -> Result<()> {
        use super::fixtures::{xlsx_bytes, SheetValue::*};

        let bytes = xlsx_bytes(&[vec![Num(1.0), Str("Park")]]);
        let mut tmp = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
        tmp.write_all(&bytes)?;
        let table = read_path(tmp.path())?;
        assert_eq!(table.rows.len(), 1);
        // cells past the last written one come back empty up to the header width
        assert_eq!(table.rows[0].len(), 6);
        assert_eq!(table.rows[0][0], Cell::Int(1));
        assert_eq!(table.rows[0][1], Cell::Text("Park".into()));
        assert_eq!(table.rows[0][5], Cell::Empty);
        Ok(())
    }

    #[test]
    fn garbage_is_not_a_workbook() {
        assert!(matches!(
            read_xlsx_bytes(b"not a zip archive"),
            Err(FetchError::Workbook(_))
        ));
    }

    #[test]
    fn calamine_values_map_to_cells() {
        assert_eq!(cell_from_data(&Data::Float(5.0)), Cell::Int(5));
        assert_eq!(cell_from_data(&Data::Float(-2.0)), Cell::Int(-2));
        assert_eq!(cell_from_data(&Data::Float(5.5)), Cell::Float(5.5));
        assert_eq!(cell_from_data(&Data::Float(1e16)), Cell::Float(1e16));
        assert_eq!(cell_from_data(&Data::Int(3)), Cell::Int(3));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Bool(true));
        assert_eq!(cell_from_data(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(
            cell_from_data(&Data::String("04:32".into())),
            Cell::Text("04:32".into())
        );
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
    }
}
