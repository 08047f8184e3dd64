use chrono::{NaiveDate, NaiveTime};

use crate::process::raw_table::Cell;

/// Parse a day-first date such as `"09/07/2025"`, `"9-7-25"` or
/// `"09.07.2025 18:30"`. ISO `"2025-07-09"` is also accepted since its
/// year-first layout is unambiguous. Any time component is validated and
/// then dropped.
pub fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (date_part, time_part) = match s.split_once(|c| c == ' ' || c == 'T') {
        Some((d, t)) => (d, Some(t.trim())),
        None => (s, None),
    };
    if let Some(t) = time_part {
        parse_time(t)?;
    }

    let sep = date_part.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let parts: Vec<&str> = date_part.split(sep).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    // year-first, e.g. 2025-07-09
    if parts[0].len() == 4 {
        let year: i32 = parts[0].parse().ok()?;
        let month: u32 = parts[1].parse().ok()?;
        let day: u32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if parts[0].len() > 2 || parts[1].len() > 2 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = match parts[2].len() {
        4 => parts[2].parse().ok()?,
        // two-digit years pivot at 70, like strptime's %y
        2 => {
            let yy: i32 = parts[2].parse().ok()?;
            if yy < 70 {
                2000 + yy
            } else {
                1900 + yy
            }
        }
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Date carried by a cell. Date cells are taken as-is; text is parsed
/// day-first. Numbers, booleans, bare times and blanks are not dates.
pub fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Text(s) => parse_day_first(s),
        _ => None,
    }
}
