use chrono::{Duration, NaiveDate};
use serde::Serializer;

/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) `dd-mm-yyyy`, the display form for dates everywhere in the report.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// 3) Duration → `mm:ss`, dropping sub-second precision (truncates).
pub fn format_mmss(d: Duration) -> String {
    let total = d.num_seconds().max(0);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// 4) Decimal minutes → `mm:ss`, rounded to the nearest second with ties to
///    even. Minutes are not wrapped into hours, so `125.5` becomes `125:30`.
pub fn minutes_to_mmss(minutes: f64) -> String {
    if !minutes.is_finite() {
        return "--:--".to_string();
    }
    let total = (minutes * 60.0).round_ties_even() as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Duration as fractional minutes.
pub fn duration_minutes(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 60_000.0
}

/// Serde helper for duration fields shown as `mm:ss`.
pub fn serialize_mmss<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_mmss(*d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_str_strips_quotes_and_space() {
        assert_eq!(clean_str("  \"Lago\" "), "Lago");
        assert_eq!(clean_str("\""), "\"");
        assert_eq!(clean_str(" x "), "x");
    }

    #[test]
    fn mmss_truncates_durations() {
        assert_eq!(format_mmss(Duration::milliseconds(272_900)), "04:32");
        assert_eq!(format_mmss(Duration::seconds(3_599)), "59:59");
    }

    #[test]
    fn minutes_round_to_nearest_second() {
        assert_eq!(minutes_to_mmss(25.0), "25:00");
        assert_eq!(minutes_to_mmss(4.0 + 32.0 / 60.0), "04:32");
        assert_eq!(minutes_to_mmss(4.999), "05:00");
        assert_eq!(minutes_to_mmss(0.0125), "00:01");
        assert_eq!(minutes_to_mmss(125.5), "125:30");
        assert_eq!(minutes_to_mmss(f64::NAN), "--:--");
    }

    #[test]
    fn date_is_day_first_with_dashes() {
        let d = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        assert_eq!(format_date(d), "09-07-2025");
    }
}
