use chrono::Duration;

use crate::process::utils::duration_minutes;

/// A pace as it may arrive: an already-typed duration, a plain number of
/// minutes, or text such as `"04:32"`.
#[derive(Debug, Clone, PartialEq)]
pub enum PaceValue {
    Duration(Duration),
    Minutes(f64),
    Text(String),
    Missing,
}

impl From<Duration> for PaceValue {
    fn from(d: Duration) -> Self {
        PaceValue::Duration(d)
    }
}

/// Pace in decimal minutes, or `NaN` when the value can't be read.
///
/// Text is tried as `minutes:seconds` when it has exactly one `:`, and
/// otherwise as a bare float. Never panics.
pub fn to_minutes(value: &PaceValue) -> f64 {
    match value {
        PaceValue::Duration(d) => duration_minutes(*d),
        PaceValue::Minutes(m) => *m,
        PaceValue::Text(s) => text_to_minutes(s),
        PaceValue::Missing => f64::NAN,
    }
}

fn text_to_minutes(s: &str) -> f64 {
    let s = s.trim();
    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if let [m, sec] = parts.as_slice() {
            return match (m.trim().parse::<f64>(), sec.trim().parse::<f64>()) {
                (Ok(m), Ok(sec)) => m + sec / 60.0,
                _ => f64::NAN,
            };
        }
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Element-wise `to_minutes` over a whole column.
pub fn column_to_minutes<'a, I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a PaceValue>,
{
    values.into_iter().map(to_minutes).collect()
}

/// Parse the text of a pace cell as a duration under one hour.
///
/// The text is read as `00:<raw>` in `hh:mm:ss[.fff]` layout, so `"04:32"`
/// and `"4:32.5"` pass while `"99"` (no separator) and `"75:00"` do not.
pub fn parse_pace(raw: &str) -> Option<Duration> {
    let prefixed = format!("00:{}", raw.trim());
    let parts: Vec<&str> = prefixed.split(':').collect();
    let [_, minutes, seconds] = parts.as_slice() else {
        return None;
    };

    if minutes.is_empty() || minutes.len() > 2 || !minutes.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let minutes: i64 = minutes.parse().ok()?;

    let (whole, frac) = match seconds.split_once('.') {
        Some((w, f)) => (w, f),
        None => (*seconds, ""),
    };
    if whole.is_empty()
        || whole.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    // keep millisecond precision
    let millis: i64 = format!("{:0<3}", frac)[..3].parse().ok()?;

    if minutes >= 60 || whole >= 60 {
        return None;
    }
    Some(Duration::milliseconds((minutes * 60 + whole) * 1_000 + millis))
}
