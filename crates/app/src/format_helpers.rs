//! Display formatting for dates, times and percentages.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Today's date as `YYYY-MM-DD` in the browser's local time zone.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// "Jan 20, 2026". Unparsable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// "Jan 20, 2026 9:35 PM"; date-only values render without a time.
pub fn format_datetime(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt
            .with_timezone(&Local)
            .format("%b %-d, %Y %-I:%M %p")
            .to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%b %-d, %Y %-I:%M %p").to_string();
    }
    format_date(value)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let head = value.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Whether a `YYYY-MM-DD` due date lies before today.
pub fn is_overdue(due: &str, today: &str) -> bool {
    match (parse_date(due), parse_date(today)) {
        (Some(d), Some(t)) => d < t,
        _ => false,
    }
}

/// "92.5%", or an em dash when there is no value.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "—".to_string(),
    }
}

/// Marks without a trailing ".0" for whole numbers.
pub fn format_marks(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
