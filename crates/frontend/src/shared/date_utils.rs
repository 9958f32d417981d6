//! Date formatting for table cells

use chrono::{DateTime, NaiveDate, Utc};

/// Placeholder for missing dates
pub const NO_DATE: &str = "—";

/// DD.MM.YYYY HH:MM
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02"
pub fn format_datetime(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}

/// DD.MM.YYYY
pub fn format_date(value: Option<&NaiveDate>) -> String {
    value
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}

/// Date part of a timestamp, DD.MM.YYYY
pub fn format_timestamp_date(value: Option<&DateTime<Utc>>) -> String {
    format_date(value.map(|dt| dt.date_naive()).as_ref())
}
