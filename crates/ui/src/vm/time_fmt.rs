use chrono::{DateTime, Utc};

/// Day, month name, year and minute, e.g. `3 May 2024, 10:00`.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%-d %B %Y, %H:%M").to_string()
}

/// One decimal and a percent sign, e.g. `80.0%`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}
