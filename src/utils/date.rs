use chrono::{NaiveDate, NaiveTime};

use crate::utils::time::format_time;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// "Mon 01/07/2024, 10:00 - 11:00"
pub fn format_session_time(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> String {
    format!(
        "{}, {} - {}",
        date.format("%a %d/%m/%Y"),
        format_time(start),
        format_time(end)
    )
}
