//! Time utilities: parsing HH:MM, minute offsets, interval overlap, wording.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Minutes since midnight of a `HH:MM` string.
pub fn to_minutes(t: &str) -> AppResult<i64> {
    let time = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))?;
    Ok(minutes_of(time))
}

pub fn minutes_of(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Half-open overlap: touching endpoints do not count.
pub fn intervals_overlap(start_a: i64, end_a: i64, start_b: i64, end_b: i64) -> bool {
    start_a < end_b && end_a > start_b
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::InvalidDateTime(s.to_string()))
}

/// Human wording of a minute amount: "1 hour", "2 hours", "90 minutes".
pub fn describe_minutes(mins: i64) -> String {
    match mins {
        60 => "1 hour".to_string(),
        m if m > 0 && m % 60 == 0 => format!("{} hours", m / 60),
        1 => "1 minute".to_string(),
        m => format!("{} minutes", m),
    }
}
