//! Time utilities: parsing HH:MM / HH:MM:SS, the effective "now" used by
//! scan and dashboard paths, formatting helpers.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, NaiveTime};

/// Parse "HH:MM" (window configuration input).
pub fn parse_time_hm(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Parse "HH:MM:SS", falling back to "HH:MM" (ledger rows).
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .ok()
        .or_else(|| parse_time_hm(t))
}

pub fn parse_optional_time_hm(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time_hm(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

pub fn format_time_hm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Resolve the effective "now": the hidden `--at` override when given
/// (deterministic tests), the wall clock otherwise. Core operations always
/// receive this value explicitly instead of reading the clock themselves.
pub fn effective_now(at: Option<&String>) -> AppResult<NaiveDateTime> {
    match at {
        None => Ok(Local::now().naive_local()),
        Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
            .map_err(|_| AppError::InvalidTime(s.to_string())),
    }
}
