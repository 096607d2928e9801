use chrono::NaiveDate;
use serde::Serialize;

/// Shift name marking a scheduled day off.
pub const SHIFT_OFF: &str = "Off";

/// One (security person, date) → shift assignment.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftAssignment {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDate,
    pub shift: String,
}

/// An empty or "Off" value means no duty that day.
pub fn is_off(shift: Option<&str>) -> bool {
    match shift {
        None => true,
        Some(s) => s.is_empty() || s == SHIFT_OFF,
    }
}
