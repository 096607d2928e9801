use chrono::NaiveDate;
use serde::Serialize;

/// A one-off non-attendance calendar date, unique per date.
/// Applies to all non-security populations.
#[derive(Debug, Clone, Serialize)]
pub struct SpecialHoliday {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
}
