use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::Serialize;

/// Key of a window configuration row.
///
/// `student` and `staff` are the two global categories; every other value
/// is a named security shift (shift1..shift4 by convention, any name
/// accepted).
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub enum WindowCategory {
    Student,
    Staff,
    Shift(String),
}

impl WindowCategory {
    pub fn to_db_str(&self) -> &str {
        match self {
            WindowCategory::Student => "student",
            WindowCategory::Staff => "staff",
            WindowCategory::Shift(name) => name,
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s {
            "student" => WindowCategory::Student,
            "staff" => WindowCategory::Staff,
            other => WindowCategory::Shift(other.to_string()),
        }
    }

    pub fn is_shift(&self) -> bool {
        matches!(self, WindowCategory::Shift(_))
    }
}

/// Attendance time-window configuration for one category.
///
/// Routine holidays (weekday names) ride on the `student` and `staff`
/// rows; shift rows never carry them: security absence is governed by
/// the shift roster alone.
#[derive(Debug, Clone, Serialize)]
pub struct WindowConfig {
    pub category: WindowCategory,
    pub entry_start: NaiveTime,
    pub entry_end: NaiveTime,
    pub late_cutoff: Option<NaiveTime>,
    pub exit_start: NaiveTime,
    pub exit_end: NaiveTime,
    pub routine_holidays: Vec<String>, // Indonesian weekday names
}

impl WindowConfig {
    /// Ordering invariant: entry_start ≤ entry_end ≤ late_cutoff (if set),
    /// exit_start ≤ exit_end.
    pub fn validate(&self) -> AppResult<()> {
        if self.entry_start > self.entry_end {
            return Err(AppError::InvalidWindow(
                "entry start must not be after entry end".into(),
            ));
        }
        if let Some(cutoff) = self.late_cutoff
            && cutoff < self.entry_end
        {
            return Err(AppError::InvalidWindow(
                "late cutoff must not be before entry end".into(),
            ));
        }
        if self.exit_start > self.exit_end {
            return Err(AppError::InvalidWindow(
                "exit start must not be after exit end".into(),
            ));
        }
        Ok(())
    }

    /// Deadline used for lateness minutes in reports: the late cutoff when
    /// configured, otherwise the end of the regular entry window.
    pub fn lateness_deadline(&self) -> NaiveTime {
        self.late_cutoff.unwrap_or(self.entry_end)
    }

    pub fn routine_holidays_str(&self) -> String {
        self.routine_holidays.join(",")
    }
}
