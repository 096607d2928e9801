use crate::models::status::AttendanceStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum LeaveKind {
    Sick,
    Excused,
}

impl LeaveKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveKind::Sick => "Sakit",
            LeaveKind::Excused => "Izin",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Sakit" => Some(LeaveKind::Sick),
            "Izin" => Some(LeaveKind::Excused),
            _ => None,
        }
    }

    pub fn from_cli_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sakit" | "sick" => Some(LeaveKind::Sick),
            "izin" | "excused" => Some(LeaveKind::Excused),
            _ => None,
        }
    }

    /// Ledger status applied when the request is approved.
    pub fn as_status(&self) -> AttendanceStatus {
        match self {
            LeaveKind::Sick => AttendanceStatus::Sick,
            LeaveKind::Excused => AttendanceStatus::Excused,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Disetujui",
            LeaveStatus::Rejected => "Ditolak",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(LeaveStatus::Pending),
            "Disetujui" => Some(LeaveStatus::Approved),
            "Ditolak" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }
}

/// A guardian-submitted leave request awaiting admin review.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub person_key: String,
    pub submitted_at: String, // ISO8601
    pub kind: LeaveKind,
    pub note: String,
    pub status: LeaveStatus,
}
