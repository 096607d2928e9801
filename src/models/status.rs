use serde::Serialize;

/// Kind of a ledger event.
///
/// `Manual` ("lainnya") is an administrator-entered record that stands in
/// for both the entry and the exit slot of a day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventKind {
    Entry,
    Exit,
    Manual,
}

impl EventKind {
    /// Convert enum → DB string (the original wire values).
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Entry => "masuk",
            EventKind::Exit => "pulang",
            EventKind::Manual => "lainnya",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "masuk" => Some(EventKind::Entry),
            "pulang" => Some(EventKind::Exit),
            "lainnya" => Some(EventKind::Manual),
            _ => None,
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, EventKind::Entry)
    }
}

/// Attendance status of a record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Late,
    Sick,
    Excused,
    Absent,
}

impl AttendanceStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Hadir",
            AttendanceStatus::Late => "Terlambat",
            AttendanceStatus::Sick => "Sakit",
            AttendanceStatus::Excused => "Izin",
            AttendanceStatus::Absent => "Alfa",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Hadir" => Some(AttendanceStatus::Present),
            "Terlambat" => Some(AttendanceStatus::Late),
            "Sakit" => Some(AttendanceStatus::Sick),
            "Izin" => Some(AttendanceStatus::Excused),
            "Alfa" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    /// Parse a user-supplied status (CLI override / leave kinds).
    pub fn from_cli_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hadir" | "present" => Some(AttendanceStatus::Present),
            "terlambat" | "late" => Some(AttendanceStatus::Late),
            "sakit" | "sick" => Some(AttendanceStatus::Sick),
            "izin" | "excused" => Some(AttendanceStatus::Excused),
            "alfa" | "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    /// Report display rule: Terlambat always renders as Hadir; lateness is
    /// conveyed only through the lateness column.
    pub fn report_label(&self) -> &'static str {
        match self {
            AttendanceStatus::Late => "Hadir",
            other => other.to_db_str(),
        }
    }

    /// Single-letter code used by the monthly matrix.
    pub fn matrix_letter(&self) -> &'static str {
        match self {
            AttendanceStatus::Present | AttendanceStatus::Late => "H",
            AttendanceStatus::Sick => "S",
            AttendanceStatus::Excused => "I",
            AttendanceStatus::Absent => "A",
        }
    }

    pub fn counts_as_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}
