use super::status::{AttendanceStatus, EventKind};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One attendance ledger row.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDate,       // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub kind: EventKind,       // ⇔ attendance.kind ('masuk'|'pulang'|'lainnya')
    pub status: AttendanceStatus,
    pub time: NaiveTime,       // ⇔ attendance.time (TEXT "HH:MM:SS")
    pub note: String,
    pub created_at: String,    // ISO8601
}

/// The resolved view of one (person, date): at most one entry and one exit.
/// A `Manual` record populates both slots.
#[derive(Debug, Clone, Default)]
pub struct DayEvents {
    pub entry: Option<AttendanceRecord>,
    pub exit: Option<AttendanceRecord>,
}

impl DayEvents {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut day = DayEvents::default();
        for rec in records {
            match rec.kind {
                EventKind::Entry => day.entry = Some(rec.clone()),
                EventKind::Exit => day.exit = Some(rec.clone()),
                EventKind::Manual => {
                    day.entry = Some(rec.clone());
                    day.exit = Some(rec.clone());
                }
            }
        }
        day
    }

    /// Day status: a manual record wins over entry-derived status
    /// regardless of insertion order; no record at all means Alfa.
    pub fn status(&self) -> AttendanceStatus {
        for slot in [&self.entry, &self.exit] {
            if let Some(rec) = slot
                && rec.kind == EventKind::Manual
            {
                return rec.status;
            }
        }

        match &self.entry {
            Some(entry) => entry.status,
            None => AttendanceStatus::Absent,
        }
    }

    pub fn entry_time(&self) -> Option<NaiveTime> {
        // manual records carry no usable clock time for metrics
        self.entry
            .as_ref()
            .filter(|r| r.kind == EventKind::Entry)
            .map(|r| r.time)
    }

    pub fn exit_time(&self) -> Option<NaiveTime> {
        self.exit
            .as_ref()
            .filter(|r| r.kind == EventKind::Exit)
            .map(|r| r.time)
    }
}
