//! Attendance ledger: one entry and one exit slot per (person, date),
//! duplicate-by-rejection writes and all-or-nothing day overrides.

use crate::db::attendance;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::record::{AttendanceRecord, DayEvents};
use crate::models::status::{AttendanceStatus, EventKind};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Outcome of a scan write.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanWrite {
    Accepted,
    /// A record already occupies the slot; the original is preserved.
    DuplicateRejected,
}

/// Per-person outcome of a bulk override.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub updated: usize,
    pub failures: Vec<(String, String)>, // (person key, error)
}

pub struct Ledger<'a> {
    pool: &'a mut DbPool,
}

impl<'a> Ledger<'a> {
    pub fn new(pool: &'a mut DbPool) -> Self {
        Self { pool }
    }

    fn record(
        person_id: i64,
        date: NaiveDate,
        kind: EventKind,
        status: AttendanceStatus,
        time: chrono::NaiveTime,
        note: &str,
    ) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            person_id,
            date,
            kind,
            status,
            time,
            note: note.to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Persist a scan event. Rejects when the slot (or the whole day, for
    /// manual records) is already occupied: idempotent-by-rejection, never
    /// overwrite. The check and the insert share one transaction; the
    /// UNIQUE(person_id, date, kind) constraint backs it at the storage
    /// layer.
    pub fn record_scan(
        &mut self,
        person_id: i64,
        date: NaiveDate,
        kind: EventKind,
        status: AttendanceStatus,
        time: chrono::NaiveTime,
        note: &str,
    ) -> AppResult<ScanWrite> {
        let tx = self.pool.conn.transaction()?;

        if attendance::slot_occupied(&tx, person_id, date, kind)? {
            return Ok(ScanWrite::DuplicateRejected);
        }

        attendance::insert_record(&tx, &Self::record(person_id, date, kind, status, time, note))?;
        tx.commit()?;

        Ok(ScanWrite::Accepted)
    }

    /// Replace the whole day of (person, date) with records derived from
    /// `status`, a single idempotent, all-or-nothing operation:
    ///
    /// - Present → entry + exit records with synthetic timestamps
    /// - Sick/Excused/Absent → one manual record standing in for both
    /// - Late → one entry record only (no synthetic exit)
    pub fn replace_day(
        &mut self,
        person_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        at: NaiveDateTime,
        note: &str,
    ) -> AppResult<()> {
        let time = at.time();
        let tx = self.pool.conn.transaction()?;

        attendance::delete_day(&tx, person_id, date)?;

        match status {
            AttendanceStatus::Present => {
                attendance::insert_record(
                    &tx,
                    &Self::record(person_id, date, EventKind::Entry, status, time, note),
                )?;
                attendance::insert_record(
                    &tx,
                    &Self::record(person_id, date, EventKind::Exit, status, time, note),
                )?;
            }
            AttendanceStatus::Late => {
                attendance::insert_record(
                    &tx,
                    &Self::record(person_id, date, EventKind::Entry, status, time, note),
                )?;
            }
            AttendanceStatus::Sick | AttendanceStatus::Excused | AttendanceStatus::Absent => {
                attendance::insert_record(
                    &tx,
                    &Self::record(person_id, date, EventKind::Manual, status, time, note),
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Bulk override: atomic per person, continues on individual failure.
    /// The batch as a whole is best-effort, never all-or-nothing.
    pub fn replace_day_bulk(
        &mut self,
        persons: &[(i64, String)], // (id, key)
        date: NaiveDate,
        status: AttendanceStatus,
        at: NaiveDateTime,
        note: &str,
    ) -> AppResult<BulkOutcome> {
        let mut outcome = BulkOutcome::default();

        for (person_id, key) in persons {
            match self.replace_day(*person_id, date, status, at, note) {
                Ok(()) => outcome.updated += 1,
                Err(e) => outcome.failures.push((key.clone(), e.to_string())),
            }
        }

        Ok(outcome)
    }

    /// Resolved day view; a manual record populates both slots.
    pub fn get_day(&mut self, person_id: i64, date: NaiveDate) -> AppResult<DayEvents> {
        let records = attendance::records_for_day(&self.pool.conn, person_id, date)?;
        Ok(DayEvents::from_records(&records))
    }
}
