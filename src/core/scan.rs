//! Scan pipeline: parse the QR tag, resolve the calendar and window
//! configuration, classify, persist. Every domain failure is recovered
//! into a structured outcome at this boundary.

use crate::core::calendar::CalendarResolver;
use crate::core::classifier::classify;
use crate::core::ledger::{Ledger, ScanWrite};
use crate::core::windows::{SettingsSnapshot, ShiftRoster};
use crate::db::pool::DbPool;
use crate::db::{persons, schedule};
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::status::{AttendanceStatus, EventKind};
use chrono::NaiveDateTime;

/// Population prefix of a scan tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPrefix {
    Student,
    Employee,
}

/// Parse a raw QR payload: one-letter population prefix + natural key.
pub fn parse_tag(raw: &str) -> AppResult<(TagPrefix, String)> {
    let tag = raw.trim().to_lowercase();

    let mut chars = tag.chars();
    let prefix = chars.next();
    let key: String = chars.collect();

    if key.is_empty() {
        return Err(AppError::InvalidTag("tag too short".into()));
    }

    match prefix {
        Some('s') => Ok((TagPrefix::Student, key)),
        Some('p') => Ok((TagPrefix::Employee, key)),
        _ => Err(AppError::InvalidTag(
            "use the S<NIS> or P<ID> tag format".into(),
        )),
    }
}

/// Structured scan result handed back to the caller.
#[derive(Debug)]
pub enum ScanOutcome {
    Accepted {
        person: Person,
        kind: EventKind,
        status: AttendanceStatus,
        time: chrono::NaiveTime,
        /// (destination, message) for the notification collaborator.
        notification: Option<(String, String)>,
    },
    /// Holiday/off day, out-of-window time, duplicate event or unknown
    /// person: terminal for this scan, nothing written.
    Rejected { reason: String },
    /// No window configuration resolvable for the population/date.
    ConfigMissing { reason: String },
}

/// Process one scan event at `now`.
pub fn process(pool: &mut DbPool, raw_tag: &str, now: NaiveDateTime) -> AppResult<ScanOutcome> {
    let (prefix, key) = match parse_tag(raw_tag) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Ok(ScanOutcome::Rejected {
                reason: e.to_string(),
            });
        }
    };

    let date = now.date();

    // Directory lookup (read-only collaborator).
    let person = match persons::person_by_key(&pool.conn, &key)? {
        Some(p) => p,
        None => {
            return Ok(ScanOutcome::Rejected {
                reason: AppError::UnknownPerson(key).to_string(),
            });
        }
    };

    // The prefix must agree with the directory's population.
    let prefix_ok = match prefix {
        TagPrefix::Student => person.population.is_student(),
        TagPrefix::Employee => person.population.is_employee(),
    };
    if !prefix_ok {
        return Ok(ScanOutcome::Rejected {
            reason: format!("tag prefix does not match the directory entry for {}", key),
        });
    }

    let snapshot = SettingsSnapshot::load_for_day(&pool.conn, date)?;

    // The calendar only needs this person's shift for today.
    let mut roster = ShiftRoster::default();
    if person.population.is_security()
        && let Some(shift) = schedule::assignment_for(&pool.conn, person.id, date)?
    {
        roster.insert(person.id, date, shift);
    }

    let resolver = CalendarResolver::new(&snapshot, &roster);

    if let Some(reason) = resolver.non_attendance(person.population, person.id, date) {
        return Ok(ScanOutcome::Rejected {
            reason: AppError::HolidayOrOff(reason.reason()).to_string(),
        });
    }

    let config = match snapshot.resolve(person.population, roster.shift_for(person.id, date)) {
        Ok(c) => c,
        Err(AppError::ConfigMissing(reason)) => {
            return Ok(ScanOutcome::ConfigMissing { reason });
        }
        Err(e) => return Err(e),
    };

    let (kind, status) = match classify(config, now) {
        Some(classified) => classified,
        None => {
            return Ok(ScanOutcome::Rejected {
                reason: AppError::OutOfWindow.to_string(),
            });
        }
    };

    let mut ledger = Ledger::new(pool);
    match ledger.record_scan(person.id, date, kind, status, now.time(), "")? {
        ScanWrite::Accepted => {}
        ScanWrite::DuplicateRejected => {
            return Ok(ScanOutcome::Rejected {
                reason: AppError::DuplicateEvent(format!(
                    "{} already has a {} record today",
                    person.name,
                    kind.to_db_str()
                ))
                .to_string(),
            });
        }
    }

    let notification = compose_notification(&person, kind, status, now);

    Ok(ScanOutcome::Accepted {
        person,
        kind,
        status,
        time: now.time(),
        notification,
    })
}

/// Guardian notification for accepted student scans.
fn compose_notification(
    person: &Person,
    kind: EventKind,
    status: AttendanceStatus,
    now: NaiveDateTime,
) -> Option<(String, String)> {
    if !person.population.is_student() {
        return None;
    }
    let phone = person.guardian_phone.as_ref()?;

    let message = format!(
        "📚 *Notifikasi Absensi Sekolah*\n\nAnak Anda, {}, telah melakukan absen *{}* \
         dengan status *{}* pada pukul {}.",
        person.name,
        kind.to_db_str(),
        status.to_db_str(),
        now.format("%H:%M:%S")
    );

    Some((format_phone(phone), message))
}

/// Normalize a phone number to the international 62... format.
pub fn format_phone(raw: &str) -> String {
    let number = raw.trim();
    if let Some(rest) = number.strip_prefix('0') {
        format!("62{}", rest)
    } else if let Some(rest) = number.strip_prefix("+62") {
        format!("62{}", rest)
    } else {
        number.to_string()
    }
}
