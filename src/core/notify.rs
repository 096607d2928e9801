//! Late-scan sweep and its one-shot schedule.
//!
//! Once per day, just past the late cutoff, students without an entry
//! record are collected and a message is dispatched per guardian through
//! the NotificationSender collaborator. Fire-and-forget: failures are
//! reported to the console and never retried.

use crate::core::calendar::CalendarResolver;
use crate::core::scan::format_phone;
use crate::core::windows::{SettingsSnapshot, ShiftRoster};
use crate::db::pool::DbPool;
use crate::db::{attendance, persons};
use crate::errors::{AppError, AppResult};
use crate::models::person::Population;
use crate::models::status::EventKind;
use crate::ui::messages::info;
use chrono::{Duration, NaiveDateTime};
use std::collections::HashSet;

/// External message dispatch boundary.
pub trait NotificationSender {
    fn send(&self, destination: &str, message: &str) -> AppResult<()>;
}

/// Default sender: prints the message instead of delivering it.
pub struct ConsoleSender;

impl NotificationSender for ConsoleSender {
    fn send(&self, destination: &str, message: &str) -> AppResult<()> {
        info(format!("→ {}: {}", destination, message));
        Ok(())
    }
}

/// One pending late notification.
#[derive(Debug, Clone)]
pub struct LateNotification {
    pub person_name: String,
    pub destination: Option<String>,
    pub message: String,
}

/// Compute the one-shot fire time: today at late_cutoff + 1 minute, or the
/// same time tomorrow when today's slot has already passed.
pub fn next_fire_time(
    now: NaiveDateTime,
    late_cutoff: Option<chrono::NaiveTime>,
) -> AppResult<NaiveDateTime> {
    let cutoff = late_cutoff
        .ok_or_else(|| AppError::ConfigMissing("student late cutoff is not set".into()))?;

    let mut fire = now.date().and_time(cutoff) + Duration::minutes(1);
    if fire < now {
        fire += Duration::days(1);
    }
    Ok(fire)
}

/// Collect the students without an entry record today. On holidays the
/// sweep is empty by definition.
pub fn late_sweep(pool: &mut DbPool, now: NaiveDateTime) -> AppResult<Vec<LateNotification>> {
    let date = now.date();
    let snapshot = SettingsSnapshot::load_for_day(&pool.conn, date)?;
    let roster = ShiftRoster::default();
    let resolver = CalendarResolver::new(&snapshot, &roster);

    let students = persons::persons_in_scope(&pool.conn, Some(Population::Student), None, None)?;
    if students.is_empty() {
        return Ok(Vec::new());
    }

    // Any student with a holiday today means the whole population is off.
    if let Some(first) = students.first()
        && resolver
            .non_attendance(first.population, first.id, date)
            .is_some()
    {
        return Ok(Vec::new());
    }

    let recorded: HashSet<i64> = attendance::records_on_date(&pool.conn, date)?
        .into_iter()
        .filter(|r| matches!(r.kind, EventKind::Entry | EventKind::Manual))
        .map(|r| r.person_id)
        .collect();

    let mut out = Vec::new();
    for student in students {
        if recorded.contains(&student.id) {
            continue;
        }

        let message = format!(
            "📚 *Notifikasi Absensi Sekolah*\n\nAnak Anda, {}, belum tercatat absen masuk \
             hingga pukul {}.",
            student.name,
            now.format("%H:%M")
        );

        out.push(LateNotification {
            person_name: student.name.clone(),
            destination: student.guardian_phone.as_deref().map(format_phone),
            message,
        });
    }

    Ok(out)
}

/// Dispatch a sweep through the sender; failures are reported per person
/// and do not abort the rest.
pub fn dispatch_sweep(
    sweep: &[LateNotification],
    sender: &dyn NotificationSender,
) -> (usize, usize) {
    let mut sent = 0;
    let mut failed = 0;

    for notification in sweep {
        match &notification.destination {
            None => {
                crate::ui::messages::warning(format!(
                    "{}: no guardian phone on file, skipped",
                    notification.person_name
                ));
                failed += 1;
            }
            Some(dest) => match sender.send(dest, &notification.message) {
                Ok(()) => sent += 1,
                Err(e) => {
                    crate::ui::messages::error(format!(
                        "{}: notification failed: {}",
                        notification.person_name, e
                    ));
                    failed += 1;
                }
            },
        }
    }

    (sent, failed)
}
