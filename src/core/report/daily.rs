//! Single-day roster: one row per person in scope.

use crate::core::calendar::CalendarResolver;
use crate::core::report::{ReportTable, day_events_by_person, resolve_day_cells};
use crate::core::windows::{SettingsSnapshot, ShiftRoster};
use crate::db::attendance;
use crate::errors::AppResult;
use crate::models::person::Person;
use rusqlite::Connection;

/// Column set shared by the roster shapes: key column name depends on the
/// population scope.
pub fn key_column(student_scope: bool) -> &'static str {
    if student_scope { "NIS" } else { "No ID" }
}

pub fn group_column(student_scope: bool) -> &'static str {
    if student_scope { "Kelas" } else { "Role" }
}

pub fn daily_roster(
    conn: &Connection,
    persons: &[Person],
    student_scope: bool,
    date: chrono::NaiveDate,
) -> AppResult<ReportTable> {
    let snapshot = SettingsSnapshot::load_for_day(conn, date)?;
    let roster = ShiftRoster::load(conn, date, date)?;
    let resolver = CalendarResolver::new(&snapshot, &roster);

    let records = attendance::records_on_date(conn, date)?;
    let days = day_events_by_person(&records);

    let mut table = ReportTable::new(
        format!("Laporan {}", date),
        vec![
            key_column(student_scope),
            "Nama",
            group_column(student_scope),
            "Status",
            "Jam Masuk",
            "Jam Keluar",
            "Waktu Terlambat",
            "Total Waktu",
        ],
    );

    let empty = Default::default();
    for person in persons {
        let non_attendance = resolver.non_attendance(person.population, person.id, date);
        let day = days.get(&(person.id, date)).unwrap_or(&empty);
        let deadline =
            snapshot.lateness_deadline(person.population, roster.shift_for(person.id, date));

        let cells = resolve_day_cells(non_attendance.as_ref(), day, deadline);

        table.push(vec![
            person.key.clone(),
            person.name.clone(),
            person.group_label(),
            cells.status,
            cells.entry,
            cells.exit,
            cells.lateness,
            cells.duration,
        ]);
    }

    Ok(table)
}
