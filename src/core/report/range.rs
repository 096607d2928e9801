//! Date-range detail: one row per (person, date) pair across the range.

use crate::core::calendar::CalendarResolver;
use crate::core::report::daily::{group_column, key_column};
use crate::core::report::{ReportTable, day_events_by_person, resolve_day_cells};
use crate::core::windows::{SettingsSnapshot, ShiftRoster};
use crate::db::attendance;
use crate::errors::AppResult;
use crate::models::person::Person;
use crate::utils::date::days_between;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn range_detail(
    conn: &Connection,
    persons: &[Person],
    student_scope: bool,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<ReportTable> {
    let snapshot = SettingsSnapshot::load(conn, start, end)?;
    let roster = ShiftRoster::load(conn, start, end)?;
    let resolver = CalendarResolver::new(&snapshot, &roster);

    let records = attendance::records_in_range(conn, start, end)?;
    let days = day_events_by_person(&records);
    let range = days_between(start, end);

    let mut table = ReportTable::new(
        format!("Laporan {} s/d {}", start, end),
        vec![
            "Tanggal",
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
        for date in &range {
            // Each date is independently resolved through the calendar;
            // Libur/Off short-circuits the window-based computation.
            let non_attendance = resolver.non_attendance(person.population, person.id, *date);
            let day = days.get(&(person.id, *date)).unwrap_or(&empty);
            let deadline =
                snapshot.lateness_deadline(person.population, roster.shift_for(person.id, *date));

            let cells = resolve_day_cells(non_attendance.as_ref(), day, deadline);

            table.push(vec![
                date.format("%d-%m-%Y").to_string(),
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
    }

    Ok(table)
}
