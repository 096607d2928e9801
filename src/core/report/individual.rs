//! Individual monthly summary: a row-per-day detail table for one person,
//! followed by a blank separator and four total rows.

use crate::core::calendar::CalendarResolver;
use crate::core::report::{ReportTable, StatusTotals, day_events_by_person, resolve_day_cells};
use crate::core::windows::{SettingsSnapshot, ShiftRoster};
use crate::db::attendance;
use crate::errors::AppResult;
use crate::models::person::Person;
use crate::utils::date::{all_days_of_month, month_name};
use rusqlite::Connection;

pub fn individual_summary(
    conn: &Connection,
    person: &Person,
    year: i32,
    month: u32,
) -> AppResult<ReportTable> {
    let days = all_days_of_month(year, month);
    let start = days[0];
    let end = *days.last().unwrap();

    let snapshot = SettingsSnapshot::load(conn, start, end)?;
    let roster = ShiftRoster::load(conn, start, end)?;
    let resolver = CalendarResolver::new(&snapshot, &roster);

    let records = attendance::records_in_range(conn, start, end)?;
    let day_events = day_events_by_person(&records);

    let mut table = ReportTable::new(
        format!("Absensi {} - {} {}", person.name, month_name(month), year),
        vec![
            "Tanggal",
            "Status",
            "Jam Masuk",
            "Jam Keluar",
            "Waktu Terlambat",
            "Total Waktu",
        ],
    );

    let mut totals = StatusTotals::default();
    let empty = Default::default();

    for date in &days {
        let non_attendance = resolver.non_attendance(person.population, person.id, *date);
        let day = day_events.get(&(person.id, *date)).unwrap_or(&empty);
        let deadline =
            snapshot.lateness_deadline(person.population, roster.shift_for(person.id, *date));

        let cells = resolve_day_cells(non_attendance.as_ref(), day, deadline);
        totals.count_cell(&cells.status);

        table.push(vec![
            date.format("%d-%m-%Y").to_string(),
            cells.status,
            cells.entry,
            cells.exit,
            cells.lateness,
            cells.duration,
        ]);
    }

    // Blank separator, then the four summary rows.
    table.push(vec![String::new(); 6]);
    for (label, value) in [
        ("Total Hadir", totals.present),
        ("Total Sakit", totals.sick),
        ("Total Izin", totals.excused),
        ("Total Alfa", totals.absent),
    ] {
        let mut row = vec![label.to_string(), value.to_string()];
        row.resize(6, String::new());
        table.push(row);
    }

    Ok(table)
}
