//! Monthly matrix: one row per person, one single-letter column per day of
//! month, trailing summary counts.

use crate::core::calendar::CalendarResolver;
use crate::core::report::daily::{group_column, key_column};
use crate::core::report::{ReportTable, StatusTotals};
use crate::core::windows::{SettingsSnapshot, ShiftRoster};
use crate::db::attendance;
use crate::errors::AppResult;
use crate::models::person::Person;
use crate::models::schedule::is_off;
use crate::models::status::EventKind;
use crate::utils::date::{all_days_of_month, month_name};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use std::collections::HashMap;

/// One matrix row before rendering: a person and one cell per day.
#[derive(Debug, Clone)]
pub struct PersonDaySummary {
    pub key: String,
    pub name: String,
    pub group: String,
    pub cells: Vec<String>, // "H" | "S" | "I" | "A" | "-"
}

/// Pure matrix construction, decoupled from any writer so it is
/// independently testable.
pub fn build_matrix(
    title: String,
    student_scope: bool,
    days: &[NaiveDate],
    rows: Vec<PersonDaySummary>,
) -> ReportTable {
    let mut columns: Vec<String> = vec![
        key_column(student_scope).to_string(),
        "Nama".to_string(),
        group_column(student_scope).to_string(),
    ];
    columns.extend(days.iter().map(|d| d.day().to_string()));
    columns.extend(
        ["Hadir", "Sakit", "Izin", "Alfa"]
            .iter()
            .map(|s| s.to_string()),
    );

    let mut table = ReportTable {
        title,
        columns,
        rows: Vec::new(),
    };

    for row in rows {
        let mut totals = StatusTotals::default();
        for cell in &row.cells {
            totals.count_cell(cell);
        }

        let mut cells = vec![row.key, row.name, row.group];
        cells.extend(row.cells);
        cells.push(totals.present.to_string());
        cells.push(totals.sick.to_string());
        cells.push(totals.excused.to_string());
        cells.push(totals.absent.to_string());

        table.push(cells);
    }

    table
}

/// Collect the per-day status letters for a month and fold them through
/// [`build_matrix`].
pub fn monthly_matrix(
    conn: &Connection,
    persons: &[Person],
    student_scope: bool,
    year: i32,
    month: u32,
) -> AppResult<ReportTable> {
    let days = all_days_of_month(year, month);
    let start = days[0];
    let end = *days.last().unwrap();

    let snapshot = SettingsSnapshot::load(conn, start, end)?;
    let roster = ShiftRoster::load(conn, start, end)?;
    let resolver = CalendarResolver::new(&snapshot, &roster);

    // Only entry and manual records define the day letter.
    let mut letters: HashMap<(i64, NaiveDate), &'static str> = HashMap::new();
    for rec in attendance::records_in_range(conn, start, end)? {
        if matches!(rec.kind, EventKind::Entry | EventKind::Manual) {
            letters.insert((rec.person_id, rec.date), rec.status.matrix_letter());
        }
    }

    let mut rows = Vec::new();
    for person in persons {
        // Non-security rows resolve the holiday set once for the range;
        // security rows consult the per-day shift lookup instead.
        let holidays = if person.population.is_security() {
            Default::default()
        } else {
            resolver.holiday_set(person.population, &days)
        };

        let cells = days
            .iter()
            .map(|date| {
                if person.population.is_security() {
                    if is_off(roster.shift_for(person.id, *date)) {
                        "-"
                    } else {
                        letters.get(&(person.id, *date)).copied().unwrap_or("A")
                    }
                } else if holidays.contains(date) {
                    "-"
                } else {
                    letters.get(&(person.id, *date)).copied().unwrap_or("A")
                }
                .to_string()
            })
            .collect();

        rows.push(PersonDaySummary {
            key: person.key.clone(),
            name: person.name.clone(),
            group: person.group_label(),
            cells,
        });
    }

    let title = format!("Laporan {} {}", month_name(month), year);
    Ok(build_matrix(title, student_scope, &days, rows))
}
