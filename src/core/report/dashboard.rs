//! Whole-population dashboard tally for a single day.

use crate::core::report::ReportTable;
use crate::core::windows::SettingsSnapshot;
use crate::db::{attendance, persons};
use crate::errors::AppResult;
use crate::models::status::{AttendanceStatus, EventKind};
use crate::utils::time::parse_time_hm;
use chrono::{NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use std::collections::HashSet;

#[derive(Debug, Default, Clone, Copy)]
pub struct PopulationTally {
    pub total: i64,
    pub present: usize,
    pub late: usize,
    pub sick: usize,
    pub excused: usize,
    pub absent: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardTally {
    pub students: PopulationTally,
    pub employees: PopulationTally,
    /// False while the day is still in progress (Absent suppressed to 0).
    pub day_closed: bool,
}

/// Returns the tally plus the number of distinct persons with any counted
/// status (used to derive Absent once the day closes).
fn tally(
    records: &[crate::models::record::AttendanceRecord],
    is_scope: impl Fn(i64) -> bool,
) -> (PopulationTally, usize) {
    let mut out = PopulationTally::default();
    let mut present: HashSet<i64> = HashSet::new();
    let mut late: HashSet<i64> = HashSet::new();
    let mut sick: HashSet<i64> = HashSet::new();
    let mut excused: HashSet<i64> = HashSet::new();

    for rec in records {
        if !is_scope(rec.person_id) {
            continue;
        }
        match (rec.kind, rec.status) {
            (EventKind::Entry, AttendanceStatus::Present) => {
                present.insert(rec.person_id);
            }
            (EventKind::Entry, AttendanceStatus::Late) => {
                late.insert(rec.person_id);
            }
            (_, AttendanceStatus::Sick) => {
                sick.insert(rec.person_id);
            }
            (_, AttendanceStatus::Excused) => {
                excused.insert(rec.person_id);
            }
            _ => {}
        }
    }

    out.present = present.len();
    out.late = late.len();
    out.sick = sick.len();
    out.excused = excused.len();

    let mut recorded = present;
    recorded.extend(late);
    recorded.extend(sick);
    recorded.extend(excused);

    (out, recorded.len())
}

/// Build today's tallies.
///
/// Absent counts stay at zero until `now` passes the late cutoff; the day
/// is still in progress before that. The cutoff is the student late cutoff
/// when configured, the fallback (default 08:00) otherwise.
pub fn dashboard(
    conn: &Connection,
    now: NaiveDateTime,
    fallback_cutoff: &str,
) -> AppResult<DashboardTally> {
    let date = now.date();
    let snapshot = SettingsSnapshot::load_for_day(conn, date)?;

    let cutoff: NaiveTime = snapshot
        .student
        .as_ref()
        .and_then(|c| c.late_cutoff)
        .or_else(|| parse_time_hm(fallback_cutoff))
        .unwrap_or_else(|| NaiveTime::from_hms_opt(8, 0, 0).unwrap());

    let day_closed = now.time() > cutoff;

    let records = attendance::records_on_date(conn, date)?;

    let students: HashSet<i64> = persons::persons_in_scope(
        conn,
        Some(crate::models::person::Population::Student),
        None,
        None,
    )?
    .into_iter()
    .map(|p| p.id)
    .collect();

    let (mut student_tally, students_recorded) = tally(&records, |id| students.contains(&id));
    let (mut employee_tally, employees_recorded) = tally(&records, |id| !students.contains(&id));

    student_tally.total = persons::count_by_population(
        conn,
        crate::models::person::Population::Student,
    )?;
    employee_tally.total = persons::count_employees(conn)?;

    for (t, recorded) in [
        (&mut student_tally, students_recorded),
        (&mut employee_tally, employees_recorded),
    ] {
        t.absent = if day_closed {
            (t.total as usize).saturating_sub(recorded)
        } else {
            0
        };
    }

    Ok(DashboardTally {
        students: student_tally,
        employees: employee_tally,
        day_closed,
    })
}

impl DashboardTally {
    pub fn to_table(&self, date: chrono::NaiveDate) -> ReportTable {
        let mut table = ReportTable::new(
            format!("Dashboard {}", date),
            vec![
                "Populasi",
                "Total",
                "Hadir",
                "Terlambat",
                "Sakit",
                "Izin",
                "Alfa",
            ],
        );

        for (label, t) in [("Siswa", self.students), ("Pegawai", self.employees)] {
            table.push(vec![
                label.to_string(),
                t.total.to_string(),
                t.present.to_string(),
                t.late.to_string(),
                t.sick.to_string(),
                t.excused.to_string(),
                t.absent.to_string(),
            ]);
        }

        table
    }
}
