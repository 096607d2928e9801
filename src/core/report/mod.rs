pub mod dashboard;
pub mod daily;
pub mod individual;
pub mod matrix;
pub mod metrics;
pub mod range;

use crate::core::calendar::NonAttendance;
use crate::models::record::{AttendanceRecord, DayEvents};
use crate::utils::table::Table;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::HashMap;

/// Generic tabular report handed to the export sink or the terminal
/// renderer; always recomputed, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(title: impl Into<String>, columns: Vec<&str>) -> Self {
        Self {
            title: title.into(),
            columns: columns.into_iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render_terminal(&self) -> String {
        let mut table = Table::new(self.columns.clone());
        for row in &self.rows {
            table.add_row(row.clone());
        }
        format!("{}\n\n{}", self.title, table.render())
    }
}

/// The per-(person, day) cells shared by the daily, range and individual
/// shapes.
#[derive(Debug, Clone)]
pub struct DayCells {
    pub status: String,
    pub entry: String,
    pub exit: String,
    pub lateness: String,
    pub duration: String,
}

/// Fold one resolved day into report cells.
///
/// A holiday/off day short-circuits every window-based computation; on
/// attendable days lateness and duration are computed only for
/// Hadir/Terlambat, and Terlambat renders as Hadir.
pub fn resolve_day_cells(
    non_attendance: Option<&NonAttendance>,
    day: &DayEvents,
    deadline: Option<NaiveTime>,
) -> DayCells {
    if let Some(reason) = non_attendance {
        return DayCells {
            status: reason.report_cell().to_string(),
            entry: "-".into(),
            exit: "-".into(),
            lateness: "-".into(),
            duration: "-".into(),
        };
    }

    let status = day.status();
    let entry_time = day.entry_time();
    let exit_time = day.exit_time();

    let (lateness, duration) = if status.counts_as_present() {
        (
            metrics::lateness(entry_time, deadline),
            metrics::duration(entry_time, exit_time),
        )
    } else {
        ("-".to_string(), "-".to_string())
    };

    DayCells {
        status: status.report_label().to_string(),
        entry: entry_time
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".into()),
        exit: exit_time
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".into()),
        lateness,
        duration,
    }
}

/// Group ledger rows into resolved day views keyed by (person, date).
pub fn day_events_by_person(
    records: &[AttendanceRecord],
) -> HashMap<(i64, NaiveDate), DayEvents> {
    let mut grouped: HashMap<(i64, NaiveDate), Vec<AttendanceRecord>> = HashMap::new();
    for rec in records {
        grouped
            .entry((rec.person_id, rec.date))
            .or_default()
            .push(rec.clone());
    }

    grouped
        .into_iter()
        .map(|(key, recs)| (key, DayEvents::from_records(&recs)))
        .collect()
}

/// Summary counters keyed by displayed status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusTotals {
    pub present: usize,
    pub sick: usize,
    pub excused: usize,
    pub absent: usize,
}

impl StatusTotals {
    /// Count a displayed cell; holiday/off cells are not tallied.
    pub fn count_cell(&mut self, cell: &str) {
        match cell {
            "Hadir" | "H" => self.present += 1,
            "Sakit" | "S" => self.sick += 1,
            "Izin" | "I" => self.excused += 1,
            "Alfa" | "A" => self.absent += 1,
            _ => {}
        }
    }

}
