//! Calendar resolver: decides whether a date is a non-attendance day for a
//! given population and person.

use crate::core::windows::{SettingsSnapshot, ShiftRoster};
use crate::models::person::Population;
use crate::models::schedule::is_off;
use crate::utils::date::weekday_name_id;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Why a day is a non-attendance day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonAttendance {
    /// Weekly-recurring closure day (Indonesian weekday name).
    Routine(String),
    /// One-off holiday with its description.
    Special(String),
    /// Security staff with no duty scheduled.
    Off,
}

impl NonAttendance {
    /// Cell value in row-per-day reports.
    pub fn report_cell(&self) -> &'static str {
        match self {
            NonAttendance::Off => "Off",
            _ => "Libur",
        }
    }

    pub fn reason(&self) -> String {
        match self {
            NonAttendance::Routine(day) => format!("routine holiday ({})", day),
            NonAttendance::Special(desc) => format!("holiday: {}", desc),
            NonAttendance::Off => "shift Off".to_string(),
        }
    }
}

pub struct CalendarResolver<'a> {
    snapshot: &'a SettingsSnapshot,
    roster: &'a ShiftRoster,
    student_routine: HashSet<String>,
    staff_routine: HashSet<String>,
}

impl<'a> CalendarResolver<'a> {
    pub fn new(snapshot: &'a SettingsSnapshot, roster: &'a ShiftRoster) -> Self {
        let student_routine: HashSet<String> = snapshot
            .student
            .as_ref()
            .map(|c| c.routine_holidays.iter().cloned().collect())
            .unwrap_or_default();

        // Teachers and staff fall back to the student set when their own
        // config carries no routine days.
        let staff_routine: HashSet<String> = snapshot
            .staff
            .as_ref()
            .filter(|c| !c.routine_holidays.is_empty())
            .map(|c| c.routine_holidays.iter().cloned().collect())
            .unwrap_or_else(|| student_routine.clone());

        Self {
            snapshot,
            roster,
            student_routine,
            staff_routine,
        }
    }

    /// `Some(reason)` when (population, person, date) must not attend.
    ///
    /// Security ignores routine/special holidays entirely: its absence is
    /// governed solely by the shift roster.
    pub fn non_attendance(
        &self,
        population: Population,
        person_id: i64,
        date: NaiveDate,
    ) -> Option<NonAttendance> {
        if population.is_security() {
            let shift = self.roster.shift_for(person_id, date);
            if is_off(shift) {
                return Some(NonAttendance::Off);
            }
            return None;
        }

        // Special holidays take display precedence; both are blocking.
        if let Some(desc) = self.snapshot.specials.get(&date) {
            return Some(NonAttendance::Special(desc.clone()));
        }

        let routine = match population {
            Population::Student => &self.student_routine,
            _ => &self.staff_routine,
        };

        let day_name = weekday_name_id(date.weekday());
        if routine.contains(day_name) {
            return Some(NonAttendance::Routine(day_name.to_string()));
        }

        None
    }

    /// Holiday set for a whole range, computed once for non-security rows
    /// of range reports and the monthly matrix.
    pub fn holiday_set(
        &self,
        population: Population,
        days: &[NaiveDate],
    ) -> HashSet<NaiveDate> {
        let routine = match population {
            Population::Student => &self.student_routine,
            _ => &self.staff_routine,
        };

        let mut set: HashSet<NaiveDate> = self
            .snapshot
            .specials
            .keys()
            .filter(|d| days.contains(*d))
            .copied()
            .collect();

        for d in days {
            if routine.contains(weekday_name_id(d.weekday())) {
                set.insert(*d);
            }
        }

        set
    }
}
