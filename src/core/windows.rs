//! Window configuration store: an explicit settings snapshot loaded from
//! the database once per operation and injected into the resolvers.

use crate::db::{schedule, windows};
use crate::errors::{AppError, AppResult};
use crate::models::person::Population;
use crate::models::schedule::is_off;
use crate::models::window::{WindowCategory, WindowConfig};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};

/// All window configurations plus the special holidays of a date range.
#[derive(Debug, Default)]
pub struct SettingsSnapshot {
    pub student: Option<WindowConfig>,
    pub staff: Option<WindowConfig>,
    pub shifts: HashMap<String, WindowConfig>,
    pub specials: BTreeMap<NaiveDate, String>,
}

impl SettingsSnapshot {
    /// Load every window config and the special holidays falling in
    /// [start, end].
    pub fn load(conn: &Connection, start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        let mut snapshot = SettingsSnapshot::default();

        for config in windows::all_window_configs(conn)? {
            match &config.category {
                WindowCategory::Student => snapshot.student = Some(config),
                WindowCategory::Staff => snapshot.staff = Some(config),
                WindowCategory::Shift(name) => {
                    snapshot.shifts.insert(name.clone(), config);
                }
            }
        }

        for holiday in windows::special_holidays_in_range(conn, start, end)? {
            snapshot.specials.insert(holiday.date, holiday.description);
        }

        Ok(snapshot)
    }

    pub fn load_for_day(conn: &Connection, date: NaiveDate) -> AppResult<Self> {
        Self::load(conn, date, date)
    }

    /// Resolve the window config of a population; security needs the shift
    /// scheduled for the day at hand.
    pub fn resolve(
        &self,
        population: Population,
        shift_for_day: Option<&str>,
    ) -> AppResult<&WindowConfig> {
        match population {
            Population::Student => self.student.as_ref().ok_or_else(|| {
                AppError::ConfigMissing("student attendance windows are not set".into())
            }),
            Population::Teacher | Population::Staff => self.staff.as_ref().ok_or_else(|| {
                AppError::ConfigMissing("staff attendance windows are not set".into())
            }),
            Population::Security => {
                // covers both "Off"/empty and an absent roster row
                let shift = shift_for_day.filter(|s| !is_off(Some(*s))).ok_or_else(|| {
                    AppError::ConfigMissing("no security shift scheduled for this day".into())
                })?;
                self.shifts.get(shift).ok_or_else(|| {
                    AppError::ConfigMissing(format!(
                        "no attendance windows configured for shift '{}'",
                        shift
                    ))
                })
            }
        }
    }

    /// Lateness deadline for reports: `-` fields downstream when None.
    pub fn lateness_deadline(
        &self,
        population: Population,
        shift_for_day: Option<&str>,
    ) -> Option<chrono::NaiveTime> {
        self.resolve(population, shift_for_day)
            .ok()
            .map(|c| c.lateness_deadline())
    }
}

/// In-memory security roster for a date range:
/// person_id → date → shift name.
#[derive(Debug, Default)]
pub struct ShiftRoster {
    map: HashMap<i64, BTreeMap<NaiveDate, String>>,
}

impl ShiftRoster {
    pub fn load(conn: &Connection, start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        let mut roster = ShiftRoster::default();
        for entry in schedule::assignments_in_range(conn, start, end)? {
            roster
                .map
                .entry(entry.person_id)
                .or_default()
                .insert(entry.date, entry.shift);
        }
        Ok(roster)
    }

    pub fn shift_for(&self, person_id: i64, date: NaiveDate) -> Option<&str> {
        self.map
            .get(&person_id)
            .and_then(|days| days.get(&date))
            .map(|s| s.as_str())
    }

    pub fn insert(&mut self, person_id: i64, date: NaiveDate, shift: String) {
        self.map.entry(person_id).or_default().insert(date, shift);
    }

    pub fn days_of(&self, person_id: i64) -> Option<&BTreeMap<NaiveDate, String>> {
        self.map.get(&person_id)
    }
}
