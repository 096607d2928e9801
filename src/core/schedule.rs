//! Security shift roster maintenance: monthly entry, copy-from-previous
//! month (fills empty slots only) and CSV import.

use crate::core::windows::ShiftRoster;
use crate::db::pool::DbPool;
use crate::db::{persons, schedule};
use crate::errors::{AppError, AppResult};
use crate::models::person::Population;
use crate::utils::date::{all_days_of_month, previous_month};
use chrono::{Datelike, NaiveDate};
use std::path::Path;

/// Set one (person, date) assignment; an empty shift removes nothing and
/// is rejected, use "Off" for a scheduled day off.
pub fn set_assignment(pool: &mut DbPool, key: &str, date: NaiveDate, shift: &str) -> AppResult<()> {
    if shift.trim().is_empty() {
        return Err(AppError::Schedule("shift name must not be empty".into()));
    }

    let person = persons::person_by_key(&pool.conn, key)?
        .ok_or_else(|| AppError::UnknownPerson(key.to_string()))?;

    if person.population != Population::Security {
        return Err(AppError::Schedule(format!(
            "{} is not security staff",
            person.name
        )));
    }

    schedule::insert_assignment(&pool.conn, person.id, date, shift.trim())?;
    Ok(())
}

/// Copy last month's roster into (year, month), filling only slots that
/// are currently empty. Returns the number of copied assignments.
pub fn copy_previous_month(pool: &mut DbPool, year: i32, month: u32) -> AppResult<usize> {
    let days = all_days_of_month(year, month);
    let (prev_year, prev_month) = previous_month(year, month);
    let prev_days = all_days_of_month(prev_year, prev_month);

    let staff = persons::persons_in_scope(&pool.conn, Some(Population::Security), None, None)?;

    let current = ShiftRoster::load(&pool.conn, days[0], *days.last().unwrap())?;
    let previous = ShiftRoster::load(&pool.conn, prev_days[0], *prev_days.last().unwrap())?;

    let tx = pool.conn.transaction()?;
    let mut copied = 0;

    for person in &staff {
        let Some(prev_map) = previous.days_of(person.id) else {
            continue;
        };

        // Align by day-of-month; skip days the previous month did not have.
        for date in &days {
            if current.shift_for(person.id, *date).is_some() {
                continue;
            }

            let source = prev_map
                .iter()
                .find(|(d, _)| d.day() == date.day())
                .map(|(_, s)| s.clone());

            if let Some(shift) = source
                && !shift.trim().is_empty()
            {
                schedule::insert_assignment(&tx, person.id, *date, shift.trim())?;
                copied += 1;
            }
        }
    }

    tx.commit()?;
    Ok(copied)
}

/// Import a month's roster from CSV.
///
/// Expected header: `key` plus `shift_tgl1`..`shift_tglN`. For every person
/// present in the file the month is replaced wholesale; unknown keys are
/// skipped and reported. Best-effort batch: returns (imported assignments,
/// skipped keys).
pub fn import_csv(
    pool: &mut DbPool,
    path: &Path,
    year: i32,
    month: u32,
) -> AppResult<(usize, Vec<String>)> {
    let days = all_days_of_month(year, month);
    let start = days[0];
    let end = *days.last().unwrap();

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::Schedule(format!("cannot read CSV: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::Schedule(format!("cannot read CSV header: {}", e)))?
        .clone();

    let key_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("key"))
        .ok_or_else(|| AppError::Schedule("CSV is missing the 'key' column".into()))?;

    let mut imported = 0;
    let mut skipped = Vec::new();

    let tx = pool.conn.transaction()?;

    for result in reader.records() {
        let record = result.map_err(|e| AppError::Schedule(format!("invalid CSV row: {}", e)))?;

        let key = record.get(key_idx).unwrap_or("").trim().to_string();
        if key.is_empty() {
            continue;
        }

        let Some(person) = persons::person_by_key(&tx, &key)? else {
            skipped.push(key);
            continue;
        };

        // Replace this person's whole month before re-inserting.
        schedule::delete_range_for_person(&tx, person.id, start, end)?;

        for (day_idx, date) in days.iter().enumerate() {
            let col = format!("shift_tgl{}", day_idx + 1);
            let value = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(&col))
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .trim();

            if !value.is_empty() {
                schedule::insert_assignment(&tx, person.id, *date, value)?;
                imported += 1;
            }
        }
    }

    tx.commit()?;
    Ok((imported, skipped))
}
