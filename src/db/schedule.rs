use crate::errors::{AppError, AppResult};
use crate::models::schedule::ShiftAssignment;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<ShiftAssignment> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(ShiftAssignment {
        id: row.get("id")?,
        person_id: row.get("person_id")?,
        date,
        shift: row.get("shift")?,
    })
}

pub fn insert_assignment(
    conn: &Connection,
    person_id: i64,
    date: NaiveDate,
    shift: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO security_schedule (person_id, date, shift)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(person_id, date) DO UPDATE SET shift = excluded.shift",
        params![person_id, date.format("%Y-%m-%d").to_string(), shift],
    )?;
    Ok(())
}

pub fn assignment_for(
    conn: &Connection,
    person_id: i64,
    date: NaiveDate,
) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT shift FROM security_schedule WHERE person_id = ?1 AND date = ?2",
    )?;
    let shift = stmt
        .query_row(
            params![person_id, date.format("%Y-%m-%d").to_string()],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(shift)
}

pub fn assignments_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<ShiftAssignment>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM security_schedule
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY person_id ASC, date ASC",
    )?;

    let rows = stmt.query_map(
        params![
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Remove one person's assignments in [start, end].
pub fn delete_range_for_person(
    conn: &Connection,
    person_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM security_schedule
         WHERE person_id = ?1 AND date BETWEEN ?2 AND ?3",
        params![
            person_id,
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
    )?;
    Ok(n)
}
