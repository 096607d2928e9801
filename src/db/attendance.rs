use crate::errors::{AppError, AppResult};
use crate::models::record::AttendanceRecord;
use crate::models::status::{AttendanceStatus, EventKind};
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

pub fn map_row(row: &Row) -> Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let time = crate::utils::time::parse_time(&time_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(time_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid kind: {}", kind_str))),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        person_id: row.get("person_id")?,
        date,
        kind,
        status,
        time,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_record(conn: &Connection, rec: &AttendanceRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance (person_id, date, kind, status, time, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.person_id,
            rec.date.format("%Y-%m-%d").to_string(),
            rec.kind.to_db_str(),
            rec.status.to_db_str(),
            rec.time.format("%H:%M:%S").to_string(),
            rec.note,
            rec.created_at,
        ],
    )?;
    Ok(())
}

/// Is the slot of `kind` already taken for (person, date)?
///
/// A 'lainnya' record occupies both the entry and the exit slot; asking
/// for the manual slot checks the whole day.
pub fn slot_occupied(
    conn: &Connection,
    person_id: i64,
    date: NaiveDate,
    kind: EventKind,
) -> AppResult<bool> {
    let date_str = date.format("%Y-%m-%d").to_string();

    let sql = match kind {
        EventKind::Manual => {
            "SELECT 1 FROM attendance WHERE person_id = ?1 AND date = ?2 LIMIT 1"
        }
        _ => {
            "SELECT 1 FROM attendance
             WHERE person_id = ?1 AND date = ?2 AND kind IN (?3, 'lainnya')
             LIMIT 1"
        }
    };

    let mut stmt = conn.prepare(sql)?;
    let exists = match kind {
        EventKind::Manual => stmt.exists(params![person_id, date_str])?,
        _ => stmt.exists(params![person_id, date_str, kind.to_db_str()])?,
    };

    Ok(exists)
}

pub fn records_for_day(
    conn: &Connection,
    person_id: i64,
    date: NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE person_id = ?1 AND date = ?2
         ORDER BY time ASC",
    )?;

    let rows = stmt.query_map(
        params![person_id, date.format("%Y-%m-%d").to_string()],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn records_on_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance WHERE date = ?1 ORDER BY person_id ASC, time ASC",
    )?;

    let rows = stmt.query_map([date.format("%Y-%m-%d").to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn records_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY person_id ASC, date ASC, time ASC",
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

pub fn delete_day(conn: &Connection, person_id: i64, date: NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM attendance WHERE person_id = ?1 AND date = ?2",
        params![person_id, date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}
