use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveKind, LeaveRequest, LeaveStatus};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<LeaveRequest> {
    let kind_str: String = row.get("kind")?;
    let kind = LeaveKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Leave(format!("invalid kind: {}", kind_str))),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = LeaveStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Leave(format!("invalid status: {}", status_str))),
        )
    })?;

    Ok(LeaveRequest {
        id: row.get("id")?,
        person_key: row.get("person_key")?,
        submitted_at: row.get("submitted_at")?,
        kind,
        note: row.get("note")?,
        status,
    })
}

pub fn insert_request(
    conn: &Connection,
    person_key: &str,
    submitted_at: &str,
    kind: LeaveKind,
    note: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO leave_requests (person_key, submitted_at, kind, note)
         VALUES (?1, ?2, ?3, ?4)",
        params![person_key, submitted_at, kind.to_db_str(), note],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn request_by_id(conn: &Connection, id: i64) -> AppResult<Option<LeaveRequest>> {
    let mut stmt = conn.prepare("SELECT * FROM leave_requests WHERE id = ?1")?;
    let req = stmt.query_row([id], map_row).optional()?;
    Ok(req)
}

/// Newest first; `date` filters on the submission day (YYYY-MM-DD prefix).
pub fn list_requests(conn: &Connection, date: Option<&str>) -> AppResult<Vec<LeaveRequest>> {
    let mut out = Vec::new();

    match date {
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM leave_requests ORDER BY submitted_at DESC")?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(d) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM leave_requests
                 WHERE submitted_at LIKE ?1
                 ORDER BY submitted_at DESC",
            )?;
            let rows = stmt.query_map([format!("{}%", d)], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn set_request_status(
    conn: &Connection,
    id: i64,
    status: LeaveStatus,
    decided_at: &str,
) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE leave_requests SET status = ?1, decided_at = ?2 WHERE id = ?3",
        params![status.to_db_str(), decided_at, id],
    )?;

    if n == 0 {
        return Err(AppError::Leave(format!("request #{} not found", id)));
    }
    Ok(())
}
