//! Leave request lifecycle. Approval applies the matching manual override
//! to the ledger so approved leave shows up in reports.

use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::db::{leave, persons};
use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveKind, LeaveRequest, LeaveStatus};
use chrono::{NaiveDate, NaiveDateTime};

pub fn submit(
    pool: &mut DbPool,
    person_key: &str,
    kind: LeaveKind,
    note: &str,
    at: NaiveDateTime,
) -> AppResult<i64> {
    // The key must exist in the directory before a request is accepted.
    persons::person_by_key(&pool.conn, person_key)?
        .ok_or_else(|| AppError::UnknownPerson(person_key.to_string()))?;

    let id = leave::insert_request(
        &pool.conn,
        person_key,
        &at.format("%Y-%m-%d %H:%M:%S").to_string(),
        kind,
        note,
    )?;
    Ok(id)
}

pub fn list(pool: &mut DbPool, date: Option<&str>) -> AppResult<Vec<LeaveRequest>> {
    leave::list_requests(&pool.conn, date)
}

/// Approve a pending request and write the matching manual record for
/// `date` (Sakit → Sick, Izin → Excused).
pub fn approve(
    pool: &mut DbPool,
    id: i64,
    date: NaiveDate,
    at: NaiveDateTime,
) -> AppResult<LeaveRequest> {
    let request = leave::request_by_id(&pool.conn, id)?
        .ok_or_else(|| AppError::Leave(format!("request #{} not found", id)))?;

    if request.status != LeaveStatus::Pending {
        return Err(AppError::Leave(format!(
            "request #{} was already decided ({})",
            id,
            request.status.to_db_str()
        )));
    }

    let person = persons::person_by_key(&pool.conn, &request.person_key)?
        .ok_or_else(|| AppError::UnknownPerson(request.person_key.clone()))?;

    let mut ledger = Ledger::new(pool);
    ledger.replace_day(
        person.id,
        date,
        request.kind.as_status(),
        at,
        &format!("{} (Izin disetujui)", request.kind.to_db_str()),
    )?;

    leave::set_request_status(
        &pool.conn,
        id,
        LeaveStatus::Approved,
        &at.format("%Y-%m-%d %H:%M:%S").to_string(),
    )?;

    Ok(request)
}

pub fn reject(pool: &mut DbPool, id: i64, at: NaiveDateTime) -> AppResult<LeaveRequest> {
    let request = leave::request_by_id(&pool.conn, id)?
        .ok_or_else(|| AppError::Leave(format!("request #{} not found", id)))?;

    if request.status != LeaveStatus::Pending {
        return Err(AppError::Leave(format!(
            "request #{} was already decided ({})",
            id,
            request.status.to_db_str()
        )));
    }

    leave::set_request_status(
        &pool.conn,
        id,
        LeaveStatus::Rejected,
        &at.format("%Y-%m-%d %H:%M:%S").to_string(),
    )?;

    Ok(request)
}
