//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so error handling
//! stays consistent across the crate.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    #[error("Invalid population: {0}")]
    InvalidPopulation(String),

    #[error("Invalid QR tag: {0}")]
    InvalidTag(String),

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("No attendance window configured: {0}")]
    ConfigMissing(String),

    #[error("Person not found: {0}")]
    UnknownPerson(String),

    #[error("not a valid attendance time")]
    OutOfWindow,

    #[error("duplicate event: {0}")]
    DuplicateEvent(String),

    #[error("{0}; attendance not recorded")]
    HolidayOrOff(String),

    #[error("Invalid window configuration: {0}")]
    InvalidWindow(String),

    #[error("Schedule error: {0}")]
    Schedule(String),

    #[error("Leave request error: {0}")]
    Leave(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
