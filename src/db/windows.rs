use crate::errors::{AppError, AppResult};
use crate::models::holiday::SpecialHoliday;
use crate::models::window::{WindowCategory, WindowConfig};
use crate::utils::time::{format_time_hm, parse_time_hm};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn time_from_col(row: &Row, col: &str) -> Result<chrono::NaiveTime> {
    let s: String = row.get(col)?;
    parse_time_hm(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(s)),
        )
    })
}

pub fn map_row(row: &Row) -> Result<WindowConfig> {
    let category: String = row.get("category")?;
    let cutoff: Option<String> = row.get("late_cutoff")?;
    let cutoff = match cutoff {
        None => None,
        Some(s) if s.is_empty() => None,
        Some(s) => Some(parse_time_hm(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTime(s)),
            )
        })?),
    };

    let routine_str: String = row.get("routine_holidays")?;
    let routine_holidays = routine_str
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
        .collect();

    Ok(WindowConfig {
        category: WindowCategory::from_db_str(&category),
        entry_start: time_from_col(row, "entry_start")?,
        entry_end: time_from_col(row, "entry_end")?,
        late_cutoff: cutoff,
        exit_start: time_from_col(row, "exit_start")?,
        exit_end: time_from_col(row, "exit_end")?,
        routine_holidays,
    })
}

/// Insert or replace the window times of a category, preserving any
/// routine-holiday set already stored on the row.
pub fn upsert_window_config(conn: &Connection, config: &WindowConfig) -> AppResult<()> {
    config.validate()?;

    conn.execute(
        "INSERT INTO window_configs
            (category, entry_start, entry_end, late_cutoff, exit_start, exit_end)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(category) DO UPDATE SET
            entry_start = excluded.entry_start,
            entry_end = excluded.entry_end,
            late_cutoff = excluded.late_cutoff,
            exit_start = excluded.exit_start,
            exit_end = excluded.exit_end",
        params![
            config.category.to_db_str(),
            format_time_hm(config.entry_start),
            format_time_hm(config.entry_end),
            config.late_cutoff.map(format_time_hm),
            format_time_hm(config.exit_start),
            format_time_hm(config.exit_end),
        ],
    )?;
    Ok(())
}

/// Store the routine-holiday weekday set of an existing category row.
pub fn set_routine_holidays(
    conn: &Connection,
    category: &WindowCategory,
    days: &[String],
) -> AppResult<()> {
    let updated = conn.execute(
        "UPDATE window_configs SET routine_holidays = ?1 WHERE category = ?2",
        params![days.join(","), category.to_db_str()],
    )?;

    if updated == 0 {
        return Err(AppError::ConfigMissing(format!(
            "save the '{}' window times before setting routine holidays",
            category.to_db_str()
        )));
    }
    Ok(())
}

pub fn window_config_by_category(
    conn: &Connection,
    category: &WindowCategory,
) -> AppResult<Option<WindowConfig>> {
    let mut stmt = conn.prepare("SELECT * FROM window_configs WHERE category = ?1")?;
    let config = stmt
        .query_row([category.to_db_str()], map_row)
        .optional()?;
    Ok(config)
}

pub fn all_window_configs(conn: &Connection) -> AppResult<Vec<WindowConfig>> {
    let mut stmt = conn.prepare("SELECT * FROM window_configs ORDER BY category ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_window_config(conn: &Connection, category: &WindowCategory) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM window_configs WHERE category = ?1",
        [category.to_db_str()],
    )?;
    Ok(n)
}

// ---------------------------
// Special holidays
// ---------------------------

pub fn map_holiday_row(row: &Row) -> Result<SpecialHoliday> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(SpecialHoliday {
        id: row.get("id")?,
        date,
        description: row.get("description")?,
    })
}

pub fn insert_special_holiday(
    conn: &Connection,
    date: NaiveDate,
    description: &str,
) -> AppResult<()> {
    let result = conn.execute(
        "INSERT INTO special_holidays (date, description) VALUES (?1, ?2)",
        params![date.format("%Y-%m-%d").to_string(), description],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Other(format!(
                "{} is already registered as a holiday",
                date
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn delete_special_holiday(conn: &Connection, date: NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM special_holidays WHERE date = ?1",
        [date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

pub fn special_holidays_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<SpecialHoliday>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM special_holidays WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
        map_holiday_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn all_special_holidays(conn: &Connection) -> AppResult<Vec<SpecialHoliday>> {
    let mut stmt = conn.prepare("SELECT * FROM special_holidays ORDER BY date ASC")?;
    let rows = stmt.query_map([], map_holiday_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
