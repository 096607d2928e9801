use crate::db::pool::DbPool;
use rusqlite::OptionalExtension;
use std::fs;

/// Print database information for `db --info`.
pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("• File: {}", db_path);
    println!("• Size: {:.2} MB", file_mb);

    //
    // 2) COUNTS
    //
    let persons: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;
    let records: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
    let holidays: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM special_holidays", [], |row| row.get(0))?;
    let shifts: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM security_schedule", [], |row| {
            row.get(0)
        })?;

    println!("• Persons:            {}", persons);
    println!("• Attendance records: {}", records);
    println!("• Special holidays:   {}", holidays);
    println!("• Shift assignments:  {}", shifts);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match (first_date, last_date) {
        (Some(first), Some(last)) => println!("• Ledger range:       {} → {}", first, last),
        _ => println!("• Ledger range:       (empty)"),
    }

    println!();
    Ok(())
}
