use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the full schema.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS persons (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            key            TEXT NOT NULL UNIQUE,
            name           TEXT NOT NULL,
            population     TEXT NOT NULL
                           CHECK(population IN ('student','teacher','staff','security')),
            class_name     TEXT DEFAULT NULL,
            guardian_phone TEXT DEFAULT NULL
        );

        CREATE TABLE IF NOT EXISTS window_configs (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            category         TEXT NOT NULL UNIQUE,
            entry_start      TEXT NOT NULL,
            entry_end        TEXT NOT NULL,
            late_cutoff      TEXT DEFAULT NULL,
            exit_start       TEXT NOT NULL,
            exit_end         TEXT NOT NULL,
            routine_holidays TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS special_holidays (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS security_schedule (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL,
            date      TEXT NOT NULL,
            shift     TEXT NOT NULL,
            UNIQUE(person_id, date)
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id  INTEGER NOT NULL,
            date       TEXT NOT NULL,
            kind       TEXT NOT NULL CHECK(kind IN ('masuk','pulang','lainnya')),
            status     TEXT NOT NULL
                       CHECK(status IN ('Hadir','Terlambat','Sakit','Izin','Alfa')),
            time       TEXT NOT NULL,
            note       TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            UNIQUE(person_id, date, kind)
        );

        CREATE TABLE IF NOT EXISTS leave_requests (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            person_key   TEXT NOT NULL,
            submitted_at TEXT NOT NULL,
            kind         TEXT NOT NULL CHECK(kind IN ('Sakit','Izin')),
            note         TEXT NOT NULL DEFAULT '',
            status       TEXT NOT NULL DEFAULT 'Pending'
                         CHECK(status IN ('Pending','Disetujui','Ditolak')),
            decided_at   TEXT DEFAULT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
        CREATE INDEX IF NOT EXISTS idx_attendance_person_date ON attendance(person_id, date);
        CREATE INDEX IF NOT EXISTS idx_schedule_date ON security_schedule(date);
        "#,
    )?;
    Ok(())
}

/// Has a given migration already been recorded in the log table?
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Early schemas kept leave requests without a decision timestamp.
fn migrate_add_decided_at(conn: &Connection) -> Result<()> {
    let version = "20250902_0004_add_leave_decided_at";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let mut stmt = conn.prepare("PRAGMA table_info('leave_requests')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let mut has_col = false;
    for c in cols {
        if c? == "decided_at" {
            has_col = true;
            break;
        }
    }

    if !has_col {
        conn.execute(
            "ALTER TABLE leave_requests ADD COLUMN decided_at TEXT DEFAULT NULL;",
            [],
        )?;
        success("Migration applied: added 'decided_at' to leave_requests.");
    }

    mark_migration(conn, version, "Added decided_at to leave_requests")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    let fresh = !table_exists(conn, "attendance")?;
    create_schema(conn)?;
    if fresh {
        mark_migration(conn, "20250815_0001_base_schema", "Created base schema")?;
    }

    // 3) Incremental migrations
    migrate_add_decided_at(conn)?;

    Ok(())
}
