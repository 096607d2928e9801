use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::persons;
use crate::errors::{AppError, AppResult};
use crate::models::status::AttendanceStatus;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date;
use crate::utils::time::effective_now;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Override {
        person,
        status,
        date,
        note,
    } = &cli.command
    {
        if person.is_empty() {
            return Err(AppError::Other("--person is required at least once".into()));
        }

        let status = AttendanceStatus::from_cli_str(status)
            .ok_or_else(|| AppError::InvalidStatus(status.clone()))?;

        let now = effective_now(cli.at.as_ref())?;
        let day = match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => now.date(),
        };
        let note = note.clone().unwrap_or_else(|| {
            format!("{} (Manual)", status.to_db_str())
        });

        let mut pool = DbPool::open(&cfg.database)?;

        // Resolve every key first; unknown keys become per-person failures
        // so the rest of the batch still goes through.
        let mut resolved: Vec<(i64, String)> = Vec::new();
        let mut failures: Vec<(String, String)> = Vec::new();

        for key in person {
            match persons::person_by_key(&pool.conn, key)? {
                Some(p) => resolved.push((p.id, p.key)),
                None => failures.push((key.clone(), "not found in the directory".into())),
            }
        }

        let mut ledger = Ledger::new(&mut pool);
        let outcome = ledger.replace_day_bulk(&resolved, day, status, now, &note)?;

        success(format!(
            "Updated {} person(s) to {} for {}.",
            outcome.updated,
            status.to_db_str(),
            day
        ));

        for (key, why) in failures.into_iter().chain(outcome.failures) {
            warning(format!("{}: {}", key, why));
        }

        oplog(
            &pool.conn,
            "override",
            &person.join(","),
            &format!("{} on {}", status.to_db_str(), day),
        )?;
    }

    Ok(())
}
