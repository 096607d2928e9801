use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::leave as core_leave;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::leave::LeaveKind;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date;
use crate::utils::table::Table;
use crate::utils::time::effective_now;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Leave {
        submit,
        person,
        kind,
        note,
        list,
        date,
        approve,
        for_date,
        reject,
    } = &cli.command
    {
        let mut pool = DbPool::open(&cfg.database)?;
        let now = effective_now(cli.at.as_ref())?;

        if *submit {
            let key = person
                .as_deref()
                .ok_or_else(|| AppError::Leave("--submit requires --person".into()))?;
            let kind = kind
                .as_deref()
                .and_then(LeaveKind::from_cli_str)
                .ok_or_else(|| AppError::Leave("--kind must be Sakit or Izin".into()))?;

            let id =
                core_leave::submit(&mut pool, key, kind, note.as_deref().unwrap_or(""), now)?;
            success(format!(
                "Leave request #{} submitted for {} ({}).",
                id,
                key,
                kind.to_db_str()
            ));
            return Ok(());
        }

        if let Some(id) = approve {
            let day = match for_date {
                Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                None => now.date(),
            };

            let request = core_leave::approve(&mut pool, *id, day, now)?;
            success(format!(
                "Request #{} approved: {} marked {} on {}.",
                id,
                request.person_key,
                request.kind.to_db_str(),
                day
            ));
            return Ok(());
        }

        if let Some(id) = reject {
            let request = core_leave::reject(&mut pool, *id, now)?;
            success(format!(
                "Request #{} from {} rejected.",
                id, request.person_key
            ));
            return Ok(());
        }

        if *list {
            let requests = core_leave::list(&mut pool, date.as_deref())?;
            if requests.is_empty() {
                warning("No leave requests found.");
                return Ok(());
            }

            let mut table = Table::new(
                ["ID", "Key", "Diajukan", "Jenis", "Status", "Keterangan"]
                    .map(String::from)
                    .to_vec(),
            );
            for r in requests {
                table.add_row(vec![
                    r.id.to_string(),
                    r.person_key,
                    r.submitted_at,
                    r.kind.to_db_str().to_string(),
                    r.status.to_db_str().to_string(),
                    r.note,
                ]);
            }
            println!("{}", table.render());
        }
    }

    Ok(())
}
