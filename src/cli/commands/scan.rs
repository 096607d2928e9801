use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::notify::{ConsoleSender, NotificationSender};
use crate::core::scan::{self, ScanOutcome};
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use crate::utils::time::effective_now;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { tag } = &cli.command {
        let mut pool = DbPool::open(&cfg.database)?;
        let now = effective_now(cli.at.as_ref())?;

        match scan::process(&mut pool, tag, now)? {
            ScanOutcome::Accepted {
                person,
                kind,
                status,
                time,
                notification,
            } => {
                success(format!(
                    "{}: {} {} recorded at {} ({}).",
                    person.name,
                    kind.to_db_str(),
                    person.key,
                    time.format("%H:%M:%S"),
                    status.to_db_str()
                ));

                oplog(
                    &pool.conn,
                    "scan",
                    &person.key,
                    &format!("{} {}", kind.to_db_str(), status.to_db_str()),
                )?;

                // Fire-and-forget guardian notification; failure is
                // reported, never retried.
                if let Some((destination, message)) = notification {
                    let sender = ConsoleSender;
                    if let Err(e) = sender.send(&destination, &message) {
                        warning(format!("attendance saved, notification failed: {}", e));
                    }
                }
            }
            ScanOutcome::Rejected { reason } => {
                warning(format!("Scan rejected: {}", reason));
            }
            ScanOutcome::ConfigMissing { reason } => {
                error(format!("Scan failed: {}", reason));
            }
        }
    }

    Ok(())
}
