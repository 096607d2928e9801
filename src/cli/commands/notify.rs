use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::notify::{ConsoleSender, dispatch_sweep, late_sweep, next_fire_time};
use crate::core::windows::SettingsSnapshot;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::effective_now;
use chrono::Local;

fn run_sweep(pool: &mut DbPool, now: chrono::NaiveDateTime) -> AppResult<()> {
    let sweep = late_sweep(pool, now)?;

    if sweep.is_empty() {
        info("Nobody to notify: everyone is recorded or the day is off.");
        return Ok(());
    }

    let (sent, failed) = dispatch_sweep(&sweep, &ConsoleSender);
    success(format!("Late sweep done: {} sent, {} failed.", sent, failed));
    Ok(())
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Notify { run, schedule } = &cli.command {
        let mut pool = DbPool::open(&cfg.database)?;
        let now = effective_now(cli.at.as_ref())?;

        if *run {
            run_sweep(&mut pool, now)?;
            return Ok(());
        }

        if *schedule {
            let snapshot = SettingsSnapshot::load_for_day(&pool.conn, now.date())?;
            let cutoff = snapshot.student.as_ref().and_then(|c| c.late_cutoff);

            let fire_at = match next_fire_time(now, cutoff) {
                Ok(t) => t,
                Err(e) => {
                    warning(format!("Sweep not scheduled: {}", e));
                    return Ok(());
                }
            };

            info(format!(
                "Late sweep scheduled for {} (one-shot).",
                fire_at.format("%Y-%m-%d %H:%M:%S")
            ));

            // One-shot timer: block until the fire time, run once. The
            // wall clock drives the wait even when --at pinned "now".
            loop {
                let wall = Local::now().naive_local();
                if wall >= fire_at {
                    break;
                }
                let remaining = (fire_at - wall).to_std().unwrap_or_default();
                std::thread::sleep(remaining.min(std::time::Duration::from_secs(60)));
            }

            run_sweep(&mut pool, fire_at)?;
        }
    }

    Ok(())
}
