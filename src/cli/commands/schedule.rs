use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::schedule as core_schedule;
use crate::core::windows::ShiftRoster;
use crate::db::pool::DbPool;
use crate::db::persons;
use crate::errors::{AppError, AppResult};
use crate::models::person::Population;
use crate::ui::messages::{success, warning};
use crate::utils::date::{all_days_of_month, parse_date, parse_month};
use crate::utils::table::Table;
use crate::utils::time::effective_now;
use chrono::Datelike;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule {
        month,
        show,
        person,
        date,
        shift,
        copy_previous,
        import,
    } = &cli.command
    {
        let mut pool = DbPool::open(&cfg.database)?;

        // Default month: the month of the effective "now".
        let (year, month_num) = match month {
            Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?,
            None => {
                let now = effective_now(cli.at.as_ref())?;
                (now.date().year(), now.date().month())
            }
        };

        if let Some(key) = person {
            let date_str = date
                .as_ref()
                .ok_or_else(|| AppError::Other("--person requires --date".into()))?;
            let shift_name = shift
                .as_ref()
                .ok_or_else(|| AppError::Other("--person requires --shift".into()))?;
            let day =
                parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;

            core_schedule::set_assignment(&mut pool, key, day, shift_name)?;
            success(format!("{} on {} → {}", key, day, shift_name));
            return Ok(());
        }

        if *copy_previous {
            let copied = core_schedule::copy_previous_month(&mut pool, year, month_num)?;
            success(format!(
                "Copied {} assignments from the previous month.",
                copied
            ));
            return Ok(());
        }

        if let Some(file) = import {
            let (imported, skipped) =
                core_schedule::import_csv(&mut pool, Path::new(file), year, month_num)?;
            success(format!("Imported {} shift assignments.", imported));
            for key in skipped {
                warning(format!("unknown person '{}' skipped", key));
            }
            return Ok(());
        }

        if *show {
            let days = all_days_of_month(year, month_num);
            let roster = ShiftRoster::load(&pool.conn, days[0], *days.last().unwrap())?;
            let staff =
                persons::persons_in_scope(&pool.conn, Some(Population::Security), None, None)?;

            if staff.is_empty() {
                warning("No security staff in the directory.");
                return Ok(());
            }

            let mut columns = vec!["Nama".to_string()];
            columns.extend(days.iter().map(|d| d.day().to_string()));

            let mut table = Table::new(columns);
            for p in &staff {
                let mut row = vec![p.name.clone()];
                for d in &days {
                    row.push(
                        roster
                            .shift_for(p.id, *d)
                            .unwrap_or("-")
                            .to_string(),
                    );
                }
                table.add_row(row);
            }

            println!("Jadwal Keamanan {}-{:02}\n", year, month_num);
            println!("{}", table.render());
        }
    }

    Ok(())
}
