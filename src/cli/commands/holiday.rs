use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::windows;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Holiday {
        add,
        desc,
        del,
        list,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;

        if let Some(date_str) = add {
            let date =
                parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
            let description = desc
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| AppError::Other("--add requires --desc".into()))?;

            windows::insert_special_holiday(&pool.conn, date, description.trim())?;
            success(format!("Holiday added for {}: {}", date, description.trim()));
            return Ok(());
        }

        if let Some(date_str) = del {
            let date =
                parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
            let n = windows::delete_special_holiday(&pool.conn, date)?;
            if n > 0 {
                success(format!("Holiday on {} removed.", date));
            } else {
                warning(format!("No holiday registered on {}.", date));
            }
            return Ok(());
        }

        if *list {
            let holidays = windows::all_special_holidays(&pool.conn)?;
            if holidays.is_empty() {
                warning("No special holidays registered.");
                return Ok(());
            }

            let mut table = Table::new(vec!["Tanggal".to_string(), "Keterangan".to_string()]);
            for h in holidays {
                table.add_row(vec![h.date.to_string(), h.description]);
            }
            println!("{}", table.render());
        }
    }

    Ok(())
}
