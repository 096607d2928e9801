use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::windows;
use crate::errors::{AppError, AppResult};
use crate::models::window::{WindowCategory, WindowConfig};
use crate::ui::messages::{success, warning};
use crate::utils::date::weekday_from_name_id;
use crate::utils::table::Table;
use crate::utils::time::{format_time_hm, parse_optional_time_hm, parse_time_hm};

fn required_time(input: Option<&String>, flag: &str) -> AppResult<chrono::NaiveTime> {
    let s = input.ok_or_else(|| AppError::Other(format!("--set requires {}", flag)))?;
    parse_time_hm(s).ok_or_else(|| AppError::InvalidTime(s.clone()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Window {
        show,
        set,
        entry_start,
        entry_end,
        late_cutoff,
        exit_start,
        exit_end,
        routine,
        category,
        reset,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;

        if let Some(cat) = set {
            let category = WindowCategory::from_db_str(&cat.to_lowercase());
            let config = WindowConfig {
                category: category.clone(),
                entry_start: required_time(entry_start.as_ref(), "--entry-start")?,
                entry_end: required_time(entry_end.as_ref(), "--entry-end")?,
                late_cutoff: parse_optional_time_hm(late_cutoff.as_ref())?,
                exit_start: required_time(exit_start.as_ref(), "--exit-start")?,
                exit_end: required_time(exit_end.as_ref(), "--exit-end")?,
                routine_holidays: Vec::new(),
            };

            windows::upsert_window_config(&pool.conn, &config)?;
            success(format!(
                "Window configuration for '{}' saved.",
                category.to_db_str()
            ));
            return Ok(());
        }

        if let Some(days) = routine {
            let cat = category
                .as_deref()
                .ok_or_else(|| AppError::Other("--routine requires --category".into()))?;
            let category = WindowCategory::from_db_str(&cat.to_lowercase());

            if category.is_shift() {
                return Err(AppError::Other(
                    "routine holidays apply to 'student' or 'staff' only; \
                     security days off come from the shift roster"
                        .into(),
                ));
            }

            let mut parsed = Vec::new();
            for day in days.split(',').filter(|s| !s.trim().is_empty()) {
                let weekday = weekday_from_name_id(day).ok_or_else(|| {
                    AppError::Other(format!(
                        "unknown weekday '{}' (use Senin..Minggu)",
                        day.trim()
                    ))
                })?;
                parsed.push(crate::utils::date::weekday_name_id(weekday).to_string());
            }

            windows::set_routine_holidays(&pool.conn, &category, &parsed)?;
            success(format!(
                "Routine holidays for '{}' set to [{}].",
                category.to_db_str(),
                parsed.join(", ")
            ));
            return Ok(());
        }

        if let Some(cat) = reset {
            let category = WindowCategory::from_db_str(&cat.to_lowercase());
            let n = windows::delete_window_config(&pool.conn, &category)?;
            if n > 0 {
                success(format!(
                    "Window configuration for '{}' removed.",
                    category.to_db_str()
                ));
            } else {
                warning(format!(
                    "No window configuration found for '{}'.",
                    category.to_db_str()
                ));
            }
            return Ok(());
        }

        if *show {
            let configs = windows::all_window_configs(&pool.conn)?;
            if configs.is_empty() {
                warning("No window configurations saved yet.");
                return Ok(());
            }

            let mut table = Table::new(
                [
                    "Category",
                    "Entry",
                    "Late cutoff",
                    "Exit",
                    "Routine holidays",
                ]
                .map(String::from)
                .to_vec(),
            );

            for c in configs {
                table.add_row(vec![
                    c.category.to_db_str().to_string(),
                    format!(
                        "{} - {}",
                        format_time_hm(c.entry_start),
                        format_time_hm(c.entry_end)
                    ),
                    c.late_cutoff
                        .map(format_time_hm)
                        .unwrap_or_else(|| "-".into()),
                    format!(
                        "{} - {}",
                        format_time_hm(c.exit_start),
                        format_time_hm(c.exit_end)
                    ),
                    if c.routine_holidays.is_empty() {
                        "-".into()
                    } else {
                        c.routine_holidays_str()
                    },
                ]);
            }

            println!("{}", table.render());
        }
    }

    Ok(())
}
