use crate::cli::parser::{Cli, Commands, ReportShape};
use crate::config::Config;
use crate::core::report::{ReportTable, daily, dashboard, individual, matrix, range};
use crate::db::pool::DbPool;
use crate::db::persons;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, write_report};
use crate::models::person::{Person, Population};
use crate::ui::messages::warning;
use crate::utils::date::{parse_date, parse_month};
use crate::utils::path::expand_tilde;
use crate::utils::time::effective_now;
use rusqlite::Connection;

/// Resolve the report scope; `true` marks the student column set.
fn scope_persons(
    conn: &Connection,
    population: Option<&str>,
    role: Option<&str>,
    class_name: Option<&str>,
) -> AppResult<(Vec<Person>, bool)> {
    let student_scope = match population.map(|p| p.to_lowercase()).as_deref() {
        None | Some("student") | Some("siswa") => true,
        Some("employee") | Some("pegawai") => false,
        Some(other) => return Err(AppError::InvalidPopulation(other.to_string())),
    };

    if student_scope {
        let found = persons::persons_in_scope(conn, Some(Population::Student), class_name, None)?;
        return Ok((found, true));
    }

    let found = match role.map(|r| r.to_lowercase()) {
        None => persons::employees(conn)?,
        Some(r) => {
            let population = match r.as_str() {
                "teacher" | "guru" => Population::Teacher,
                "staff" | "staf" => Population::Staff,
                "security" | "keamanan" => Population::Security,
                other => return Err(AppError::InvalidPopulation(other.to_string())),
            };
            persons::persons_in_scope(conn, Some(population), None, None)?
        }
    };

    Ok((found, false))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        shape,
        population,
        role,
        class_name,
        date,
        month,
        start,
        end,
        person,
        format,
        file,
        force,
    } = &cli.command
    {
        let pool = DbPool::open(&cfg.database)?;
        let now = effective_now(cli.at.as_ref())?;

        let day = match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => now.date(),
        };

        let table: ReportTable = match shape {
            ReportShape::Daily => {
                let (scope, student_scope) = scope_persons(
                    &pool.conn,
                    population.as_deref(),
                    role.as_deref(),
                    class_name.as_deref(),
                )?;
                daily::daily_roster(&pool.conn, &scope, student_scope, day)?
            }

            ReportShape::Range => {
                let start_str = start
                    .as_ref()
                    .ok_or_else(|| AppError::Other("range shape requires --start".into()))?;
                let end_str = end
                    .as_ref()
                    .ok_or_else(|| AppError::Other("range shape requires --end".into()))?;
                let start = parse_date(start_str)
                    .ok_or_else(|| AppError::InvalidDate(start_str.clone()))?;
                let end =
                    parse_date(end_str).ok_or_else(|| AppError::InvalidDate(end_str.clone()))?;
                if end < start {
                    return Err(AppError::Other("--end must not precede --start".into()));
                }

                let (scope, student_scope) = scope_persons(
                    &pool.conn,
                    population.as_deref(),
                    role.as_deref(),
                    class_name.as_deref(),
                )?;
                range::range_detail(&pool.conn, &scope, student_scope, start, end)?
            }

            ReportShape::Monthly => {
                let month_str = month
                    .as_ref()
                    .ok_or_else(|| AppError::Other("monthly shape requires --month".into()))?;
                let (year, month_num) = parse_month(month_str)
                    .ok_or_else(|| AppError::InvalidDate(month_str.clone()))?;

                let (scope, student_scope) = scope_persons(
                    &pool.conn,
                    population.as_deref(),
                    role.as_deref(),
                    class_name.as_deref(),
                )?;
                matrix::monthly_matrix(&pool.conn, &scope, student_scope, year, month_num)?
            }

            ReportShape::Individual => {
                let key = person
                    .as_ref()
                    .ok_or_else(|| AppError::Other("individual shape requires --person".into()))?;
                let month_str = month
                    .as_ref()
                    .ok_or_else(|| AppError::Other("individual shape requires --month".into()))?;
                let (year, month_num) = parse_month(month_str)
                    .ok_or_else(|| AppError::InvalidDate(month_str.clone()))?;

                let subject = persons::person_by_key(&pool.conn, key)?
                    .ok_or_else(|| AppError::UnknownPerson(key.clone()))?;
                individual::individual_summary(&pool.conn, &subject, year, month_num)?
            }

            ReportShape::Dashboard => {
                let tally = dashboard::dashboard(&pool.conn, now, &cfg.fallback_late_cutoff)?;
                tally.to_table(now.date())
            }
        };

        if table.is_empty() {
            warning("No data matched the selected period and filters.");
            return Ok(());
        }

        match file {
            Some(path) => {
                let format = match format {
                    Some(f) => f.clone(),
                    None => match cfg.default_export_format.as_str() {
                        "json" => ExportFormat::Json,
                        "xlsx" => ExportFormat::Xlsx,
                        _ => ExportFormat::Csv,
                    },
                };
                write_report(&table, &format, &expand_tilde(path), *force)?;
            }
            None => println!("{}", table.render_terminal()),
        }
    }

    Ok(())
}
