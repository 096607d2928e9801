use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::persons;
use crate::errors::{AppError, AppResult};
use crate::models::person::{Person, Population};
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;
use std::path::Path;

fn parse_population(s: &str) -> AppResult<Population> {
    match s.to_lowercase().as_str() {
        "student" | "siswa" => Ok(Population::Student),
        "teacher" | "guru" => Ok(Population::Teacher),
        "staff" | "staf" => Ok(Population::Staff),
        "security" | "keamanan" => Ok(Population::Security),
        other => Err(AppError::InvalidPopulation(other.to_string())),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Person {
        add,
        list,
        import,
        key,
        name,
        population,
        class_name,
        phone,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;

        if *add {
            let key = key
                .clone()
                .ok_or_else(|| AppError::Other("--add requires --key".into()))?;
            let name = name
                .clone()
                .ok_or_else(|| AppError::Other("--add requires --name".into()))?;
            let population = parse_population(
                population
                    .as_deref()
                    .ok_or_else(|| AppError::Other("--add requires --population".into()))?,
            )?;

            let person = Person {
                id: 0,
                key: key.clone(),
                name,
                population,
                class_name: class_name.clone(),
                guardian_phone: phone.clone(),
            };

            persons::insert_person(&pool.conn, &person)?;
            success(format!("Added {} ({}).", person.name, key));
            return Ok(());
        }

        if let Some(file) = import {
            let (imported, skipped) = import_csv(&mut pool, Path::new(file))?;
            success(format!("Imported {} persons.", imported));
            for line in skipped {
                warning(line);
            }
            return Ok(());
        }

        if *list {
            let scope = match population.as_deref() {
                Some(p) => Some(parse_population(p)?),
                None => None,
            };

            let found =
                persons::persons_in_scope(&pool.conn, scope, class_name.as_deref(), None)?;

            let mut table = Table::new(
                ["Key", "Nama", "Populasi", "Kelas", "Telepon"]
                    .map(String::from)
                    .to_vec(),
            );
            for p in found {
                table.add_row(vec![
                    p.key.clone(),
                    p.name.clone(),
                    p.population.label().to_string(),
                    p.class_name.clone().unwrap_or_else(|| "-".into()),
                    p.guardian_phone.clone().unwrap_or_else(|| "-".into()),
                ]);
            }

            println!("{}", table.render());
        }
    }

    Ok(())
}

/// CSV import: header `key,name,population[,class][,phone]`.
/// Best-effort: invalid rows are skipped and reported.
fn import_csv(pool: &mut DbPool, path: &Path) -> AppResult<(usize, Vec<String>)> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::Other(format!("cannot read CSV: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::Other(format!("cannot read CSV header: {}", e)))?
        .clone();

    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let key_idx = col("key").ok_or_else(|| AppError::Other("CSV is missing 'key'".into()))?;
    let name_idx = col("name").ok_or_else(|| AppError::Other("CSV is missing 'name'".into()))?;
    let pop_idx =
        col("population").ok_or_else(|| AppError::Other("CSV is missing 'population'".into()))?;
    let class_idx = col("class");
    let phone_idx = col("phone");

    let mut imported = 0;
    let mut skipped = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                skipped.push(format!("invalid row: {}", e));
                continue;
            }
        };

        let cell = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        let key = cell(key_idx);
        if key.is_empty() {
            skipped.push("row with empty key skipped".to_string());
            continue;
        }

        let population = match parse_population(&cell(pop_idx)) {
            Ok(p) => p,
            Err(_) => {
                skipped.push(format!("{}: unknown population, skipped", key));
                continue;
            }
        };

        let opt = |idx: Option<usize>| {
            idx.map(|i| cell(i)).filter(|s| !s.is_empty())
        };

        let person = Person {
            id: 0,
            key: key.clone(),
            name: cell(name_idx),
            population,
            class_name: opt(class_idx),
            guardian_phone: opt(phone_idx),
        };

        match persons::insert_person(&pool.conn, &person) {
            Ok(()) => imported += 1,
            Err(e) => skipped.push(format!("{}: {}", key, e)),
        }
    }

    Ok((imported, skipped))
}
