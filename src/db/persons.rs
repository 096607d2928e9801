use crate::errors::{AppError, AppResult};
use crate::models::person::{Person, Population};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Person> {
    let pop_str: String = row.get("population")?;
    let population = Population::from_db_str(&pop_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidPopulation(pop_str.clone())),
        )
    })?;

    Ok(Person {
        id: row.get("id")?,
        key: row.get("key")?,
        name: row.get("name")?,
        population,
        class_name: row.get("class_name")?,
        guardian_phone: row.get("guardian_phone")?,
    })
}

pub fn insert_person(conn: &Connection, person: &Person) -> AppResult<()> {
    conn.execute(
        "INSERT INTO persons (key, name, population, class_name, guardian_phone)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            person.key,
            person.name,
            person.population.to_db_str(),
            person.class_name,
            person.guardian_phone,
        ],
    )?;
    Ok(())
}

pub fn person_by_key(conn: &Connection, key: &str) -> AppResult<Option<Person>> {
    let mut stmt = conn.prepare("SELECT * FROM persons WHERE key = ?1")?;
    let person = stmt.query_row([key], map_row).optional()?;
    Ok(person)
}

/// Scope filter for roster queries: one population, optional class
/// (students) and name substring.
pub fn persons_in_scope(
    conn: &Connection,
    population: Option<Population>,
    class_name: Option<&str>,
    name_like: Option<&str>,
) -> AppResult<Vec<Person>> {
    let mut sql = String::from("SELECT * FROM persons WHERE 1=1");
    let mut args: Vec<String> = Vec::new();

    if let Some(pop) = population {
        args.push(pop.to_db_str().to_string());
        sql.push_str(&format!(" AND population = ?{}", args.len()));
    }
    if let Some(class) = class_name {
        args.push(class.to_string());
        sql.push_str(&format!(" AND class_name = ?{}", args.len()));
    }
    if let Some(name) = name_like {
        args.push(format!("%{}%", name));
        sql.push_str(&format!(" AND name LIKE ?{}", args.len()));
    }
    sql.push_str(" ORDER BY name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> =
        args.iter().map(|s| s as &dyn rusqlite::ToSql).collect();

    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All employee populations together (teacher + staff + security).
pub fn employees(conn: &Connection) -> AppResult<Vec<Person>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM persons WHERE population != 'student' ORDER BY name ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_by_population(conn: &Connection, population: Population) -> AppResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM persons WHERE population = ?1",
        [population.to_db_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_employees(conn: &Connection) -> AppResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM persons WHERE population != 'student'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
