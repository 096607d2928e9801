#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use presensi::db::pool::DbPool;
use presensi::db::{persons, windows};
use presensi::models::person::{Person, Population};
use presensi::models::window::{WindowCategory, WindowConfig};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn presensi() -> Command {
    cargo_bin_cmd!("presensi")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_presensi.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Open the database, creating the schema when missing.
pub fn open_pool(db_path: &str) -> DbPool {
    DbPool::open(db_path).expect("open db")
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .expect("time")
}

pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("datetime")
}

pub fn seed_person(
    pool: &DbPool,
    key: &str,
    name: &str,
    population: Population,
    class_name: Option<&str>,
    phone: Option<&str>,
) -> i64 {
    let person = Person {
        id: 0,
        key: key.to_string(),
        name: name.to_string(),
        population,
        class_name: class_name.map(String::from),
        guardian_phone: phone.map(String::from),
    };
    persons::insert_person(&pool.conn, &person).expect("insert person");
    persons::person_by_key(&pool.conn, key)
        .expect("lookup")
        .expect("person exists")
        .id
}

/// Student windows used across tests:
/// entry 06:30-07:00, late cutoff 08:00, exit 15:00-16:00.
pub fn student_window() -> WindowConfig {
    WindowConfig {
        category: WindowCategory::Student,
        entry_start: t("06:30"),
        entry_end: t("07:00"),
        late_cutoff: Some(t("08:00")),
        exit_start: t("15:00"),
        exit_end: t("16:00"),
        routine_holidays: Vec::new(),
    }
}

pub fn seed_student_window(pool: &DbPool) {
    windows::upsert_window_config(&pool.conn, &student_window()).expect("save student window");
}

pub fn seed_student_routine_weekend(pool: &DbPool) {
    windows::set_routine_holidays(
        &pool.conn,
        &WindowCategory::Student,
        &["Sabtu".to_string(), "Minggu".to_string()],
    )
    .expect("save routine holidays");
}

/// shift1 windows: entry 06:00-06:30 (no cutoff), exit 14:00-15:00.
pub fn shift1_window() -> WindowConfig {
    WindowConfig {
        category: WindowCategory::Shift("shift1".to_string()),
        entry_start: t("06:00"),
        entry_end: t("06:30"),
        late_cutoff: None,
        exit_start: t("14:00"),
        exit_end: t("15:00"),
        routine_holidays: Vec::new(),
    }
}

pub fn seed_shift1_window(pool: &DbPool) {
    windows::upsert_window_config(&pool.conn, &shift1_window()).expect("save shift window");
}
