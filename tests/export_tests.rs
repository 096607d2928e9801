mod common;
use common::{d, open_pool, presensi, seed_person, seed_student_window, setup_test_db, t, temp_out};
use presensi::core::ledger::Ledger;
use presensi::core::report::daily;
use presensi::db::persons;
use presensi::export::{ExportFormat, write_report};
use presensi::models::person::Population;
use presensi::models::status::{AttendanceStatus, EventKind};
use std::fs;
use std::path::Path;

fn seed_one_day(db_path: &str) {
    let mut pool = open_pool(db_path);
    seed_student_window(&pool);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, Some("7A"), None);
    let mut ledger = Ledger::new(&mut pool);
    ledger
        .record_scan(id, d("2026-01-12"), EventKind::Entry, AttendanceStatus::Present, t("06:45"), "")
        .unwrap();
    ledger
        .record_scan(id, d("2026-01-12"), EventKind::Exit, AttendanceStatus::Present, t("15:10"), "")
        .unwrap();
}

#[test]
fn export_daily_report_csv_via_cli() {
    let db_path = setup_test_db("export_cli_csv");
    seed_one_day(&db_path);
    let out = temp_out("export_cli_csv", "csv");

    presensi()
        .args([
            "--db",
            &db_path,
            "report",
            "--shape",
            "daily",
            "--date",
            "2026-01-12",
            "--format",
            "csv",
            "--file",
            &out,
            "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("NIS"));
    assert!(content.contains("Andi"));
    assert!(content.contains("Hadir"));
    assert!(content.contains("06:45:00"));
}

#[test]
fn export_monthly_matrix_csv_via_cli() {
    let db_path = setup_test_db("export_cli_matrix");
    seed_one_day(&db_path);
    let out = temp_out("export_cli_matrix", "csv");

    presensi()
        .args([
            "--db",
            &db_path,
            "report",
            "--shape",
            "monthly",
            "--month",
            "2026-01",
            "--format",
            "csv",
            "--file",
            &out,
            "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let header = content.lines().next().expect("header line");
    assert!(header.starts_with("NIS,Nama,Kelas,1,2,"));
    assert!(header.ends_with("Hadir,Sakit,Izin,Alfa"));
    assert!(content.contains("Andi"));
}

#[test]
fn export_json_objects_per_row() {
    let db_path = setup_test_db("export_json");
    seed_one_day(&db_path);
    let out = temp_out("export_json", "json");

    {
        let pool = open_pool(&db_path);
        let scope =
            persons::persons_in_scope(&pool.conn, Some(Population::Student), None, None).unwrap();
        let table = daily::daily_roster(&pool.conn, &scope, true, d("2026-01-12")).unwrap();
        write_report(&table, &ExportFormat::Json, Path::new(&out), true).unwrap();
    }

    let content = fs::read_to_string(&out).expect("read exported json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = parsed.as_array().expect("array of rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Nama"], "Andi");
    assert_eq!(rows[0]["Status"], "Hadir");
}

#[test]
fn export_xlsx_writes_a_workbook() {
    let db_path = setup_test_db("export_xlsx");
    seed_one_day(&db_path);
    let out = temp_out("export_xlsx", "xlsx");

    {
        let pool = open_pool(&db_path);
        let scope =
            persons::persons_in_scope(&pool.conn, Some(Population::Student), None, None).unwrap();
        let table = daily::daily_roster(&pool.conn, &scope, true, d("2026-01-12")).unwrap();
        write_report(&table, &ExportFormat::Xlsx, Path::new(&out), true).unwrap();
    }

    let metadata = fs::metadata(&out).expect("xlsx written");
    assert!(metadata.len() > 0);
}

#[test]
fn individual_export_includes_summary_rows() {
    let db_path = setup_test_db("export_individual");
    seed_one_day(&db_path);
    let out = temp_out("export_individual", "csv");

    presensi()
        .args([
            "--db",
            &db_path,
            "report",
            "--shape",
            "individual",
            "--person",
            "1001",
            "--month",
            "2026-01",
            "--format",
            "csv",
            "--file",
            &out,
            "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Total Hadir"));
    assert!(content.contains("Total Alfa"));
}
