mod common;
use common::{open_pool, presensi, seed_person, seed_student_window, setup_test_db};
use predicates::prelude::*;
use presensi::models::person::Population;

#[test]
fn init_creates_the_database() {
    let db_path = setup_test_db("cli_init");

    presensi()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn scan_inside_entry_window_is_accepted() {
    let db_path = setup_test_db("cli_scan_ok");
    {
        let pool = open_pool(&db_path);
        seed_student_window(&pool);
        seed_person(&pool, "1001", "Andi", Population::Student, None, None);
    }

    presensi()
        .args([
            "--db",
            &db_path,
            "--at",
            "2026-01-12 06:45:00",
            "scan",
            "s1001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("recorded"));
}

#[test]
fn duplicate_scan_is_reported() {
    let db_path = setup_test_db("cli_scan_dup");
    {
        let pool = open_pool(&db_path);
        seed_student_window(&pool);
        seed_person(&pool, "1001", "Andi", Population::Student, None, None);
    }

    presensi()
        .args([
            "--db",
            &db_path,
            "--at",
            "2026-01-12 06:45:00",
            "scan",
            "s1001",
        ])
        .assert()
        .success();

    presensi()
        .args([
            "--db",
            &db_path,
            "--at",
            "2026-01-12 06:50:00",
            "scan",
            "s1001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan rejected"));
}

#[test]
fn out_of_window_scan_is_reported() {
    let db_path = setup_test_db("cli_scan_oow");
    {
        let pool = open_pool(&db_path);
        seed_student_window(&pool);
        seed_person(&pool, "1001", "Andi", Population::Student, None, None);
    }

    presensi()
        .args([
            "--db",
            &db_path,
            "--at",
            "2026-01-12 12:00:00",
            "scan",
            "s1001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("not a valid attendance time"));
}

#[test]
fn invalid_tag_is_reported() {
    let db_path = setup_test_db("cli_scan_badtag");
    {
        let pool = open_pool(&db_path);
        seed_student_window(&pool);
    }

    presensi()
        .args(["--db", &db_path, "--at", "2026-01-12 06:45:00", "scan", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan rejected"));
}

#[test]
fn override_then_report_shows_present() {
    let db_path = setup_test_db("cli_override");
    {
        let pool = open_pool(&db_path);
        seed_student_window(&pool);
        seed_person(&pool, "1001", "Andi", Population::Student, None, None);
    }

    presensi()
        .args([
            "--db",
            &db_path,
            "--at",
            "2026-01-12 10:00:00",
            "override",
            "--person",
            "1001",
            "--status",
            "Hadir",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 1 person(s)"));

    presensi()
        .args([
            "--db",
            &db_path,
            "report",
            "--shape",
            "daily",
            "--date",
            "2026-01-12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Andi").and(predicate::str::contains("Hadir")));
}

#[test]
fn leave_approval_lands_in_the_ledger() {
    let db_path = setup_test_db("cli_leave");
    {
        let pool = open_pool(&db_path);
        seed_student_window(&pool);
        seed_person(&pool, "1001", "Andi", Population::Student, None, None);
    }

    presensi()
        .args([
            "--db",
            &db_path,
            "--at",
            "2026-01-12 06:00:00",
            "leave",
            "--submit",
            "--person",
            "1001",
            "--kind",
            "Sakit",
            "--note",
            "demam",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("submitted"));

    presensi()
        .args([
            "--db",
            &db_path,
            "--at",
            "2026-01-12 07:00:00",
            "leave",
            "--approve",
            "1",
            "--for-date",
            "2026-01-12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("approved"));

    presensi()
        .args([
            "--db",
            &db_path,
            "report",
            "--shape",
            "daily",
            "--date",
            "2026-01-12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sakit"));
}
