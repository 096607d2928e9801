mod common;
use common::{d, dt, open_pool, seed_person, setup_test_db, t};
use presensi::core::ledger::{Ledger, ScanWrite};
use presensi::db::attendance;
use presensi::models::person::Population;
use presensi::models::status::{AttendanceStatus, EventKind};

#[test]
fn second_entry_scan_is_rejected() {
    let db = setup_test_db("ledger_dup_entry");
    let mut pool = open_pool(&db);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let mut ledger = Ledger::new(&mut pool);
    let day = d("2026-01-12");

    let first = ledger
        .record_scan(id, day, EventKind::Entry, AttendanceStatus::Present, t("06:45"), "")
        .unwrap();
    assert_eq!(first, ScanWrite::Accepted);

    // regardless of the status value the slot is taken
    let second = ledger
        .record_scan(id, day, EventKind::Entry, AttendanceStatus::Late, t("07:30"), "")
        .unwrap();
    assert_eq!(second, ScanWrite::DuplicateRejected);

    // the original record is preserved
    let events = ledger.get_day(id, day).unwrap();
    assert_eq!(events.entry.unwrap().time, t("06:45"));
}

#[test]
fn exit_slot_is_independent_of_entry_slot() {
    let db = setup_test_db("ledger_exit_slot");
    let mut pool = open_pool(&db);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let mut ledger = Ledger::new(&mut pool);
    let day = d("2026-01-12");

    ledger
        .record_scan(id, day, EventKind::Entry, AttendanceStatus::Present, t("06:45"), "")
        .unwrap();
    let exit = ledger
        .record_scan(id, day, EventKind::Exit, AttendanceStatus::Present, t("15:10"), "")
        .unwrap();
    assert_eq!(exit, ScanWrite::Accepted);

    let dup_exit = ledger
        .record_scan(id, day, EventKind::Exit, AttendanceStatus::Present, t("15:30"), "")
        .unwrap();
    assert_eq!(dup_exit, ScanWrite::DuplicateRejected);
}

#[test]
fn manual_record_occupies_both_slots() {
    let db = setup_test_db("ledger_manual_slots");
    let mut pool = open_pool(&db);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let mut ledger = Ledger::new(&mut pool);
    let day = d("2026-01-12");

    ledger
        .replace_day(id, day, AttendanceStatus::Sick, dt("2026-01-12 09:00:00"), "")
        .unwrap();

    // both scan kinds bounce off the manual record
    assert_eq!(
        ledger
            .record_scan(id, day, EventKind::Entry, AttendanceStatus::Present, t("06:45"), "")
            .unwrap(),
        ScanWrite::DuplicateRejected
    );
    assert_eq!(
        ledger
            .record_scan(id, day, EventKind::Exit, AttendanceStatus::Present, t("15:10"), "")
            .unwrap(),
        ScanWrite::DuplicateRejected
    );

    // and the resolved view fills both slots with the manual status
    let events = ledger.get_day(id, day).unwrap();
    assert_eq!(events.entry.as_ref().unwrap().kind, EventKind::Manual);
    assert_eq!(events.exit.as_ref().unwrap().kind, EventKind::Manual);
    assert_eq!(events.status(), AttendanceStatus::Sick);
}

#[test]
fn override_present_creates_entry_and_exit() {
    let db = setup_test_db("ledger_override_present");
    let mut pool = open_pool(&db);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let mut ledger = Ledger::new(&mut pool);
    let day = d("2026-01-12");

    ledger
        .replace_day(id, day, AttendanceStatus::Present, dt("2026-01-12 10:00:00"), "")
        .unwrap();

    let events = ledger.get_day(id, day).unwrap();
    let entry = events.entry.unwrap();
    let exit = events.exit.unwrap();
    assert_eq!(entry.kind, EventKind::Entry);
    assert_eq!(entry.status, AttendanceStatus::Present);
    assert_eq!(entry.time, t("10:00"));
    assert_eq!(exit.kind, EventKind::Exit);
    assert_eq!(exit.status, AttendanceStatus::Present);
}

#[test]
fn override_fully_supersedes_previous_override() {
    let db = setup_test_db("ledger_override_supersede");
    let mut pool = open_pool(&db);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let day = d("2026-01-12");
    {
        let mut ledger = Ledger::new(&mut pool);
        ledger
            .replace_day(id, day, AttendanceStatus::Sick, dt("2026-01-12 08:00:00"), "")
            .unwrap();
        ledger
            .replace_day(id, day, AttendanceStatus::Present, dt("2026-01-12 10:00:00"), "")
            .unwrap();
    }

    // the old manual record is gone from the ledger entirely
    let records = attendance::records_for_day(&pool.conn, id, day).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.status == AttendanceStatus::Present));
    assert!(records.iter().all(|r| r.kind != EventKind::Manual));
}

#[test]
fn override_late_creates_entry_only() {
    let db = setup_test_db("ledger_override_late");
    let mut pool = open_pool(&db);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let mut ledger = Ledger::new(&mut pool);
    let day = d("2026-01-12");

    ledger
        .replace_day(id, day, AttendanceStatus::Late, dt("2026-01-12 10:00:00"), "")
        .unwrap();

    let events = ledger.get_day(id, day).unwrap();
    assert_eq!(events.entry.unwrap().status, AttendanceStatus::Late);
    assert!(events.exit.is_none());
}

#[test]
fn bulk_override_continues_past_failures() {
    let db = setup_test_db("ledger_bulk");
    let mut pool = open_pool(&db);
    let a = seed_person(&pool, "1001", "Andi", Population::Student, None, None);
    let b = seed_person(&pool, "1002", "Budi", Population::Student, None, None);

    let mut ledger = Ledger::new(&mut pool);
    let day = d("2026-01-12");

    let batch = vec![(a, "1001".to_string()), (b, "1002".to_string())];
    let outcome = ledger
        .replace_day_bulk(&batch, day, AttendanceStatus::Excused, dt("2026-01-12 09:00:00"), "")
        .unwrap();

    assert_eq!(outcome.updated, 2);
    assert!(outcome.failures.is_empty());

    assert_eq!(
        ledger.get_day(a, day).unwrap().status(),
        AttendanceStatus::Excused
    );
    assert_eq!(
        ledger.get_day(b, day).unwrap().status(),
        AttendanceStatus::Excused
    );
}
