mod common;
use common::{
    d, dt, open_pool, seed_person, seed_shift1_window, seed_student_routine_weekend,
    seed_student_window, setup_test_db,
};
use presensi::core::calendar::{CalendarResolver, NonAttendance};
use presensi::core::scan::{self, ScanOutcome};
use presensi::core::windows::{SettingsSnapshot, ShiftRoster};
use presensi::db::{schedule, windows};
use presensi::models::person::Population;

#[test]
fn saturday_routine_holiday_blocks_students() {
    let db = setup_test_db("cal_routine_sat");
    let pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    // 2026-01-10 is a Saturday
    let snapshot = SettingsSnapshot::load_for_day(&pool.conn, d("2026-01-10")).unwrap();
    let roster = ShiftRoster::default();
    let resolver = CalendarResolver::new(&snapshot, &roster);

    assert_eq!(
        resolver.non_attendance(Population::Student, id, d("2026-01-10")),
        Some(NonAttendance::Routine("Sabtu".to_string()))
    );
    assert_eq!(
        resolver.non_attendance(Population::Student, id, d("2026-01-12")),
        None
    );
}

#[test]
fn special_holiday_takes_display_precedence() {
    let db = setup_test_db("cal_special");
    let pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    windows::insert_special_holiday(&pool.conn, d("2026-01-10"), "Hari Raya").unwrap();
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let snapshot = SettingsSnapshot::load_for_day(&pool.conn, d("2026-01-10")).unwrap();
    let roster = ShiftRoster::default();
    let resolver = CalendarResolver::new(&snapshot, &roster);

    // the special description wins over the routine weekday
    assert_eq!(
        resolver.non_attendance(Population::Student, id, d("2026-01-10")),
        Some(NonAttendance::Special("Hari Raya".to_string()))
    );
}

#[test]
fn scan_on_routine_holiday_is_rejected_without_a_record() {
    let db = setup_test_db("cal_scan_holiday");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    // Saturday, inside the entry window
    let outcome = scan::process(&mut pool, "s1001", dt("2026-01-10 06:45:00")).unwrap();
    match outcome {
        ScanOutcome::Rejected { reason } => assert!(reason.contains("routine holiday")),
        other => panic!("expected rejection, got {:?}", other),
    }

    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn security_ignores_holidays_and_follows_the_roster() {
    let db = setup_test_db("cal_security");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    seed_shift1_window(&pool);
    let guard = seed_person(&pool, "2001", "Candra", Population::Security, None, None);

    // 2026-01-11 is a Sunday: routine for students, irrelevant for security
    schedule::insert_assignment(&pool.conn, guard, d("2026-01-11"), "shift1").unwrap();

    let outcome = scan::process(&mut pool, "p2001", dt("2026-01-11 06:15:00")).unwrap();
    match outcome {
        ScanOutcome::Accepted { kind, status, .. } => {
            assert!(kind.is_entry());
            assert_eq!(status.to_db_str(), "Hadir");
        }
        other => panic!("expected acceptance, got {:?}", other),
    }
}

#[test]
fn security_off_day_rejects_the_scan() {
    let db = setup_test_db("cal_security_off");
    let mut pool = open_pool(&db);
    seed_shift1_window(&pool);
    let guard = seed_person(&pool, "2001", "Candra", Population::Security, None, None);

    schedule::insert_assignment(&pool.conn, guard, d("2026-01-12"), "Off").unwrap();

    let outcome = scan::process(&mut pool, "p2001", dt("2026-01-12 06:15:00")).unwrap();
    match outcome {
        ScanOutcome::Rejected { reason } => assert!(reason.contains("Off")),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn unscheduled_security_day_counts_as_off() {
    let db = setup_test_db("cal_security_unscheduled");
    let mut pool = open_pool(&db);
    seed_shift1_window(&pool);
    seed_person(&pool, "2001", "Candra", Population::Security, None, None);

    let outcome = scan::process(&mut pool, "p2001", dt("2026-01-12 06:15:00")).unwrap();
    assert!(matches!(outcome, ScanOutcome::Rejected { .. }));
}

#[test]
fn missing_window_config_is_terminal_not_a_default() {
    let db = setup_test_db("cal_missing_config");
    let mut pool = open_pool(&db);
    // person exists, but no student window was ever configured
    seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let outcome = scan::process(&mut pool, "s1001", dt("2026-01-12 06:45:00")).unwrap();
    assert!(matches!(outcome, ScanOutcome::ConfigMissing { .. }));
}

#[test]
fn unknown_person_is_rejected() {
    let db = setup_test_db("cal_unknown");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);

    let outcome = scan::process(&mut pool, "s9999", dt("2026-01-12 06:45:00")).unwrap();
    match outcome {
        ScanOutcome::Rejected { reason } => assert!(reason.contains("9999")),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn out_of_window_scan_is_rejected() {
    let db = setup_test_db("cal_out_of_window");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let outcome = scan::process(&mut pool, "s1001", dt("2026-01-12 12:00:00")).unwrap();
    match outcome {
        ScanOutcome::Rejected { reason } => {
            assert!(reason.contains("not a valid attendance time"))
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}
