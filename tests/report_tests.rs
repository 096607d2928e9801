mod common;
use common::{
    d, dt, open_pool, seed_person, seed_shift1_window, seed_student_routine_weekend,
    seed_student_window, setup_test_db, t,
};
use presensi::core::ledger::Ledger;
use presensi::core::report::matrix::{PersonDaySummary, build_matrix};
use presensi::core::report::{daily, dashboard, individual, matrix, metrics, range};
use presensi::db::{persons, schedule, windows};
use presensi::models::person::Population;
use presensi::models::status::{AttendanceStatus, EventKind};
use presensi::utils::date::all_days_of_month;

// ---------------------------
// Metrics
// ---------------------------

#[test]
fn duration_formats_hours_and_minutes() {
    assert_eq!(
        metrics::duration(Some(t("10:00")), Some(t("15:30"))),
        "5 jam 30 menit"
    );
    assert_eq!(metrics::duration(Some(t("15:00")), Some(t("14:00"))), "Error");
    assert_eq!(metrics::duration(None, Some(t("14:00"))), "-");
    assert_eq!(metrics::duration(Some(t("10:00")), None), "-");
}

#[test]
fn lateness_formats_minutes_past_deadline() {
    assert_eq!(metrics::lateness(Some(t("08:15")), Some(t("08:00"))), "15 menit");
    assert_eq!(metrics::lateness(Some(t("07:55")), Some(t("08:00"))), "-");
    assert_eq!(metrics::lateness(Some(t("08:00")), Some(t("08:00"))), "-");
    assert_eq!(metrics::lateness(None, Some(t("08:00"))), "-");
    assert_eq!(metrics::lateness(Some(t("08:15")), None), "-");
}

// ---------------------------
// Matrix
// ---------------------------

#[test]
fn build_matrix_counts_sum_to_days_in_month() {
    let days = all_days_of_month(2026, 1); // 31 days
    let cells: Vec<String> = days
        .iter()
        .enumerate()
        .map(|(i, _)| match i % 5 {
            0 => "H",
            1 => "S",
            2 => "I",
            3 => "A",
            _ => "-",
        }
        .to_string())
        .collect();
    let dash_cells = cells.iter().filter(|c| c.as_str() == "-").count();

    let table = build_matrix(
        "Laporan".to_string(),
        true,
        &days,
        vec![PersonDaySummary {
            key: "1001".into(),
            name: "Andi".into(),
            group: "7A".into(),
            cells,
        }],
    );

    let row = &table.rows[0];
    // trailing columns: Hadir, Sakit, Izin, Alfa
    let n = row.len();
    let counted: usize = row[n - 4..]
        .iter()
        .map(|v| v.parse::<usize>().unwrap())
        .sum();
    assert_eq!(counted + dash_cells, days.len());
}

#[test]
fn monthly_matrix_marks_holidays_and_counts_letters() {
    let db = setup_test_db("report_matrix");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, Some("7A"), None);

    {
        let mut ledger = Ledger::new(&mut pool);
        // Monday 2026-01-12: on-time; Tuesday: late; Wednesday: sick
        ledger
            .record_scan(id, d("2026-01-12"), EventKind::Entry, AttendanceStatus::Present, t("06:45"), "")
            .unwrap();
        ledger
            .record_scan(id, d("2026-01-13"), EventKind::Entry, AttendanceStatus::Late, t("07:30"), "")
            .unwrap();
        ledger
            .replace_day(id, d("2026-01-14"), AttendanceStatus::Sick, dt("2026-01-14 08:00:00"), "")
            .unwrap();
    }

    let scope = persons::persons_in_scope(&pool.conn, Some(Population::Student), None, None).unwrap();
    let table = matrix::monthly_matrix(&pool.conn, &scope, true, 2026, 1).unwrap();

    let row = &table.rows[0];
    // leading columns: NIS, Nama, Kelas; day 1 sits at index 3
    let day_cell = |day: usize| row[2 + day].as_str();

    assert_eq!(day_cell(10), "-"); // Saturday
    assert_eq!(day_cell(11), "-"); // Sunday
    assert_eq!(day_cell(12), "H");
    assert_eq!(day_cell(13), "H"); // Terlambat counts as H
    assert_eq!(day_cell(14), "S");
    assert_eq!(day_cell(15), "A");

    // 31 days, 9 weekend cells in January 2026 (Sat: 3,10,17,24,31; Sun: 4,11,18,25)
    let n = row.len();
    let hadir: usize = row[n - 4].parse().unwrap();
    let sakit: usize = row[n - 3].parse().unwrap();
    let izin: usize = row[n - 2].parse().unwrap();
    let alfa: usize = row[n - 1].parse().unwrap();
    assert_eq!(hadir, 2);
    assert_eq!(sakit, 1);
    assert_eq!(izin, 0);
    assert_eq!(hadir + sakit + izin + alfa + 9, 31);
}

#[test]
fn monthly_matrix_security_uses_roster_not_holidays() {
    let db = setup_test_db("report_matrix_security");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    seed_shift1_window(&pool);
    let guard = seed_person(&pool, "2001", "Candra", Population::Security, None, None);

    // Sunday 2026-01-11 on duty, Monday 2026-01-12 Off
    schedule::insert_assignment(&pool.conn, guard, d("2026-01-11"), "shift1").unwrap();
    schedule::insert_assignment(&pool.conn, guard, d("2026-01-12"), "Off").unwrap();

    {
        let mut ledger = Ledger::new(&mut pool);
        ledger
            .record_scan(guard, d("2026-01-11"), EventKind::Entry, AttendanceStatus::Present, t("06:10"), "")
            .unwrap();
    }

    let scope = persons::persons_in_scope(&pool.conn, Some(Population::Security), None, None).unwrap();
    let table = matrix::monthly_matrix(&pool.conn, &scope, false, 2026, 1).unwrap();

    let row = &table.rows[0];
    let day_cell = |day: usize| row[2 + day].as_str();

    assert_eq!(day_cell(11), "H"); // Sunday on duty, no routine-holiday check
    assert_eq!(day_cell(12), "-"); // Off
    assert_eq!(day_cell(1), "-"); // unscheduled day renders as Off
}

// ---------------------------
// Row-per-day shapes
// ---------------------------

#[test]
fn range_detail_renders_libur_and_excludes_it_from_tallies() {
    let db = setup_test_db("report_range");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, Some("7A"), None);

    {
        let mut ledger = Ledger::new(&mut pool);
        ledger
            .record_scan(id, d("2026-01-12"), EventKind::Entry, AttendanceStatus::Late, t("08:15"), "")
            .unwrap();
        ledger
            .record_scan(id, d("2026-01-12"), EventKind::Exit, AttendanceStatus::Present, t("15:30"), "")
            .unwrap();
    }

    let scope = persons::persons_in_scope(&pool.conn, Some(Population::Student), None, None).unwrap();
    // Saturday through Monday
    let table = range::range_detail(&pool.conn, &scope, true, d("2026-01-10"), d("2026-01-12")).unwrap();

    assert_eq!(table.rows.len(), 3);

    // Saturday renders Libur with every metric short-circuited
    let saturday = &table.rows[0];
    assert_eq!(saturday[4], "Libur");
    assert_eq!(saturday[5], "-");
    assert_eq!(saturday[7], "-");

    // Monday: Terlambat renders as Hadir, lateness from the 08:00 cutoff
    let monday = &table.rows[2];
    assert_eq!(monday[4], "Hadir");
    assert_eq!(monday[5], "08:15:00");
    assert_eq!(monday[6], "15:30:00");
    assert_eq!(monday[7], "15 menit");
    assert_eq!(monday[8], "7 jam 15 menit");
}

#[test]
fn daily_roster_defaults_to_alfa_without_records() {
    let db = setup_test_db("report_daily");
    let pool = open_pool(&db);
    seed_student_window(&pool);
    seed_person(&pool, "1001", "Andi", Population::Student, Some("7A"), None);
    seed_person(&pool, "1002", "Budi", Population::Student, Some("7A"), None);

    let scope = persons::persons_in_scope(&pool.conn, Some(Population::Student), None, None).unwrap();
    let table = daily::daily_roster(&pool.conn, &scope, true, d("2026-01-12")).unwrap();

    assert_eq!(table.rows.len(), 2);
    for row in &table.rows {
        assert_eq!(row[3], "Alfa");
        assert_eq!(row[4], "-");
    }
}

#[test]
fn individual_summary_appends_totals_after_blank_row() {
    let db = setup_test_db("report_individual");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    seed_student_routine_weekend(&pool);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, Some("7A"), None);

    {
        let mut ledger = Ledger::new(&mut pool);
        ledger
            .record_scan(id, d("2026-01-12"), EventKind::Entry, AttendanceStatus::Present, t("06:45"), "")
            .unwrap();
        ledger
            .record_scan(id, d("2026-01-12"), EventKind::Exit, AttendanceStatus::Present, t("15:10"), "")
            .unwrap();
        ledger
            .replace_day(id, d("2026-01-13"), AttendanceStatus::Excused, dt("2026-01-13 08:00:00"), "")
            .unwrap();
    }

    let person = persons::person_by_key(&pool.conn, "1001").unwrap().unwrap();
    let table = individual::individual_summary(&pool.conn, &person, 2026, 1).unwrap();

    // 31 day rows + blank + 4 totals
    assert_eq!(table.rows.len(), 36);
    assert!(table.rows[31].iter().all(|c| c.is_empty()));

    let total = |idx: usize| table.rows[32 + idx].clone();
    assert_eq!(total(0)[0], "Total Hadir");
    assert_eq!(total(0)[1], "1");
    assert_eq!(total(1)[0], "Total Sakit");
    assert_eq!(total(1)[1], "0");
    assert_eq!(total(2)[0], "Total Izin");
    assert_eq!(total(2)[1], "1");
    assert_eq!(total(3)[0], "Total Alfa");
    // 31 days - 9 weekend - 1 hadir - 1 izin = 20
    assert_eq!(total(3)[1], "20");
}

// ---------------------------
// Dashboard
// ---------------------------

#[test]
fn dashboard_suppresses_absent_while_day_in_progress() {
    let db = setup_test_db("report_dashboard");
    let mut pool = open_pool(&db);
    seed_student_window(&pool);
    let id = seed_person(&pool, "1001", "Andi", Population::Student, None, None);
    seed_person(&pool, "1002", "Budi", Population::Student, None, None);

    {
        let mut ledger = Ledger::new(&mut pool);
        ledger
            .record_scan(id, d("2026-01-12"), EventKind::Entry, AttendanceStatus::Present, t("06:45"), "")
            .unwrap();
    }

    // before the 08:00 cutoff the day is in progress: Alfa suppressed
    let early = dashboard::dashboard(&pool.conn, dt("2026-01-12 07:30:00"), "08:00").unwrap();
    assert!(!early.day_closed);
    assert_eq!(early.students.present, 1);
    assert_eq!(early.students.absent, 0);

    // past the cutoff the unrecorded student counts as Alfa
    let late = dashboard::dashboard(&pool.conn, dt("2026-01-12 08:30:00"), "08:00").unwrap();
    assert!(late.day_closed);
    assert_eq!(late.students.present, 1);
    assert_eq!(late.students.absent, 1);
}

#[test]
fn dashboard_falls_back_to_eight_when_cutoff_unset() {
    let db = setup_test_db("report_dashboard_fallback");
    let pool = open_pool(&db);
    let mut cfg = common::student_window();
    cfg.late_cutoff = None;
    windows::upsert_window_config(&pool.conn, &cfg).unwrap();
    seed_person(&pool, "1001", "Andi", Population::Student, None, None);

    let early = dashboard::dashboard(&pool.conn, dt("2026-01-12 07:59:00"), "08:00").unwrap();
    assert!(!early.day_closed);
    assert_eq!(early.students.absent, 0);

    let late = dashboard::dashboard(&pool.conn, dt("2026-01-12 08:01:00"), "08:00").unwrap();
    assert!(late.day_closed);
    assert_eq!(late.students.absent, 1);
}
