//! Derived report metrics: lateness minutes and day duration.

use chrono::NaiveTime;

/// Lateness in whole minutes past the deadline, formatted "N menit".
/// "-" when either operand is missing or the entry is not late.
pub fn lateness(entry: Option<NaiveTime>, deadline: Option<NaiveTime>) -> String {
    let (entry, deadline) = match (entry, deadline) {
        (Some(e), Some(d)) => (e, d),
        _ => return "-".to_string(),
    };

    let late_seconds = (entry - deadline).num_seconds();
    if late_seconds > 0 {
        format!("{} menit", late_seconds / 60)
    } else {
        "-".to_string()
    }
}

/// Total duration between entry and exit, formatted "J jam M menit".
/// "Error" when the exit precedes the entry; "-" when either is missing.
pub fn duration(entry: Option<NaiveTime>, exit: Option<NaiveTime>) -> String {
    let (entry, exit) = match (entry, exit) {
        (Some(e), Some(x)) => (e, x),
        _ => return "-".to_string(),
    };

    let total_seconds = (exit - entry).num_seconds();
    if total_seconds < 0 {
        return "Error".to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    format!("{} jam {} menit", hours, minutes)
}
