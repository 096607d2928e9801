//! Attendance classifier: a single linear scan over three disjoint
//! time-of-day bands, evaluated once per scan.

use crate::models::status::{AttendanceStatus, EventKind};
use crate::models::window::WindowConfig;
use chrono::{Duration, NaiveDateTime};

/// Classify a scan timestamp against a window configuration.
///
/// A fixed +1-minute grace is applied to the upper bound of the entry and
/// late bands to absorb clock rounding. Exit events never carry a Late
/// status. `None` means the scan falls outside every configured band.
pub fn classify(config: &WindowConfig, now: NaiveDateTime) -> Option<(EventKind, AttendanceStatus)> {
    let day = now.date();
    let grace = Duration::minutes(1);

    let entry_start = day.and_time(config.entry_start);
    let entry_end_plus = day.and_time(config.entry_end) + grace;
    let late_end_plus = config.late_cutoff.map(|t| day.and_time(t) + grace);
    let exit_start = day.and_time(config.exit_start);
    let exit_end = day.and_time(config.exit_end);

    if entry_start <= now && now <= entry_end_plus {
        return Some((EventKind::Entry, AttendanceStatus::Present));
    }

    if let Some(late_end) = late_end_plus
        && entry_end_plus < now
        && now <= late_end
    {
        return Some((EventKind::Entry, AttendanceStatus::Late));
    }

    if exit_start <= now && now <= exit_end {
        return Some((EventKind::Exit, AttendanceStatus::Present));
    }

    None
}
