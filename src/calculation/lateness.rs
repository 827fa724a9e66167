//! Lateness determination for clock-in scans.
//!
//! A clock-in is late when it lands strictly after the grace deadline:
//! shift start plus the configured grace period. Lateness is decided once,
//! at clock-in, and never revisited by later events on the same day.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::AttendanceSettings;
use crate::models::Employee;

/// The instant after which a clock-in on `day` counts as late.
///
/// Minute arithmetic carries into the next hour (and day) naturally, so a
/// 09:50 shift start with a 15-minute grace yields a 10:05 deadline.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::grace_deadline;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let start = NaiveTime::from_hms_opt(9, 50, 0).unwrap();
/// let deadline = grace_deadline(day, start, 15);
/// assert_eq!(deadline, day.and_hms_opt(10, 5, 0).unwrap());
/// ```
pub fn grace_deadline(day: NaiveDate, shift_start: NaiveTime, grace_minutes: u32) -> NaiveDateTime {
    day.and_time(shift_start) + Duration::minutes(i64::from(grace_minutes))
}

/// Returns true if a clock-in at `now` is late for the given day and shift.
///
/// The comparison is strict: a scan exactly at the deadline is on time.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::is_late;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
///
/// assert!(is_late(day.and_hms_opt(9, 20, 0).unwrap(), day, start, 15));
/// assert!(!is_late(day.and_hms_opt(9, 10, 0).unwrap(), day, start, 15));
/// assert!(!is_late(day.and_hms_opt(9, 15, 0).unwrap(), day, start, 15));
/// ```
pub fn is_late(
    now: NaiveDateTime,
    day: NaiveDate,
    shift_start: NaiveTime,
    grace_minutes: u32,
) -> bool {
    now > grace_deadline(day, shift_start, grace_minutes)
}

/// Resolves the shift start that applies to an employee.
///
/// The per-employee override wins when present; otherwise the configured
/// default applies. The grace period is always taken from settings.
pub fn effective_shift_start(employee: &Employee, settings: &AttendanceSettings) -> NaiveTime {
    employee.shift_start.unwrap_or(settings.shift_start)
}
