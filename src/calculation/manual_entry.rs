//! Manual attendance entry construction.
//!
//! Manual entries bypass the scan state machine entirely: the operator
//! supplies both sides of the day and the record is written complete, with
//! status present and the manual flag set. No lateness or half-day
//! derivation applies, and an existing record for the same employee and day
//! does not prevent the entry; the roster views show both.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::AttendanceSettings;
use crate::models::{AttendanceRecord, AttendanceStatus};

use super::work_session::{duration_hours, round_two};

/// Builds a complete manual attendance record for the given day.
///
/// Hours are the in-to-out interval rounded to 2 decimal places; overtime is
/// the rounded excess over the overtime threshold, floored at zero. The
/// interval is taken as given: an out time before the in time yields
/// negative hours rather than an error.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::manual_entry;
/// use attend_engine::config::AttendanceSettings;
/// use attend_engine::models::AttendanceStatus;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let record = manual_entry(
///     Uuid::new_v4(),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     &AttendanceSettings::default(),
/// );
/// assert_eq!(record.status, AttendanceStatus::Present);
/// assert_eq!(record.hours_worked, Decimal::new(9, 0));
/// assert!(record.manual);
/// ```
pub fn manual_entry(
    employee_id: Uuid,
    date: NaiveDate,
    in_time: NaiveTime,
    out_time: NaiveTime,
    settings: &AttendanceSettings,
) -> AttendanceRecord {
    let clock_in = date.and_time(in_time);
    let clock_out = date.and_time(out_time);
    let raw_hours = duration_hours(clock_in, clock_out);
    let overtime = round_two(raw_hours - settings.overtime_after_hours).max(Decimal::ZERO);

    AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id,
        date,
        in_time: Some(clock_in),
        out_time: Some(clock_out),
        status: AttendanceStatus::Present,
        hours_worked: round_two(raw_hours),
        overtime_hours: overtime,
        manual: true,
    }
}
