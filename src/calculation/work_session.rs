//! Clock-out derivations: worked hours, overtime split, and day status.
//!
//! All figures are derived from the raw in/out interval and only rounded to
//! two decimal places at the end, so the overtime split never drifts from
//! the hours it was computed against.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::AttendanceSettings;
use crate::models::AttendanceStatus;

/// The figures a clock-out writes back onto the day's record.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTotals {
    /// Hours between clock-in and clock-out, rounded to 2 decimal places.
    pub hours_worked: Decimal,
    /// Hours beyond the overtime threshold, rounded to 2 decimal places.
    pub overtime_hours: Decimal,
    /// The final status for the day.
    pub status: AttendanceStatus,
}

/// Rounds to two decimal places, midpoints away from zero.
pub(crate) fn round_two(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fractional hours between two timestamps, at second precision.
pub(crate) fn duration_hours(from: NaiveDateTime, to: NaiveDateTime) -> Decimal {
    let seconds = to.signed_duration_since(from).num_seconds();
    Decimal::from(seconds) / Decimal::from(3600)
}

/// Derives the closing figures for a day from its in/out interval.
///
/// Status resolution, in order:
/// 1. A day shorter than the half-day threshold is a half day, regardless
///    of how the morning started.
/// 2. Otherwise a late clock-in stays late.
/// 3. Otherwise the day is present.
///
/// Overtime is the excess over `overtime_after_hours`, floored at zero.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::close_session;
/// use attend_engine::config::AttendanceSettings;
/// use attend_engine::models::AttendanceStatus;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let totals = close_session(
///     day.and_hms_opt(8, 30, 0).unwrap(),
///     day.and_hms_opt(19, 0, 0).unwrap(),
///     AttendanceStatus::Present,
///     &AttendanceSettings::default(),
/// );
/// assert_eq!(totals.hours_worked, Decimal::new(1050, 2)); // 10.50
/// assert_eq!(totals.overtime_hours, Decimal::new(150, 2)); // 1.50
/// assert_eq!(totals.status, AttendanceStatus::Present);
/// ```
pub fn close_session(
    in_time: NaiveDateTime,
    out_time: NaiveDateTime,
    status_at_clock_in: AttendanceStatus,
    settings: &AttendanceSettings,
) -> SessionTotals {
    let raw_hours = duration_hours(in_time, out_time);
    let raw_overtime = (raw_hours - settings.overtime_after_hours).max(Decimal::ZERO);

    let status = if raw_hours < settings.half_day_hours {
        AttendanceStatus::HalfDay
    } else if status_at_clock_in == AttendanceStatus::Late {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    };

    SessionTotals {
        hours_worked: round_two(raw_hours),
        overtime_hours: round_two(raw_overtime),
        status,
    }
}
