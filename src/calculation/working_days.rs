//! Working-day counting for a payroll month.
//!
//! A calendar day is a working day unless it falls on a configured
//! weekly-off weekday or appears in the holiday calendar. The count is a
//! plain loop over the month; no recurrence rules apply.

use chrono::NaiveDate;

use crate::config::AttendanceSettings;
use crate::models::{Holiday, PayMonth};

/// Returns true if `date` is a working day under the given calendar.
pub fn is_working_day(date: NaiveDate, settings: &AttendanceSettings, holidays: &[Holiday]) -> bool {
    !settings.is_weekly_off(date) && !holidays.iter().any(|h| h.date == date)
}

/// Counts the working days in a month.
///
/// A holiday that falls on a weekly-off day is not subtracted twice; the
/// day was never counted to begin with.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::count_working_days;
/// use attend_engine::config::AttendanceSettings;
/// use attend_engine::models::{Holiday, PayMonth};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// // January 2026 has 31 days and four Sundays; Republic Day falls on
/// // Monday the 26th.
/// let holidays = vec![Holiday {
///     id: Uuid::new_v4(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     name: "Republic Day".to_string(),
/// }];
/// let month = PayMonth::new(2026, 1).unwrap();
/// let count = count_working_days(month, &AttendanceSettings::default(), &holidays);
/// assert_eq!(count, 26); // 31 - 4 Sundays - 1 holiday
/// ```
pub fn count_working_days(
    month: PayMonth,
    settings: &AttendanceSettings,
    holidays: &[Holiday],
) -> u32 {
    month
        .days()
        .filter(|day| is_working_day(*day, settings, holidays))
        .count() as u32
}
