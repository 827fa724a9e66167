//! Monthly attendance tallies for one employee.
//!
//! The tally is the bridge between raw records and payroll: day counts by
//! status plus summed hours. Absence is never read from stored records; it
//! is derived here as the gap between working days and recorded attendance.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{AttendanceRecord, AttendanceStatus, PayMonth};

/// Day counts and hour sums for one employee over one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTally {
    /// Days with a clock-in and a present or late status.
    pub present_days: u32,
    /// Days recorded as half days.
    pub half_days: u32,
    /// Days with a late or late-half status.
    pub late_days: u32,
    /// Working days with no attendance; floored at zero.
    pub absent_days: u32,
    /// Sum of recorded hours worked.
    pub total_hours: Decimal,
    /// Sum of recorded overtime hours.
    pub total_overtime_hours: Decimal,
}

/// Tallies an employee's records for a month against its working-day count.
///
/// Present requires an actual clock-in; half and late days are counted by
/// status alone. Absent days are `working_days - present - half`, floored
/// at zero so duplicate records (e.g. manual corrections alongside scans)
/// can never produce a negative.
pub fn tally_month(
    records: &[AttendanceRecord],
    employee_id: Uuid,
    month: PayMonth,
    working_days: u32,
) -> MonthlyTally {
    let month_records = records
        .iter()
        .filter(|r| r.employee_id == employee_id && month.contains(r.date));

    let mut present_days = 0u32;
    let mut half_days = 0u32;
    let mut late_days = 0u32;
    let mut total_hours = Decimal::ZERO;
    let mut total_overtime_hours = Decimal::ZERO;

    for record in month_records {
        if record.in_time.is_some()
            && matches!(
                record.status,
                AttendanceStatus::Present | AttendanceStatus::Late
            )
        {
            present_days += 1;
        }
        if record.status == AttendanceStatus::HalfDay {
            half_days += 1;
        }
        if record.status.is_late() {
            late_days += 1;
        }
        total_hours += record.hours_worked;
        total_overtime_hours += record.overtime_hours;
    }

    MonthlyTally {
        present_days,
        half_days,
        late_days,
        absent_days: working_days.saturating_sub(present_days + half_days),
        total_hours,
        total_overtime_hours,
    }
}
