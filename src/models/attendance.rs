//! Attendance record model and status vocabulary.
//!
//! One [`AttendanceRecord`] exists per employee per day once the employee
//! has interacted with the system on that day. Absence is never stored as a
//! record of its own; it is inferred downstream from the gap between working
//! days and recorded attendance.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The attendance status attached to a day's record.
///
/// `Absent` only ever appears in reports (for days with no record at all)
/// and `LateHalf` is accepted from stored data and counted as late, but the
/// scan path itself never writes either: a short day becomes `HalfDay`
/// regardless of lateness, and absences stay unmaterialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Clocked in on time (or completed a full day after an on-time start).
    Present,
    /// Clocked in after the grace deadline.
    Late,
    /// Completed day shorter than the configured half-day threshold.
    HalfDay,
    /// No attendance at all on a working day (report-only value).
    Absent,
    /// Late arrival combined with a short day (legacy data value).
    LateHalf,
}

impl AttendanceStatus {
    /// Returns true if this status counts toward the late-day tally.
    pub fn is_late(self) -> bool {
        matches!(self, AttendanceStatus::Late | AttendanceStatus::LateHalf)
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::Late => write!(f, "Late"),
            AttendanceStatus::HalfDay => write!(f, "Half Day"),
            AttendanceStatus::Absent => write!(f, "Absent"),
            AttendanceStatus::LateHalf => write!(f, "Late Half"),
        }
    }
}

/// One employee's attendance for one calendar day.
///
/// # Example
///
/// ```
/// use attend_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let record = AttendanceRecord {
///     id: Uuid::new_v4(),
///     employee_id: Uuid::new_v4(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     in_time: NaiveDate::from_ymd_opt(2026, 1, 15)
///         .unwrap()
///         .and_hms_opt(9, 5, 0),
///     out_time: None,
///     status: AttendanceStatus::Present,
///     hours_worked: Decimal::ZERO,
///     overtime_hours: Decimal::ZERO,
///     manual: false,
/// };
/// assert!(record.is_open());
/// assert!(!record.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub employee_id: Uuid,
    /// The calendar day the record covers.
    pub date: NaiveDate,
    /// Clock-in timestamp; unset until the first accepted scan of the day.
    pub in_time: Option<NaiveDateTime>,
    /// Clock-out timestamp; unset while the day is still open.
    pub out_time: Option<NaiveDateTime>,
    /// Attendance status derived at clock-in and refined at clock-out.
    pub status: AttendanceStatus,
    /// Hours between clock-in and clock-out, rounded to 2 decimal places.
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Hours beyond the overtime threshold, rounded to 2 decimal places.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// True when the record was entered manually rather than via a scan.
    #[serde(default)]
    pub manual: bool,
}

impl AttendanceRecord {
    /// Returns true if the day has a clock-in but no clock-out yet.
    pub fn is_open(&self) -> bool {
        self.in_time.is_some() && self.out_time.is_none()
    }

    /// Returns true if both sides of the day have been recorded.
    pub fn is_complete(&self) -> bool {
        self.in_time.is_some() && self.out_time.is_some()
    }
}
