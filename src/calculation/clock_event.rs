//! The scan state machine: card token in, attendance transition out.
//!
//! [`process_scan`] is pure: it inspects the registry, the roster, and the
//! day's existing record, and returns what should happen. The caller owns
//! persistence and must write the returned record before treating the
//! transition as having happened.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::AttendanceSettings;
use crate::models::{AttendanceRecord, AttendanceStatus, CardRecord, Employee};

use super::lateness::{effective_shift_start, is_late};
use super::work_session::close_session;

/// Why a scan produced no attendance transition.
///
/// These are classified outcomes for the operator surface, not errors;
/// `AlreadyComplete` in particular is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanRejection {
    /// No card with this uid is registered.
    UnknownCard,
    /// The card exists but has been blocked.
    BlockedCard,
    /// The card's employee reference does not resolve to a roster entry.
    UnmappedCard,
    /// The employee already clocked in and out today.
    AlreadyComplete {
        /// The employee whose day is already complete.
        employee_id: Uuid,
    },
}

impl ScanRejection {
    /// Stable classification code for logs and API payloads.
    pub fn code(self) -> &'static str {
        match self {
            ScanRejection::UnknownCard => "unknown_card",
            ScanRejection::BlockedCard => "blocked_card",
            ScanRejection::UnmappedCard => "unmapped_card",
            ScanRejection::AlreadyComplete { .. } => "already_complete",
        }
    }
}

impl std::fmt::Display for ScanRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanRejection::UnknownCard => write!(f, "Unknown card"),
            ScanRejection::BlockedCard => write!(f, "Card is blocked"),
            ScanRejection::UnmappedCard => write!(f, "Card not mapped to any employee"),
            ScanRejection::AlreadyComplete { .. } => {
                write!(f, "Already clocked in and out today")
            }
        }
    }
}

/// The decision produced by [`process_scan`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The scan opens the day: persist `record` as the day's attendance.
    ClockIn {
        /// The new or refreshed record, with `in_time` set.
        record: AttendanceRecord,
    },
    /// The scan closes the day: persist `record` over the open one.
    ClockOut {
        /// The completed record with hours and overtime filled in.
        record: AttendanceRecord,
    },
    /// No transition; the reason says why.
    Rejected {
        /// The classified rejection.
        reason: ScanRejection,
    },
}

impl ScanOutcome {
    /// Stable action code for logs and API payloads.
    pub fn action(&self) -> &'static str {
        match self {
            ScanOutcome::ClockIn { .. } => "clock_in",
            ScanOutcome::ClockOut { .. } => "clock_out",
            ScanOutcome::Rejected { .. } => "rejected",
        }
    }
}

/// Interprets one card scan against the current state of the system.
///
/// `card_uid` must already be normalized (trimmed, uppercased) by the caller;
/// `existing` is the employee's record for `now`'s date, if any. At most one
/// record per employee per day is assumed; the caller maintains that by
/// persisting each outcome before processing the next scan.
///
/// The state machine:
/// - no record, or a record with no `in_time` → clock-in (late when `now` is
///   strictly past shift start plus grace);
/// - open record → clock-out with hours, overtime, and final status;
/// - complete record → rejected as already complete.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::{process_scan, ScanOutcome};
/// use attend_engine::config::AttendanceSettings;
/// use attend_engine::models::{AttendanceStatus, CardRecord, Employee, SalaryType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let employee_id = Uuid::new_v4();
/// let employee = Employee {
///     id: employee_id,
///     emp_code: "EMP001".to_string(),
///     name: "Asha Verma".to_string(),
///     department: String::new(),
///     designation: String::new(),
///     email: String::new(),
///     phone: String::new(),
///     branch_id: None,
///     salary_type: SalaryType::Fixed,
///     monthly_salary: Decimal::new(30000, 0),
///     overtime_rate: Decimal::new(200, 0),
///     weekly_hours: None,
///     shift_start: None,
///     shift_end: None,
///     join_date: None,
///     monthly_leaves: 12,
///     active: true,
/// };
/// let card = CardRecord {
///     id: Uuid::new_v4(),
///     uid: "04A1B2C3".to_string(),
///     employee_id,
///     blocked: false,
///     registered_at: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap(),
/// };
///
/// let now = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// let outcome = process_scan(
///     "04A1B2C3",
///     now,
///     &[card],
///     &[employee],
///     None,
///     &AttendanceSettings::default(),
/// );
///
/// match outcome {
///     ScanOutcome::ClockIn { record } => {
///         assert_eq!(record.status, AttendanceStatus::Present);
///         assert_eq!(record.in_time, Some(now));
///     }
///     other => panic!("expected clock-in, got {other:?}"),
/// }
/// ```
pub fn process_scan(
    card_uid: &str,
    now: NaiveDateTime,
    cards: &[CardRecord],
    employees: &[Employee],
    existing: Option<&AttendanceRecord>,
    settings: &AttendanceSettings,
) -> ScanOutcome {
    // Step 1: Resolve the card
    let Some(card) = cards.iter().find(|c| c.uid == card_uid) else {
        return ScanOutcome::Rejected {
            reason: ScanRejection::UnknownCard,
        };
    };
    if card.blocked {
        return ScanOutcome::Rejected {
            reason: ScanRejection::BlockedCard,
        };
    }

    // Step 2: Resolve the employee behind the card
    let Some(employee) = employees.iter().find(|e| e.id == card.employee_id) else {
        return ScanOutcome::Rejected {
            reason: ScanRejection::UnmappedCard,
        };
    };

    // Step 3: Advance the day's state machine
    match existing {
        None => ScanOutcome::ClockIn {
            record: clock_in_record(employee, now, None, settings),
        },
        Some(record) => match (record.in_time, record.out_time) {
            (None, _) => ScanOutcome::ClockIn {
                record: clock_in_record(employee, now, Some(record), settings),
            },
            (Some(in_time), None) => {
                let totals = close_session(in_time, now, record.status, settings);
                ScanOutcome::ClockOut {
                    record: AttendanceRecord {
                        out_time: Some(now),
                        status: totals.status,
                        hours_worked: totals.hours_worked,
                        overtime_hours: totals.overtime_hours,
                        ..record.clone()
                    },
                }
            }
            (Some(_), Some(_)) => ScanOutcome::Rejected {
                reason: ScanRejection::AlreadyComplete {
                    employee_id: employee.id,
                },
            },
        },
    }
}

/// Builds the clock-in record, reusing the id and manual flag of a
/// same-day record that had no clock-in yet.
fn clock_in_record(
    employee: &Employee,
    now: NaiveDateTime,
    existing: Option<&AttendanceRecord>,
    settings: &AttendanceSettings,
) -> AttendanceRecord {
    let day = now.date();
    let shift_start = effective_shift_start(employee, settings);
    let late = is_late(now, day, shift_start, settings.grace_period_minutes);

    AttendanceRecord {
        id: existing.map_or_else(Uuid::new_v4, |r| r.id),
        employee_id: employee.id,
        date: day,
        in_time: Some(now),
        out_time: None,
        status: if late {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        },
        hours_worked: Decimal::ZERO,
        overtime_hours: Decimal::ZERO,
        manual: existing.is_some_and(|r| r.manual),
    }
}
