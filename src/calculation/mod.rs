//! Calculation logic for the attendance and payroll engine.
//!
//! This module contains all the calculation functions for processing card
//! scans and deriving pay, including lateness detection against the shift
//! start and grace period, clock-in/clock-out resolution for a scan, work
//! session closing with half-day and overtime derivation, manual attendance
//! entries, working-day counting for a month, monthly attendance tallies,
//! pay rate derivation, gross salary by salary type, deduction computation,
//! and the full monthly payroll summary.

mod attendance_tally;
mod clock_event;
mod deductions;
mod gross_salary;
mod lateness;
mod manual_entry;
mod pay_rates;
mod payroll;
mod work_session;
mod working_days;

pub use attendance_tally::{MonthlyTally, tally_month};
pub use clock_event::{ScanOutcome, ScanRejection, process_scan};
pub use deductions::{DeductionBreakdown, compute_deductions};
pub use gross_salary::gross_salary;
pub use lateness::{effective_shift_start, grace_deadline, is_late};
pub use manual_entry::manual_entry;
pub use pay_rates::{RateBasis, derive_rate_basis};
pub use payroll::compute_payroll;
pub use work_session::{SessionTotals, close_session};
pub use working_days::{count_working_days, is_working_day};
