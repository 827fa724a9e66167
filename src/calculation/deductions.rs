//! Deductions: absence, half days, and the late penalty.

use rust_decimal::Decimal;

use crate::models::SalaryType;

use super::attendance_tally::MonthlyTally;
use super::pay_rates::RateBasis;

/// The deduction side of a payroll summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionBreakdown {
    /// Absent days at the daily rate; zero unless the salary is fixed.
    pub absent_deduction: Decimal,
    /// Half days at half the daily rate; zero unless the salary is fixed.
    pub half_day_deduction: Decimal,
    /// Late days times the configured percentage of monthly salary.
    pub late_penalty: Decimal,
    /// Sum of the three components.
    pub total: Decimal,
}

/// Computes all deductions for one employee-month.
///
/// Hourly and daily salary types already earn nothing for missed time, so
/// absence and half-day deductions apply to fixed salaries only. The late
/// penalty applies to every salary type.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::{MonthlyTally, RateBasis, compute_deductions};
/// use attend_engine::models::SalaryType;
/// use rust_decimal::Decimal;
///
/// let tally = MonthlyTally {
///     present_days: 18,
///     half_days: 0,
///     late_days: 0,
///     absent_days: 2,
///     total_hours: Decimal::new(162, 0),
///     total_overtime_hours: Decimal::ZERO,
/// };
/// let rates = RateBasis {
///     per_day: Decimal::new(1500, 0),
///     per_hour: Decimal::new(18750, 2),
/// };
///
/// let deductions = compute_deductions(
///     SalaryType::Fixed,
///     &tally,
///     &rates,
///     Decimal::new(30000, 0),
///     Decimal::new(2, 0),
/// );
/// assert_eq!(deductions.absent_deduction, Decimal::new(3000, 0));
/// assert_eq!(deductions.total, Decimal::new(3000, 0));
/// ```
pub fn compute_deductions(
    salary_type: SalaryType,
    tally: &MonthlyTally,
    rates: &RateBasis,
    monthly_salary: Decimal,
    late_penalty_percent: Decimal,
) -> DeductionBreakdown {
    let fixed = salary_type == SalaryType::Fixed;

    let absent_deduction = if fixed {
        Decimal::from(tally.absent_days) * rates.per_day
    } else {
        Decimal::ZERO
    };
    let half_day_deduction = if fixed {
        Decimal::from(tally.half_days) * rates.per_day * Decimal::new(5, 1)
    } else {
        Decimal::ZERO
    };
    let late_penalty =
        Decimal::from(tally.late_days) * (monthly_salary * late_penalty_percent / Decimal::from(100));

    DeductionBreakdown {
        absent_deduction,
        half_day_deduction,
        late_penalty,
        total: absent_deduction + half_day_deduction + late_penalty,
    }
}
