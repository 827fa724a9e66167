//! Payroll computation result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayMonth;

/// The complete payroll outcome for one employee and one month.
///
/// Produced by [`compute_payroll`](crate::calculation::compute_payroll) and
/// deterministic for given inputs: the same attendance, holidays, and
/// settings always yield an identical summary, so a payroll run can be
/// recomputed at any time without storing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The employee this summary is for.
    pub employee_id: Uuid,
    /// The month the summary covers.
    pub month: PayMonth,
    /// Working days in the month (weekly offs and holidays excluded).
    pub total_working_days: u32,
    /// Days with a clock-in and a present or late status.
    pub present_days: u32,
    /// Days recorded as half days.
    pub half_days: u32,
    /// Working days with no attendance at all; derived, never stored.
    pub absent_days: u32,
    /// Days with a late or late-half status.
    pub late_days: u32,
    /// Sum of recorded hours worked across the month.
    pub total_hours: Decimal,
    /// Sum of recorded overtime hours across the month.
    pub total_overtime_hours: Decimal,
    /// Gross salary before deductions and overtime pay.
    pub gross_salary: Decimal,
    /// Basic component of gross (50%).
    pub basic: Decimal,
    /// House rent allowance component of gross (20%).
    pub hra: Decimal,
    /// Other allowances component of gross (30%).
    pub allowances: Decimal,
    /// Deduction for absent days (fixed-salary employees only).
    pub absent_deduction: Decimal,
    /// Deduction for half days (fixed-salary employees only).
    pub half_day_deduction: Decimal,
    /// Penalty for late days, as a percentage of monthly salary per day.
    pub late_penalty: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Overtime hours times the employee's overtime rate.
    pub overtime_pay: Decimal,
    /// Gross minus deductions plus overtime pay. Not clamped at zero.
    pub net_salary: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serde_round_trips() {
        let summary = PayrollSummary {
            employee_id: Uuid::new_v4(),
            month: PayMonth::new(2026, 1).unwrap(),
            total_working_days: 26,
            present_days: 24,
            half_days: 1,
            absent_days: 1,
            late_days: 2,
            total_hours: Decimal::new(19250, 2),
            total_overtime_hours: Decimal::new(350, 2),
            gross_salary: Decimal::new(30000, 0),
            basic: Decimal::new(15000, 0),
            hra: Decimal::new(6000, 0),
            allowances: Decimal::new(9000, 0),
            absent_deduction: Decimal::new(115385, 2),
            half_day_deduction: Decimal::new(57692, 2),
            late_penalty: Decimal::new(1200, 0),
            total_deductions: Decimal::new(293077, 2),
            overtime_pay: Decimal::new(700, 0),
            net_salary: Decimal::new(2776923, 2),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: PayrollSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
