//! Monthly payroll computation.
//!
//! [`compute_payroll`] is a pure function of its inputs: the same employee,
//! attendance, holidays, and settings always produce an identical summary.
//! Nothing is read from or written to storage here, which is what lets a
//! payroll run be recomputed freely instead of being persisted.

use rust_decimal::Decimal;

use crate::config::AttendanceSettings;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee, Holiday, PayMonth, PayrollSummary};

use super::attendance_tally::tally_month;
use super::deductions::compute_deductions;
use super::gross_salary::gross_salary;
use super::pay_rates::derive_rate_basis;
use super::working_days::count_working_days;

/// Computes the payroll summary for one employee and one month.
///
/// The pipeline: count working days, tally the employee's attendance,
/// derive the rate basis, then build gross, deductions, overtime pay, and
/// net. Absences are inferred from the gap between working days and
/// recorded attendance; they are never read from records.
///
/// # Errors
///
/// Returns a calculation error when the month has no working days at all
/// (every day weekly-off or holiday), since no daily rate can be derived.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::compute_payroll;
/// use attend_engine::config::AttendanceSettings;
/// use attend_engine::models::{Employee, PayMonth, SalaryType};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let employee = Employee {
///     id: Uuid::new_v4(),
///     emp_code: "EMP001".to_string(),
///     name: "Asha Verma".to_string(),
///     department: String::new(),
///     designation: String::new(),
///     email: String::new(),
///     phone: String::new(),
///     branch_id: None,
///     salary_type: SalaryType::Fixed,
///     monthly_salary: Decimal::new(27000, 0),
///     overtime_rate: Decimal::new(200, 0),
///     weekly_hours: None,
///     shift_start: None,
///     shift_end: None,
///     join_date: None,
///     monthly_leaves: 12,
///     active: true,
/// };
///
/// let month = PayMonth::new(2026, 1).unwrap();
/// let summary = compute_payroll(
///     &employee,
///     month,
///     &[],
///     &[],
///     &AttendanceSettings::default(),
/// )
/// .unwrap();
///
/// // No attendance at all: the whole fixed salary is deducted.
/// assert_eq!(summary.total_working_days, 27);
/// assert_eq!(summary.absent_days, 27);
/// assert_eq!(summary.net_salary, Decimal::ZERO);
/// ```
pub fn compute_payroll(
    employee: &Employee,
    month: PayMonth,
    attendance: &[AttendanceRecord],
    holidays: &[Holiday],
    settings: &AttendanceSettings,
) -> EngineResult<PayrollSummary> {
    // Step 1: Working days in the month
    let working_days = count_working_days(month, settings, holidays);

    // Step 2: Attendance tallies
    let tally = tally_month(attendance, employee.id, month, working_days);

    // Step 3: Rate basis
    let rates = derive_rate_basis(employee.monthly_salary, working_days, employee.weekly_hours)?;

    // Step 4: Gross by salary type
    let gross = gross_salary(employee.salary_type, employee.monthly_salary, &rates, &tally);

    // Step 5: Deductions
    let deductions = compute_deductions(
        employee.salary_type,
        &tally,
        &rates,
        employee.monthly_salary,
        settings.late_penalty_percent,
    );

    // Step 6: Overtime pay and net
    let overtime_pay = tally.total_overtime_hours * employee.overtime_rate;
    let net_salary = gross - deductions.total + overtime_pay;

    Ok(PayrollSummary {
        employee_id: employee.id,
        month,
        total_working_days: working_days,
        present_days: tally.present_days,
        half_days: tally.half_days,
        absent_days: tally.absent_days,
        late_days: tally.late_days,
        total_hours: tally.total_hours,
        total_overtime_hours: tally.total_overtime_hours,
        gross_salary: gross,
        basic: gross * Decimal::new(5, 1),
        hra: gross * Decimal::new(2, 1),
        allowances: gross * Decimal::new(3, 1),
        absent_deduction: deductions.absent_deduction,
        half_day_deduction: deductions.half_day_deduction,
        late_penalty: deductions.late_penalty,
        total_deductions: deductions.total,
        overtime_pay,
        net_salary,
    })
}
