//! Report table builders.
//!
//! Each builder projects the in-memory collections into a [`ReportTable`]:
//! a title, a header row, and string-formatted data rows. Builders never
//! mutate state and never compute anything the calculation modules do not
//! already define; monthly figures come from the attendance tally and the
//! payroll report reuses the full payroll computation per employee.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{compute_payroll, count_working_days, tally_month};
use crate::config::AttendanceSettings;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStatus, Employee, Holiday, PayMonth};

use super::format::{format_clock_time, format_currency, format_hours, format_short_date};

/// The report shapes the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Per-employee in/out times and status for a single date.
    DailyAttendance,
    /// Per-employee attendance tallies for a month.
    MonthlyAttendance,
    /// Employees with late arrivals in a month, with the dates listed.
    LateReport,
    /// Employees with overtime in a month, with the pay it earns.
    OvertimeReport,
    /// Per-employee payroll summary rows for a month.
    PayrollReport,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::DailyAttendance => "daily-attendance",
            Self::MonthlyAttendance => "monthly-attendance",
            Self::LateReport => "late-report",
            Self::OvertimeReport => "overtime-report",
            Self::PayrollReport => "payroll-report",
        };
        write!(f, "{token}")
    }
}

/// A generated report: title, column headers, and formatted rows.
///
/// Every cell is already a display string; the table can be rendered as
/// JSON or serialized to CSV without further computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    /// Human-readable title, also the basis for the CSV filename.
    pub title: String,
    /// Column headers, in render order.
    pub columns: Vec<String>,
    /// Data rows; each row has one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    fn new(title: String, columns: &[&str]) -> Self {
        Self {
            title,
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

fn branch_employees<'a>(
    employees: &'a [Employee],
    branch: Option<Uuid>,
) -> impl Iterator<Item = &'a Employee> {
    employees.iter().filter(move |e| e.matches_branch(branch))
}

fn month_records<'a>(
    attendance: &'a [AttendanceRecord],
    employee_id: Uuid,
    month: PayMonth,
) -> impl Iterator<Item = &'a AttendanceRecord> {
    attendance
        .iter()
        .filter(move |a| a.employee_id == employee_id && month.contains(a.date))
}

/// Builds the daily attendance report for one date.
///
/// Every employee in scope gets a row; those without a record for the day
/// show `Absent` for the in time, `-` for the out time and hours, and an
/// absent status.
pub fn daily_attendance_report(
    date: NaiveDate,
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    branch: Option<Uuid>,
) -> ReportTable {
    let mut table = ReportTable::new(
        format!("Daily Attendance Report - {}", format_short_date(date)),
        &[
            "Name", "Emp ID", "Department", "In Time", "Out Time", "Hours", "Status",
        ],
    );

    for emp in branch_employees(employees, branch) {
        let record = attendance
            .iter()
            .find(|a| a.employee_id == emp.id && a.date == date);
        let row = match record {
            Some(att) => vec![
                emp.name.clone(),
                emp.emp_code.clone(),
                emp.department.clone(),
                att.in_time
                    .map_or_else(|| "Absent".to_string(), format_clock_time),
                att.out_time.map_or_else(|| "-".to_string(), format_clock_time),
                format_hours(att.hours_worked),
                att.status.to_string(),
            ],
            None => vec![
                emp.name.clone(),
                emp.emp_code.clone(),
                emp.department.clone(),
                "Absent".to_string(),
                "-".to_string(),
                "-".to_string(),
                AttendanceStatus::Absent.to_string(),
            ],
        };
        table.rows.push(row);
    }
    table
}

/// Builds the monthly attendance report: one tally row per employee.
pub fn monthly_attendance_report(
    month: PayMonth,
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    holidays: &[Holiday],
    settings: &AttendanceSettings,
    branch: Option<Uuid>,
) -> ReportTable {
    let mut table = ReportTable::new(
        format!("Monthly Attendance Report - {month}"),
        &[
            "Name",
            "Emp ID",
            "Present",
            "Half Days",
            "Late",
            "Absent",
            "Total Hours",
            "OT Hours",
        ],
    );

    let working_days = count_working_days(month, settings, holidays);
    for emp in branch_employees(employees, branch) {
        let tally = tally_month(attendance, emp.id, month, working_days);
        table.rows.push(vec![
            emp.name.clone(),
            emp.emp_code.clone(),
            tally.present_days.to_string(),
            tally.half_days.to_string(),
            tally.late_days.to_string(),
            tally.absent_days.to_string(),
            format_hours(tally.total_hours),
            format_hours(tally.total_overtime_hours),
        ]);
    }
    table
}

/// Builds the late report: employees with at least one late arrival in the
/// month, with the dates spelled out.
pub fn late_report(
    month: PayMonth,
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    branch: Option<Uuid>,
) -> ReportTable {
    let mut table = ReportTable::new(
        format!("Late Report - {month}"),
        &["Name", "Emp ID", "Late Days", "Dates"],
    );

    for emp in branch_employees(employees, branch) {
        let late_dates: Vec<String> = month_records(attendance, emp.id, month)
            .filter(|a| a.status.is_late())
            .map(|a| format_short_date(a.date))
            .collect();
        if late_dates.is_empty() {
            continue;
        }
        table.rows.push(vec![
            emp.name.clone(),
            emp.emp_code.clone(),
            late_dates.len().to_string(),
            late_dates.join(", "),
        ]);
    }
    table
}

/// Builds the overtime report: employees with overtime in the month and the
/// pay it earns at their personal overtime rate.
pub fn overtime_report(
    month: PayMonth,
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    branch: Option<Uuid>,
) -> ReportTable {
    let mut table = ReportTable::new(
        format!("Overtime Report - {month}"),
        &["Name", "Emp ID", "OT Hours", "OT Pay"],
    );

    for emp in branch_employees(employees, branch) {
        let total_overtime: Decimal = month_records(attendance, emp.id, month)
            .map(|a| a.overtime_hours)
            .sum();
        if total_overtime <= Decimal::ZERO {
            continue;
        }
        table.rows.push(vec![
            emp.name.clone(),
            emp.emp_code.clone(),
            format_hours(total_overtime),
            format_currency(total_overtime * emp.overtime_rate),
        ]);
    }
    table
}

/// Builds the payroll report: one payroll summary row per employee,
/// using the same computation the payroll endpoint serves.
///
/// # Errors
///
/// Fails when the month has no working days, since per-day rates cannot
/// be derived.
pub fn payroll_report(
    month: PayMonth,
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    holidays: &[Holiday],
    settings: &AttendanceSettings,
    branch: Option<Uuid>,
) -> EngineResult<ReportTable> {
    let mut table = ReportTable::new(
        format!("Payroll Report - {month}"),
        &[
            "Name",
            "Emp ID",
            "Salary",
            "Present",
            "Absent",
            "Deductions",
            "OT Pay",
            "Net Pay",
        ],
    );

    for emp in branch_employees(employees, branch) {
        let summary = compute_payroll(emp, month, attendance, holidays, settings)?;
        table.rows.push(vec![
            emp.name.clone(),
            emp.emp_code.clone(),
            format_currency(emp.monthly_salary),
            summary.present_days.to_string(),
            summary.absent_days.to_string(),
            format_currency(summary.total_deductions),
            format_currency(summary.overtime_pay),
            format_currency(summary.net_salary),
        ]);
    }
    Ok(table)
}
