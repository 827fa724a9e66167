//! Employee model and related types.
//!
//! This module defines the Employee struct and SalaryType enum for
//! representing workers tracked by the attendance and payroll engine.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an employee's gross pay is derived from their monthly salary figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalaryType {
    /// The monthly salary is paid as-is, with per-day deductions for
    /// absences and half days.
    #[default]
    Fixed,
    /// Pay is hours worked times the derived hourly rate.
    Hourly,
    /// Pay is days attended (half days count 0.5) times the derived
    /// daily rate.
    Daily,
}

/// Represents an employee tracked by the attendance system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// Human-assigned employee code (e.g., "EMP001"), unique per company.
    pub emp_code: String,
    /// Display name.
    pub name: String,
    /// Department the employee belongs to (free text).
    #[serde(default)]
    pub department: String,
    /// Job title (free text).
    #[serde(default)]
    pub designation: String,
    /// Contact email, if known.
    #[serde(default)]
    pub email: String,
    /// Contact phone, if known.
    #[serde(default)]
    pub phone: String,
    /// The branch this employee is assigned to.
    pub branch_id: Option<Uuid>,
    /// How gross pay is derived from the salary figure.
    #[serde(default)]
    pub salary_type: SalaryType,
    /// The monthly salary figure all rates derive from.
    pub monthly_salary: Decimal,
    /// Currency paid per overtime hour.
    #[serde(default = "default_overtime_rate")]
    pub overtime_rate: Decimal,
    /// Contracted hours per week; used to derive the hourly rate.
    #[serde(default)]
    pub weekly_hours: Option<Decimal>,
    /// Per-employee shift start override; the configured default applies
    /// when unset.
    #[serde(default)]
    pub shift_start: Option<NaiveTime>,
    /// Per-employee shift end override.
    #[serde(default)]
    pub shift_end: Option<NaiveTime>,
    /// The date the employee joined.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// Paid leave days allotted per month.
    #[serde(default = "default_monthly_leaves")]
    pub monthly_leaves: u32,
    /// Whether the employee is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_overtime_rate() -> Decimal {
    Decimal::new(200, 0)
}

fn default_monthly_leaves() -> u32 {
    12
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if this employee passes the given branch filter.
    ///
    /// A filter of `None` matches every employee; otherwise the employee's
    /// branch must equal the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use attend_engine::models::{Employee, SalaryType};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let branch = Uuid::new_v4();
    /// let employee = Employee {
    ///     id: Uuid::new_v4(),
    ///     emp_code: "EMP001".to_string(),
    ///     name: "Asha Verma".to_string(),
    ///     department: "Operations".to_string(),
    ///     designation: String::new(),
    ///     email: String::new(),
    ///     phone: String::new(),
    ///     branch_id: Some(branch),
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
    /// assert!(employee.matches_branch(None));
    /// assert!(employee.matches_branch(Some(branch)));
    /// assert!(!employee.matches_branch(Some(Uuid::new_v4())));
    /// ```
    pub fn matches_branch(&self, filter: Option<Uuid>) -> bool {
        match filter {
            None => true,
            Some(branch_id) => self.branch_id == Some(branch_id),
        }
    }
}
