//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structures for all mutating
//! endpoints, plus the query parameters of the read-side endpoints.
//! Request types convert into domain types; ids are assigned at the
//! boundary so replayed request bodies never collide.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Employee, PayMonth, Role, SalaryType, UserAccount};

/// Request body for the `/scan` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// The raw card token as read; trimmed and uppercased by the engine.
    pub uid: String,
    /// The scan moment. Defaults to the server's local time, but readers
    /// that timestamp at the device can pass their own.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// Request body for the `/attendance/manual` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualEntryRequest {
    /// The employee the entry is for.
    pub employee_id: Uuid,
    /// The attendance date.
    pub date: NaiveDate,
    /// Clock-in time on that date.
    pub in_time: NaiveTime,
    /// Clock-out time on that date.
    pub out_time: NaiveTime,
}

/// Employee details for create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Human-facing employee code, e.g. `EMP001`.
    pub emp_code: String,
    /// Full name.
    pub name: String,
    /// Department label.
    #[serde(default)]
    pub department: String,
    /// Designation label.
    #[serde(default)]
    pub designation: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// The branch the employee belongs to.
    #[serde(default)]
    pub branch_id: Option<Uuid>,
    /// How the employee is paid.
    #[serde(default)]
    pub salary_type: SalaryType,
    /// Monthly salary in rupees.
    pub monthly_salary: Decimal,
    /// Overtime rate in rupees per hour.
    #[serde(default = "default_overtime_rate")]
    pub overtime_rate: Decimal,
    /// Contracted weekly hours, used to derive the hourly rate.
    #[serde(default)]
    pub weekly_hours: Option<Decimal>,
    /// Personal shift start override.
    #[serde(default)]
    pub shift_start: Option<NaiveTime>,
    /// Personal shift end override.
    #[serde(default)]
    pub shift_end: Option<NaiveTime>,
    /// Joining date.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// Leave allowance per month.
    #[serde(default = "default_monthly_leaves")]
    pub monthly_leaves: u32,
    /// Whether the employee is active.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Card uid to register alongside the employee, create only.
    #[serde(default)]
    pub card_uid: Option<String>,
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

impl EmployeeRequest {
    /// Converts into a domain employee with the given id, splitting off
    /// the optional card uid.
    pub fn into_employee(self, id: Uuid) -> (Employee, Option<String>) {
        let employee = Employee {
            id,
            emp_code: self.emp_code,
            name: self.name,
            department: self.department,
            designation: self.designation,
            email: self.email,
            phone: self.phone,
            branch_id: self.branch_id,
            salary_type: self.salary_type,
            monthly_salary: self.monthly_salary,
            overtime_rate: self.overtime_rate,
            weekly_hours: self.weekly_hours,
            shift_start: self.shift_start,
            shift_end: self.shift_end,
            join_date: self.join_date,
            monthly_leaves: self.monthly_leaves,
            active: self.active,
        };
        (employee, self.card_uid)
    }
}

/// Request body for registering a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCardRequest {
    /// The card token as scanned.
    pub uid: String,
    /// The employee the card belongs to.
    pub employee_id: Uuid,
}

/// Request body for adding a holiday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// The holiday date.
    pub date: NaiveDate,
    /// Display name, e.g. "Republic Day".
    pub name: String,
}

/// Request body for adding a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRequest {
    /// Branch name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
}

/// Request body for the `/login` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Request body for creating a login account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// The role the account carries.
    pub role: Role,
    /// Linked employee record, if any.
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    /// Branch scope, if any.
    #[serde(default)]
    pub branch_id: Option<Uuid>,
}

impl UserRequest {
    /// Converts into a domain account with the given id.
    pub fn into_account(self, id: Uuid) -> UserAccount {
        UserAccount {
            id,
            username: self.username,
            password: self.password,
            name: self.name,
            role: self.role,
            employee_id: self.employee_id,
            branch_id: self.branch_id,
        }
    }
}

/// Query parameters for the `/payroll` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollQuery {
    /// The month to compute, e.g. `2026-01`.
    pub month: PayMonth,
    /// Restrict to one branch.
    #[serde(default)]
    pub branch_id: Option<Uuid>,
}

/// Query parameters for the report endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    /// The date for the daily attendance report.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The month for the monthly report kinds.
    #[serde(default)]
    pub month: Option<PayMonth>,
    /// Restrict to one branch.
    #[serde(default)]
    pub branch_id: Option<Uuid>,
}
