//! Core data models for the attendance and payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod branch;
mod card;
mod employee;
mod holiday;
mod month;
mod payroll;
mod user;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use branch::Branch;
pub use card::CardRecord;
pub use employee::{Employee, SalaryType};
pub use holiday::Holiday;
pub use month::PayMonth;
pub use payroll::PayrollSummary;
pub use user::{Role, UserAccount};
