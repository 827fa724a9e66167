//! Report generation for the attendance and payroll engine.
//!
//! This module projects attendance records and payroll figures into
//! tabular reports (daily attendance, monthly attendance, late arrivals,
//! overtime, payroll) and renders them as CSV for download. Builders are
//! read-only: they format what the calculation modules derive.

mod builders;
mod csv;
mod format;

pub use builders::{
    ReportKind, ReportTable, daily_attendance_report, late_report, monthly_attendance_report,
    overtime_report, payroll_report,
};
pub use csv::{report_filename, to_csv};
pub use format::{format_clock_time, format_currency, format_hours, format_short_date};
