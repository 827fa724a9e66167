//! HTTP API module for the attendance engine.
//!
//! This module provides the REST API endpoints for scan processing,
//! attendance management, payroll, reports, and administration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BranchRequest, EmployeeRequest, HolidayRequest, LoginRequest, ManualEntryRequest,
    PayrollQuery, RegisterCardRequest, ReportQuery, ScanRequest, UserRequest,
};
pub use response::{ApiError, ScanResponse};
pub use state::AppState;
