//! Comprehensive integration tests for the attendance engine.
//!
//! This test suite exercises the engine end to end over the HTTP API:
//! - Scan processing (clock-in, clock-out, rejections)
//! - Late, half-day, and overtime derivation
//! - Monthly payroll for fixed, hourly, and daily salary types
//! - Reports and CSV export
//! - Card registry, roster, holidays, branches, users
//! - Seeded defaults and reset
//! - Storage failure behavior

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use attend_engine::api::{create_router, AppState};
use attend_engine::error::{EngineError, EngineResult};
use attend_engine::service::AppService;
use attend_engine::store::{KeyValueStore, MemoryKvStore};

// =============================================================================
// Test Helpers
// =============================================================================

async fn create_state() -> AppState {
    let store = Arc::new(MemoryKvStore::new());
    let service = AppService::load(store)
        .await
        .expect("Failed to load service");
    AppState::new(service)
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field that rides the wire as a string.
fn decimal_field(value: &Value, field: &str) -> Decimal {
    let raw = value[field]
        .as_str()
        .unwrap_or_else(|| panic!("expected string field '{}', got {}", field, value[field]));
    Decimal::from_str(raw).unwrap()
}

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = create_router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Fetches a CSV endpoint, returning status, content-disposition, and body.
async fn get_csv(state: &AppState, uri: &str) -> (StatusCode, String, String) {
    let response = create_router(state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let disposition = response
        .headers()
        .get("content-disposition")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body_bytes.to_vec()).unwrap();

    (status, disposition, text)
}

fn employee_body(emp_code: &str, name: &str) -> Value {
    json!({
        "emp_code": emp_code,
        "name": name,
        "department": "Operations",
        "monthly_salary": "30000"
    })
}

async fn create_employee(state: &AppState, body: Value) -> Value {
    let (status, employee) = send(state, "POST", "/employees", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "employee creation failed: {}", employee);
    employee
}

async fn register_card(state: &AppState, uid: &str, employee_id: &str) -> (StatusCode, Value) {
    send(
        state,
        "POST",
        "/cards",
        Some(json!({"uid": uid, "employee_id": employee_id})),
    )
    .await
}

async fn scan(state: &AppState, uid: &str, at: &str) -> (StatusCode, Value) {
    send(state, "POST", "/scan", Some(json!({"uid": uid, "at": at}))).await
}

async fn add_manual(state: &AppState, employee_id: &str, date: &str, in_time: &str, out_time: &str) {
    let (status, body) = send(
        state,
        "POST",
        "/attendance/manual",
        Some(json!({
            "employee_id": employee_id,
            "date": date,
            "in_time": in_time,
            "out_time": out_time
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "manual entry failed: {}", body);
}

async fn add_holiday(state: &AppState, date: &str, name: &str) {
    let (status, body) = send(
        state,
        "POST",
        "/holidays",
        Some(json!({"date": date, "name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "holiday creation failed: {}", body);
}

/// Working days of February 2026 under the default Sunday-off calendar
/// (Sundays fall on the 1st, 8th, 15th, and 22nd), minus `skip`.
fn feb_2026_working_days(skip: &[u32]) -> Vec<String> {
    (1u32..=28)
        .filter(|d| ![1, 8, 15, 22].contains(d))
        .filter(|d| !skip.contains(d))
        .map(|d| format!("2026-02-{:02}", d))
        .collect()
}

// =============================================================================
// SECTION 1: Scan Processing
// =============================================================================

#[tokio::test]
async fn test_scan_full_day_clock_in_and_out() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    let (status, _) = register_card(&state, "04A1B2C3", id).await;
    assert_eq!(status, StatusCode::OK);

    // First scan of the day opens it
    let (status, result) = scan(&state, "04A1B2C3", "2026-02-06T09:00:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["action"], "clock_in");
    assert_eq!(result["record"]["status"], "present");
    assert_eq!(result["record"]["in_time"], "2026-02-06T09:00:00");
    assert!(result["record"]["out_time"].is_null());

    // Second scan closes it: 9.5 hours, 0.5 beyond the 9-hour threshold
    let (status, result) = scan(&state, "04A1B2C3", "2026-02-06T18:30:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["action"], "clock_out");
    assert_eq!(result["record"]["status"], "present");
    assert_eq!(decimal_field(&result["record"], "hours_worked"), decimal("9.5"));
    assert_eq!(decimal_field(&result["record"], "overtime_hours"), decimal("0.5"));
}

#[tokio::test]
async fn test_scan_after_grace_period_is_late() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    register_card(&state, "04A1B2C3", id).await;

    // Shift starts 09:00 with 15 minutes grace; 09:20 is past the deadline
    let (status, result) = scan(&state, "04A1B2C3", "2026-02-06T09:20:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["action"], "clock_in");
    assert_eq!(result["record"]["status"], "late");
}

#[tokio::test]
async fn test_short_session_becomes_half_day() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    register_card(&state, "04A1B2C3", id).await;

    scan(&state, "04A1B2C3", "2026-02-06T09:00:00").await;
    // 3 hours is under the 4-hour half-day threshold
    let (_, result) = scan(&state, "04A1B2C3", "2026-02-06T12:00:00").await;
    assert_eq!(result["action"], "clock_out");
    assert_eq!(result["record"]["status"], "half_day");
}

#[tokio::test]
async fn test_short_day_overrides_late_status() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    register_card(&state, "04A1B2C3", id).await;

    // A late clock-in followed by a short day resolves to half_day; the
    // short-day rule wins over lateness at clock-out.
    scan(&state, "04A1B2C3", "2026-02-06T09:30:00").await;
    let (_, result) = scan(&state, "04A1B2C3", "2026-02-06T13:00:00").await;
    assert_eq!(result["record"]["status"], "half_day");
}

#[tokio::test]
async fn test_third_scan_rejected_as_already_complete() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    register_card(&state, "04A1B2C3", id).await;

    scan(&state, "04A1B2C3", "2026-02-06T09:00:00").await;
    scan(&state, "04A1B2C3", "2026-02-06T18:00:00").await;

    let (status, result) = scan(&state, "04A1B2C3", "2026-02-06T19:00:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["action"], "rejected");
    assert_eq!(result["reason"], "already_complete");
}

#[tokio::test]
async fn test_card_uid_normalized_on_registration_and_scan() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();

    let (status, card) = register_card(&state, "  04a1b2c3  ", id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["uid"], "04A1B2C3");

    // A differently-cased read of the same card still resolves
    let (_, result) = scan(&state, "04a1B2c3", "2026-02-06T09:00:00").await;
    assert_eq!(result["action"], "clock_in");
}

// =============================================================================
// SECTION 2: Payroll
// =============================================================================

#[tokio::test]
async fn test_fixed_salary_with_two_absences() {
    // Fixed 30000, February 2026 with four extra holidays: 20 working days.
    // Present on 18 of them, so 2 absences deduct 2 * 1500 = 3000.
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();

    add_holiday(&state, "2026-02-02", "Founders Day").await;
    add_holiday(&state, "2026-02-03", "Founders Day Holiday").await;
    add_holiday(&state, "2026-02-04", "Maintenance Shutdown").await;
    add_holiday(&state, "2026-02-05", "Maintenance Shutdown").await;

    for date in feb_2026_working_days(&[2, 3, 4, 5, 27, 28]) {
        add_manual(&state, id, &date, "09:00:00", "18:00:00").await;
    }

    let (status, summaries) = send(&state, "GET", "/payroll?month=2026-02", None).await;
    assert_eq!(status, StatusCode::OK);
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 1);

    let summary = &summaries[0];
    assert_eq!(summary["total_working_days"], 20);
    assert_eq!(summary["present_days"], 18);
    assert_eq!(summary["absent_days"], 2);
    assert_eq!(summary["late_days"], 0);
    assert_eq!(decimal_field(summary, "gross_salary"), decimal("30000"));
    assert_eq!(decimal_field(summary, "absent_deduction"), decimal("3000"));
    assert_eq!(decimal_field(summary, "total_deductions"), decimal("3000"));
    assert_eq!(decimal_field(summary, "net_salary"), decimal("27000"));
}

#[tokio::test]
async fn test_hourly_salary_pays_recorded_hours_only() {
    // February 2026 has 24 working days, so the daily rate is 1000 and the
    // hourly rate 1000 / (40 / 5) = 125; two 9-hour days pay 18 * 125 = 2250
    // with no absence deductions.
    let state = create_state().await;
    let employee = create_employee(
        &state,
        json!({
            "emp_code": "EMP002",
            "name": "Ravi Nair",
            "salary_type": "hourly",
            "monthly_salary": "24000",
            "weekly_hours": "40"
        }),
    )
    .await;
    let id = employee["id"].as_str().unwrap();

    add_manual(&state, id, "2026-02-06", "09:00:00", "18:00:00").await;
    add_manual(&state, id, "2026-02-07", "09:00:00", "18:00:00").await;

    let (_, summaries) = send(&state, "GET", "/payroll?month=2026-02", None).await;
    let summary = &summaries.as_array().unwrap()[0];
    assert_eq!(decimal_field(summary, "total_hours"), decimal("18"));
    assert_eq!(decimal_field(summary, "gross_salary"), decimal("2250"));
    assert_eq!(decimal_field(summary, "absent_deduction"), decimal("0"));
    assert_eq!(decimal_field(summary, "net_salary"), decimal("2250"));
}

#[tokio::test]
async fn test_overtime_paid_at_employee_rate() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();

    // 11 hours worked, 2 beyond the 9-hour threshold, at the default 200/hour
    add_manual(&state, id, "2026-02-06", "09:00:00", "20:00:00").await;

    let (_, summaries) = send(&state, "GET", "/payroll?month=2026-02", None).await;
    let summary = &summaries.as_array().unwrap()[0];
    assert_eq!(decimal_field(summary, "total_overtime_hours"), decimal("2"));
    assert_eq!(decimal_field(summary, "overtime_pay"), decimal("400"));
}

#[tokio::test]
async fn test_late_days_penalized_at_two_percent() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    register_card(&state, "04A1B2C3", id).await;

    // 09:30 is past the 09:15 grace deadline; the full day keeps the
    // late status at clock-out. 2% of 30000 is 600 per late day.
    scan(&state, "04A1B2C3", "2026-02-06T09:30:00").await;
    scan(&state, "04A1B2C3", "2026-02-06T18:30:00").await;

    let (_, summaries) = send(&state, "GET", "/payroll?month=2026-02", None).await;
    let summary = &summaries.as_array().unwrap()[0];
    assert_eq!(summary["late_days"], 1);
    assert_eq!(decimal_field(summary, "late_penalty"), decimal("600"));
}

#[tokio::test]
async fn test_payroll_filters_by_branch() {
    let state = create_state().await;
    let (_, branches) = send(&state, "GET", "/branches", None).await;
    let main_id = branches.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();
    let (_, east) = send(
        &state,
        "POST",
        "/branches",
        Some(json!({"name": "East", "address": "12 Hill Road"})),
    )
    .await;
    let east_id = east["id"].as_str().unwrap().to_string();

    let mut body = employee_body("EMP001", "Asha Verma");
    body["branch_id"] = json!(main_id);
    create_employee(&state, body).await;

    let mut body = employee_body("EMP002", "Ravi Nair");
    body["branch_id"] = json!(east_id);
    let east_employee = create_employee(&state, body).await;

    let (status, summaries) = send(
        &state,
        "GET",
        &format!("/payroll?month=2026-02&branch_id={}", east_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["employee_id"], east_employee["id"]);
}

#[tokio::test]
async fn test_payroll_rejects_invalid_month() {
    let state = create_state().await;
    let (status, error) = send(&state, "GET", "/payroll?month=2026-13", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 3: Reports and CSV Export
// =============================================================================

#[tokio::test]
async fn test_daily_attendance_report_marks_absentees() {
    let state = create_state().await;
    let present = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    create_employee(&state, employee_body("EMP002", "Ravi Nair")).await;
    register_card(&state, "04A1B2C3", present["id"].as_str().unwrap()).await;
    scan(&state, "04A1B2C3", "2026-02-06T09:05:00").await;

    let (status, table) = send(
        &state,
        "GET",
        "/reports/daily-attendance?date=2026-02-06",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["title"], "Daily Attendance Report - 06 Feb 2026");

    let rows = table["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Roster order: the scanned employee first
    assert_eq!(rows[0][0], "Asha Verma");
    assert_eq!(rows[0][3], "09:05");
    assert_eq!(rows[0][6], "Present");
    assert_eq!(rows[1][0], "Ravi Nair");
    assert_eq!(rows[1][3], "Absent");
    assert_eq!(rows[1][6], "Absent");
}

#[tokio::test]
async fn test_monthly_attendance_report_tallies() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    register_card(&state, "04A1B2C3", id).await;

    add_manual(&state, id, "2026-02-06", "09:00:00", "18:00:00").await;
    add_manual(&state, id, "2026-02-07", "09:00:00", "18:00:00").await;
    // A scanned late day: 09:30 is past the grace deadline.
    scan(&state, "04A1B2C3", "2026-02-09T09:30:00").await;
    scan(&state, "04A1B2C3", "2026-02-09T18:30:00").await;

    let (status, table) = send(
        &state,
        "GET",
        "/reports/monthly-attendance?month=2026-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // February 2026 has 24 working days; 3 attended, 21 absent
    let row = &table["rows"].as_array().unwrap()[0];
    assert_eq!(row[2], "3"); // present (late days count as present)
    assert_eq!(row[3], "0"); // half days
    assert_eq!(row[4], "1"); // late
    assert_eq!(row[5], "21"); // absent
    assert_eq!(row[6], "27.0"); // total hours
    assert_eq!(row[7], "0.0"); // overtime hours
}

#[tokio::test]
async fn test_late_report_lists_dates() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    create_employee(&state, employee_body("EMP002", "Ravi Nair")).await;
    let id = employee["id"].as_str().unwrap();
    register_card(&state, "04A1B2C3", id).await;

    scan(&state, "04A1B2C3", "2026-02-06T09:30:00").await;
    scan(&state, "04A1B2C3", "2026-02-06T18:00:00").await;
    scan(&state, "04A1B2C3", "2026-02-09T09:45:00").await;
    scan(&state, "04A1B2C3", "2026-02-09T18:00:00").await;

    let (_, table) = send(&state, "GET", "/reports/late-report?month=2026-02", None).await;
    let rows = table["rows"].as_array().unwrap();
    // Only the employee with late arrivals appears
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Asha Verma");
    assert_eq!(rows[0][2], "2");
    assert_eq!(rows[0][3], "06 Feb 2026, 09 Feb 2026");
}

#[tokio::test]
async fn test_overtime_report_includes_pay() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    create_employee(&state, employee_body("EMP002", "Ravi Nair")).await;
    let id = employee["id"].as_str().unwrap();

    add_manual(&state, id, "2026-02-06", "09:00:00", "20:00:00").await;

    let (_, table) = send(
        &state,
        "GET",
        "/reports/overtime-report?month=2026-02",
        None,
    )
    .await;
    let rows = table["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "2.0");
    assert_eq!(rows[0][3], "₹400");
}

#[tokio::test]
async fn test_payroll_report_formats_rupees() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();

    // Full attendance: no deductions
    for date in feb_2026_working_days(&[]) {
        add_manual(&state, id, &date, "09:00:00", "18:00:00").await;
    }

    let (_, table) = send(&state, "GET", "/reports/payroll-report?month=2026-02", None).await;
    let row = &table["rows"].as_array().unwrap()[0];
    assert_eq!(row[2], "₹30,000"); // salary
    assert_eq!(row[3], "24"); // present
    assert_eq!(row[4], "0"); // absent
    assert_eq!(row[5], "₹0"); // deductions
    assert_eq!(row[7], "₹30,000"); // net pay
}

#[tokio::test]
async fn test_csv_export_quotes_fields_and_names_file() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();
    for date in feb_2026_working_days(&[]) {
        add_manual(&state, id, &date, "09:00:00", "18:00:00").await;
    }

    let (status, disposition, text) =
        get_csv(&state, "/reports/payroll-report/csv?month=2026-02").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition,
        "attachment; filename=\"Payroll_Report_-_2026-02.csv\""
    );

    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Name,Emp ID,Salary,Present,Absent,Deductions,OT Pay,Net Pay"
    );
    // Quoting keeps the grouped amount as a single field
    let data = lines.next().unwrap();
    assert!(data.contains("\"₹30,000\""));
    assert!(data.starts_with("\"Asha Verma\",\"EMP001\""));
}

// =============================================================================
// SECTION 4: Registry and Administration
// =============================================================================

#[tokio::test]
async fn test_first_load_seeds_branch_and_admin() {
    let state = create_state().await;

    let (_, branches) = send(&state, "GET", "/branches", None).await;
    let branches = branches.as_array().unwrap().clone();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0]["name"], "Main Branch");

    let (_, users) = send(&state, "GET", "/users", None).await;
    let users = users.as_array().unwrap().clone();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "admin");
    assert_eq!(users[0]["role"], "super_admin");
    assert_eq!(users[0]["branch_id"], branches[0]["id"]);
}

#[tokio::test]
async fn test_employee_creation_seeds_login_account() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP007", "Meera Iyer")).await;

    let (status, account) = send(
        &state,
        "POST",
        "/login",
        Some(json!({"username": "emp007", "password": "emp123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["role"], "employee");
    assert_eq!(account["employee_id"], employee["id"]);
}

#[tokio::test]
async fn test_duplicate_card_registration_rejected() {
    let state = create_state().await;
    let first = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let second = create_employee(&state, employee_body("EMP002", "Ravi Nair")).await;

    let (status, _) = register_card(&state, "04A1B2C3", first["id"].as_str().unwrap()).await;
    assert_eq!(status, StatusCode::OK);

    // Same uid in a different case is still the same card
    let (status, error) = register_card(&state, "04a1b2c3", second["id"].as_str().unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deleting_employee_revokes_login() {
    let state = create_state().await;
    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    let id = employee["id"].as_str().unwrap();

    let login = json!({"username": "emp001", "password": "emp123"});
    let (status, _) = send(&state, "POST", "/login", Some(login.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, "DELETE", &format!("/employees/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&state, "POST", "/login", Some(login)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_last_super_admin_cannot_be_deleted() {
    let state = create_state().await;
    let (_, users) = send(&state, "GET", "/users", None).await;
    let admin_id = users.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();

    let (status, error) = send(&state, "DELETE", &format!("/users/{}", admin_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    // With a second super admin in place the first can go
    let (status, _) = send(
        &state,
        "POST",
        "/users",
        Some(json!({
            "username": "backup",
            "password": "backup123",
            "name": "Backup Admin",
            "role": "super_admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, "DELETE", &format!("/users/{}", admin_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, users) = send(&state, "GET", "/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_holiday_shrinks_working_days() {
    let state = create_state().await;
    create_employee(&state, employee_body("EMP001", "Asha Verma")).await;

    // January 2026 has 27 working days before any holidays
    let (_, summaries) = send(&state, "GET", "/payroll?month=2026-01", None).await;
    assert_eq!(summaries.as_array().unwrap()[0]["total_working_days"], 27);

    add_holiday(&state, "2026-01-26", "Republic Day").await;

    let (_, summaries) = send(&state, "GET", "/payroll?month=2026-01", None).await;
    assert_eq!(summaries.as_array().unwrap()[0]["total_working_days"], 26);
}

// =============================================================================
// SECTION 5: Storage Failure Behavior
// =============================================================================

/// A store whose writes can be switched off to exercise failure paths.
struct FlakyStore {
    inner: MemoryKvStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        FlakyStore {
            inner: MemoryKvStore::new(),
            fail_writes: AtomicBool::new(false),
        }
    }

    fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> EngineResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> EngineResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EngineError::Storage {
                message: "write rejected by backend".to_string(),
            });
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> EngineResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EngineError::Storage {
                message: "delete rejected by backend".to_string(),
            });
        }
        self.inner.delete(key).await
    }
}

#[tokio::test]
async fn test_failed_write_returns_503_and_keeps_state() {
    let store = Arc::new(FlakyStore::new());
    let service = AppService::load(store.clone()).await.unwrap();
    let state = AppState::new(service);

    store.fail_writes(true);
    let (status, error) = send(
        &state,
        "POST",
        "/employees",
        Some(employee_body("EMP001", "Asha Verma")),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error["code"], "STORAGE_ERROR");

    store.fail_writes(false);
    let (_, employees) = send(&state, "GET", "/employees", None).await;
    assert!(employees.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_scan_write_does_not_advance_the_day() {
    let store = Arc::new(FlakyStore::new());
    let service = AppService::load(store.clone()).await.unwrap();
    let state = AppState::new(service);

    let employee = create_employee(&state, employee_body("EMP001", "Asha Verma")).await;
    register_card(&state, "04A1B2C3", employee["id"].as_str().unwrap()).await;

    store.fail_writes(true);
    let (status, error) = scan(&state, "04A1B2C3", "2026-02-06T09:00:00").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error["code"], "STORAGE_ERROR");

    // The failed clock-in never happened, so the next scan opens the day
    store.fail_writes(false);
    let (status, result) = scan(&state, "04A1B2C3", "2026-02-06T09:05:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["action"], "clock_in");
    assert_eq!(result["record"]["in_time"], "2026-02-06T09:05:00");
}
