//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints and
//! the router that wires them together.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AttendanceSettings;
use crate::error::EngineError;
use crate::report::{report_filename, to_csv, ReportKind};

use super::request::{
    BranchRequest, EmployeeRequest, HolidayRequest, LoginRequest, ManualEntryRequest,
    PayrollQuery, RegisterCardRequest, ReportQuery, ScanRequest, UserRequest,
};
use super::response::{ApiError, ApiErrorResponse, ScanResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/scan", post(scan_handler))
        .route("/attendance/manual", post(manual_entry_handler))
        .route("/payroll", get(payroll_handler))
        .route("/reports/:kind", get(report_handler))
        .route("/reports/:kind/csv", get(report_csv_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/:id",
            axum::routing::put(update_employee_handler).delete(delete_employee_handler),
        )
        .route("/cards", get(list_cards_handler).post(register_card_handler))
        .route("/cards/:uid", axum::routing::delete(remove_card_handler))
        .route("/cards/:uid/block", post(block_card_handler))
        .route("/cards/:uid/unblock", post(unblock_card_handler))
        .route(
            "/holidays",
            get(list_holidays_handler).post(add_holiday_handler),
        )
        .route(
            "/holidays/:id",
            axum::routing::delete(remove_holiday_handler),
        )
        .route("/branches", get(list_branches_handler).post(add_branch_handler))
        .route(
            "/settings",
            get(get_settings_handler).put(put_settings_handler),
        )
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/:id", axum::routing::delete(delete_user_handler))
        .route("/login", post(login_handler))
        .route("/reset", post(reset_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error body.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Renders a 200 response with an explicit JSON content type.
fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Renders a 400 response carrying the given error body.
fn bad_request(error: ApiError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Renders an engine error with its mapped status code.
fn engine_error(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /scan.
///
/// Interprets one card scan and returns the attendance transition, or a
/// classified rejection with `action` set to `rejected`. Rejections are
/// 200s; only engine failures map to error statuses.
async fn scan_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let now = request.at.unwrap_or_else(|| Local::now().naive_local());
    info!(correlation_id = %correlation_id, uid = %request.uid, at = %now, "Processing scan");

    match state.service().scan(&request.uid, now).await {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                action = outcome.action(),
                "Scan processed"
            );
            json_ok(ScanResponse::from(outcome))
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /attendance/manual.
async fn manual_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManualEntryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        date = %request.date,
        "Adding manual attendance entry"
    );

    match state
        .service()
        .add_manual_entry(request.employee_id, request.date, request.in_time, request.out_time)
        .await
    {
        Ok(record) => json_ok(record),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /payroll.
///
/// Computes the payroll summaries for one month, optionally restricted
/// to a branch.
async fn payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return bad_request(ApiError::validation_error(rejection.body_text()));
        }
    };

    info!(correlation_id = %correlation_id, month = %query.month, "Computing payroll");

    let start_time = Instant::now();
    match state
        .service()
        .payroll_for_month(query.month, query.branch_id)
        .await
    {
        Ok(summaries) => {
            info!(
                correlation_id = %correlation_id,
                employees = summaries.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Payroll computed"
            );
            json_ok(summaries)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /reports/:kind.
async fn report_handler(
    State(state): State<AppState>,
    kind: Result<Path<ReportKind>, PathRejection>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match build_report_table(&state, kind, query, correlation_id).await {
        Ok(table) => json_ok(table),
        Err(response) => response,
    }
}

/// Handler for GET /reports/:kind/csv.
///
/// Renders the same table as the JSON endpoint, as a CSV attachment
/// named after the report title.
async fn report_csv_handler(
    State(state): State<AppState>,
    kind: Result<Path<ReportKind>, PathRejection>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match build_report_table(&state, kind, query, correlation_id).await {
        Ok(table) => {
            let filename = report_filename(&table.title);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                to_csv(&table),
            )
                .into_response()
        }
        Err(response) => response,
    }
}

/// Resolves the report kind and query, then builds the table.
///
/// Shared by the JSON and CSV report handlers; the error side is the
/// fully rendered failure response.
async fn build_report_table(
    state: &AppState,
    kind: Result<Path<ReportKind>, PathRejection>,
    query: Result<Query<ReportQuery>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<crate::report::ReportTable, Response> {
    let kind = match kind {
        Ok(Path(kind)) => kind,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Unknown report kind");
            return Err(bad_request(ApiError::validation_error(
                "unknown report kind",
            )));
        }
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return Err(bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    info!(correlation_id = %correlation_id, kind = %kind, "Building report");

    state
        .service()
        .build_report(kind, query.date, query.month, query.branch_id)
        .await
        .map_err(|err| engine_error(correlation_id, err))
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_ok(state.service().list_employees().await)
}

/// Handler for POST /employees.
///
/// Creates the employee, seeds a login account, and registers the card
/// when a uid is supplied.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let (employee, card_uid) = request.into_employee(Uuid::new_v4());
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        emp_code = %employee.emp_code,
        "Creating employee"
    );

    let registered_at = Local::now().naive_local();
    match state
        .service()
        .create_employee(employee, card_uid, registered_at)
        .await
    {
        Ok(created) => json_ok(created),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for PUT /employees/:id.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    // card_uid only applies on create; the card endpoints own registration
    let (employee, _card_uid) = request.into_employee(id);
    info!(correlation_id = %correlation_id, employee_id = %id, "Updating employee");

    match state.service().update_employee(employee).await {
        Ok(updated) => json_ok(updated),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /employees/:id.
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Deleting employee");
    match state.service().delete_employee(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /cards.
async fn list_cards_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_ok(state.service().list_cards().await)
}

/// Handler for POST /cards.
async fn register_card_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterCardRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    info!(
        correlation_id = %correlation_id,
        uid = %request.uid,
        employee_id = %request.employee_id,
        "Registering card"
    );

    let registered_at = Local::now().naive_local();
    match state
        .service()
        .register_card(&request.uid, request.employee_id, registered_at)
        .await
    {
        Ok(card) => json_ok(card),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /cards/:uid/block.
async fn block_card_handler(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, uid = %uid, "Blocking card");
    match state.service().set_card_blocked(&uid, true).await {
        Ok(card) => json_ok(card),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /cards/:uid/unblock.
async fn unblock_card_handler(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, uid = %uid, "Unblocking card");
    match state.service().set_card_blocked(&uid, false).await {
        Ok(card) => json_ok(card),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /cards/:uid.
async fn remove_card_handler(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, uid = %uid, "Removing card");
    match state.service().remove_card(&uid).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /holidays.
async fn list_holidays_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_ok(state.service().list_holidays().await)
}

/// Handler for POST /holidays.
async fn add_holiday_handler(
    State(state): State<AppState>,
    payload: Result<Json<HolidayRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    info!(correlation_id = %correlation_id, date = %request.date, "Adding holiday");
    match state.service().add_holiday(request.date, request.name).await {
        Ok(holiday) => json_ok(holiday),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /holidays/:id.
async fn remove_holiday_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.service().remove_holiday(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /branches.
async fn list_branches_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_ok(state.service().list_branches().await)
}

/// Handler for POST /branches.
async fn add_branch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BranchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    info!(correlation_id = %correlation_id, name = %request.name, "Adding branch");
    match state.service().add_branch(request.name, request.address).await {
        Ok(branch) => json_ok(branch),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /settings.
async fn get_settings_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_ok(state.service().settings().await)
}

/// Handler for PUT /settings.
///
/// The body is the full settings document; partial updates are not
/// supported.
async fn put_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceSettings>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let settings = match payload {
        Ok(Json(settings)) => settings,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    info!(correlation_id = %correlation_id, "Saving settings");
    match state.service().save_settings(settings.clone()).await {
        Ok(()) => json_ok(settings),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /users.
async fn list_users_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_ok(state.service().list_users().await)
}

/// Handler for POST /users.
async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let account = request.into_account(Uuid::new_v4());
    info!(
        correlation_id = %correlation_id,
        username = %account.username,
        role = %account.role,
        "Creating user account"
    );

    match state.service().create_user(account).await {
        Ok(created) => json_ok(created),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /users/:id.
async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %id, "Deleting user account");
    match state.service().delete_user(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /login.
///
/// Returns the matched account, or 401 when no account matches.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    match state.service().login(&request.username, &request.password).await {
        Some(account) => json_ok(account),
        None => {
            warn!(correlation_id = %correlation_id, username = %request.username, "Login rejected");
            (
                StatusCode::UNAUTHORIZED,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::invalid_credentials()),
            )
                .into_response()
        }
    }
}

/// Handler for POST /reset.
///
/// Clears every stored collection and reseeds the defaults.
async fn reset_handler(State(state): State<AppState>) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    warn!(correlation_id = %correlation_id, "Resetting all engine data");
    match state.service().reset_all().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}
