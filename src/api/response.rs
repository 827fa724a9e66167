//! Response types for the attendance engine API.
//!
//! This module defines the error response structures, the scan response
//! envelope, and the mapping from engine errors to HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::calculation::ScanOutcome;
use crate::error::EngineError;
use crate::models::AttendanceRecord;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates the rejected-login error response.
    pub fn invalid_credentials() -> Self {
        Self::new("INVALID_CREDENTIALS", "Invalid username or password")
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing field error response.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_details(
            "MISSING_FIELD",
            format!("missing field: {}", field),
            format!("Required field '{}' was not provided in the request", field),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid {}: {}", field, message),
                    "The request contained a value the engine cannot accept",
                ),
            },
            EngineError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    format!("Employee not found: {}", employee_id),
                    "No employee with this id exists in the roster",
                ),
            },
            EngineError::CardNotFound { uid } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "CARD_NOT_FOUND",
                    format!("Card not found: {}", uid),
                    "No card with this uid is registered",
                ),
            },
            EngineError::Storage { message } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    "Storage backend failure",
                    message,
                ),
            },
            EngineError::Calculation { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    message,
                ),
            },
        }
    }
}

/// Response body for the `/scan` endpoint.
///
/// Rejections ride the same envelope with `action` set to `rejected`;
/// they are classified outcomes, not HTTP errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    /// What the scan did: `clock_in`, `clock_out`, or `rejected`.
    pub action: String,
    /// The attendance record written, for clock-in and clock-out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
    /// Stable rejection code, for rejected scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable rejection message, for rejected scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ScanOutcome> for ScanResponse {
    fn from(outcome: ScanOutcome) -> Self {
        let action = outcome.action().to_string();
        match outcome {
            ScanOutcome::ClockIn { record } | ScanOutcome::ClockOut { record } => ScanResponse {
                action,
                record: Some(record),
                reason: None,
                message: None,
            },
            ScanOutcome::Rejected { reason } => ScanResponse {
                action,
                record: None,
                reason: Some(reason.code().to_string()),
                message: Some(reason.to_string()),
            },
        }
    }
}
