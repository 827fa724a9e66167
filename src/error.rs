//! Error types for the attendance and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur while processing scans,
//! computing payroll, or talking to the storage collaborator.
//!
//! Card-scan rejections (unknown card, blocked card, and so on) are *not*
//! errors: they are classified outcomes carried by
//! [`ScanRejection`](crate::calculation::ScanRejection) so the operator
//! surface can render them as data.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the attendance and payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attend_engine::error::EngineError;
///
/// let error = EngineError::Storage {
///     message: "write rejected by backend".to_string(),
/// };
/// assert_eq!(error.to_string(), "Storage failure: write rejected by backend");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request or entity field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An operation referenced an employee id that does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that could not be resolved.
        employee_id: Uuid,
    },

    /// A registry operation referenced a card uid that does not exist.
    #[error("Card not found: {uid}")]
    CardNotFound {
        /// The card uid that could not be resolved.
        uid: String,
    },

    /// A read or write to the storage collaborator failed, or a stored
    /// document had an unexpected shape.
    ///
    /// Callers must not advance in-memory state as if a failed write had
    /// succeeded.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A payroll figure could not be derived from the given inputs.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
