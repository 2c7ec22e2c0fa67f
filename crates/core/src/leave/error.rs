//! Leave workflow error types.
//!
//! This module defines all error types that can occur during the
//! leave request lifecycle: application, cancellation, and decision.

use thiserror::Error;
use uuid::Uuid;

use crate::leave::types::LeaveStatus;

/// Errors that can occur during leave operations.
#[derive(Debug, Error)]
pub enum LeaveError {
    /// A required field was missing from the request.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The start date is after the end date.
    #[error("Start date cannot be after end date")]
    InvalidDateRange,

    /// The decision value is neither approved nor rejected.
    #[error("Invalid status provided. Status must be 'approved' or 'rejected'")]
    InvalidDecision(String),

    /// The request is not pending, so it cannot be decided or cancelled.
    #[error("Cannot change a leave request that is already {status}")]
    AlreadyDecided {
        /// The current (terminal) status of the request.
        status: LeaveStatus,
    },

    /// The employee's remaining balance is smaller than the requested duration.
    #[error("Not enough remaining leaves. Remaining: {remaining}, Requested: {requested}")]
    InsufficientBalance {
        /// Days the employee still has available.
        remaining: i32,
        /// Days the request would consume.
        requested: i32,
    },

    /// Leave request not found.
    #[error("Leave request {0} not found")]
    LeaveNotFound(Uuid),

    /// The employee behind a request no longer exists.
    #[error("Associated employee not found for this leave request")]
    EmployeeNotFound,

    /// The caller does not own the leave request.
    #[error("Not authorized to modify this leave request")]
    NotRequestOwner,

    /// The employee ledger changed under us and retries were exhausted.
    #[error("Leave balance was modified concurrently; please retry")]
    ConcurrentUpdate,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LeaveError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) | Self::InvalidDateRange | Self::InvalidDecision(_) => 400,
            Self::NotRequestOwner => 403,
            Self::LeaveNotFound(_) | Self::EmployeeNotFound => 404,
            Self::AlreadyDecided { .. }
            | Self::InsufficientBalance { .. }
            | Self::ConcurrentUpdate => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::InvalidDecision(_) => "INVALID_DECISION",
            Self::AlreadyDecided { .. } => "ALREADY_DECIDED",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::LeaveNotFound(_) => "LEAVE_NOT_FOUND",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::NotRequestOwner => "NOT_REQUEST_OWNER",
            Self::ConcurrentUpdate => "CONCURRENT_UPDATE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
