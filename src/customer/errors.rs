//! # Customer Errors
//!
//! Error types for the customer registry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for persistence operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for customer operations
pub type CustomerResult<T> = Result<T, CustomerError>;

/// Persistence layer errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Another record already holds this alias (case-insensitive)
    #[error("Alias already taken: {0}")]
    AliasTaken(String),

    /// Reading or writing the backing document failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Backing document exists but does not hold a customer document
    #[error("Corrupt customer document: {0}")]
    Corrupt(String),

    /// No unused numeric id remains above the highest one in use
    #[error("Customer id space exhausted")]
    IdsExhausted,

    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Customer API errors
#[derive(Debug, Clone, Error)]
pub enum CustomerError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Missing or insufficient input
    #[error("{0}")]
    Validation(String),

    /// Alias collision
    #[error("Customer with this alias already exists")]
    Conflict,

    /// Unknown id, alias or name
    #[error("Customer not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Backing document could not be read or written
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl CustomerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CustomerError::Validation(msg.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CustomerError::Validation(_) => StatusCode::BAD_REQUEST,
            CustomerError::Conflict => StatusCode::CONFLICT,
            CustomerError::NotFound => StatusCode::NOT_FOUND,
            CustomerError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for CustomerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AliasTaken(_) => CustomerError::Conflict,
            other => CustomerError::Persistence(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<CustomerError> for ErrorResponse {
    fn from(err: CustomerError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                event = crate::observability::Event::PersistFailed.as_str(),
                error = %self,
                "request failed"
            );
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
