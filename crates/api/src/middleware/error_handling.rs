//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Bookwise
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, so every endpoint reports failures the same way.
//!
//! Each response body carries both a machine-readable `kind` and a
//! human-readable `error` message; a conflict tells the client to refresh
//! availability and retry, while an eligibility failure tells it to pick
//! different staff.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use bookwise_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `BookingError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::NotEligible(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "kind": self.0.kind(),
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Allows using the `?` operator with functions that return
/// `Result<T, BookingError>` inside handlers returning
/// `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Repository errors surface as the database variant; transient data-access
/// failures must never read as "no availability".
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}
