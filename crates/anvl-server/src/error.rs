//! HTTP error types for the ANVL server.
//!
//! Maps relay and request errors into HTTP responses. Every error produces
//! a JSON body of the form `{"error": "..."}`, which is the shape the site's
//! forms read.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use anvl_core::error::RelayError;

/// Message returned whenever the mailer fails.
pub const SEND_FAILED: &str = "Failed to send message";

/// Application-level error returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client sent invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The mail dependency failed; details are logged, not returned.
    #[error("failed to send message")]
    SendFailed,
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::SendFailed => (StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED.to_owned()),
        };

        (status, axum::Json(ErrorBody { error })).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::InvalidPayload(inner) => Self::BadRequest(inner.to_string()),
            // Already logged with context by the relay.
            RelayError::Dispatch(_) => Self::SendFailed,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
