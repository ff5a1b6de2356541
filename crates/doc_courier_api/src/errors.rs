//! Error handling and HTTP error conversion
//!
//! Domain errors are turned into HTTP responses here, at the HTTP boundary.
//! Every error response has the same shape: `{ "error": "<message>" }`.
//! Problems with the request map to 400; everything else maps to 500 and
//! carries the underlying error message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use doc_courier_core::{CourierError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned from handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is missing something required
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body could not be read as a request
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The GitHub client could not be set up
    #[error(transparent)]
    Client(#[from] github_client::Error),

    /// Publishing failed part way
    #[error(transparent)]
    Publish(#[from] CourierError),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidBody(err.to_string())
    }
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Client(_) | ApiError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log_error(&self, status);

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(status = %status, error = %error, "Request failed");
    } else {
        tracing::warn!(status = %status, error = %error, "Request rejected");
    }
}
