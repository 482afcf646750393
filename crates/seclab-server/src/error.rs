// SPDX-License-Identifier: Apache-2.0

//! Conversion from core errors to HTTP responses.
//!
//! Every failure becomes a JSON body of the form `{"error": "<message>"}`.
//! Server faults are logged in full and answered with a fixed message so
//! driver and filesystem details never reach the client.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use seclab_core::{LabError, Rejection};
use serde::Serialize;

/// An HTTP error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// Builds an error with an explicit status and client-facing message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Converts a core error.
    ///
    /// `server_message` is sent instead of the error text for server faults.
    #[must_use]
    pub fn from_lab(err: LabError, server_message: &str) -> Self {
        let status = match &err {
            LabError::Validation { .. } => StatusCode::BAD_REQUEST,
            LabError::Auth => StatusCode::UNAUTHORIZED,
            LabError::Conflict { .. } => StatusCode::CONFLICT,
            LabError::Store(_) | LabError::Config { .. } | LabError::Io(_) => {
                tracing::error!(error = %err, "Request failed");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, server_message);
            }
        };
        Self::new(status, err.to_string())
    }

    /// Logs `err` and returns a 500 carrying only `message`.
    pub fn internal(err: &dyn std::fmt::Display, message: &str) -> Self {
        tracing::error!(error = %err, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        let status = if rejection.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::NOT_FOUND
        };
        Self::new(status, rejection.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::new(StatusCode::BAD_REQUEST, "Invalid JSON body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}
