// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use vintra_core::VintraError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Wrapper making [`VintraError`] usable as an axum handler error.
///
/// Status mapping: missing ids are 404, id conflicts 409, client input
/// errors 400, storage failures 503, anything else 500.
#[derive(Debug)]
pub struct ApiError(pub VintraError);

impl From<VintraError> for ApiError {
    fn from(err: VintraError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            VintraError::NotFound { .. } => StatusCode::NOT_FOUND,
            VintraError::DuplicateId { .. } => StatusCode::CONFLICT,
            VintraError::Validation(_) => StatusCode::BAD_REQUEST,
            VintraError::Storage { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
