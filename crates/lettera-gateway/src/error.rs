// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP error mapping for the REST API.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl maps
//! the core error taxonomy onto HTTP statuses with a `{"error": "..."}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lettera_core::LetteraError;
use serde::Serialize;
use tracing::error;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// Wrapper turning [`LetteraError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub LetteraError);

impl From<LetteraError> for ApiError {
    fn from(err: LetteraError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LetteraError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            LetteraError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            LetteraError::Forbidden(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            LetteraError::InvalidState(_) => (StatusCode::CONFLICT, self.0.to_string()),
            LetteraError::Generation { .. } => (StatusCode::BAD_GATEWAY, self.0.to_string()),
            LetteraError::Storage { .. }
            | LetteraError::Config(_)
            | LetteraError::Internal(_) => {
                // Internals are logged, not leaked to the caller.
                error!(error = %self.0, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
