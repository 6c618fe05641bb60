// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the REST API.
//!
//! Caller identity travels as the explicit `X-User-Id` header; there is no
//! process-wide identity state. Employee endpoints resolve the header to the
//! caller's employee record before doing any work.

pub mod auth;
pub mod chat;
pub mod letters;
pub mod stats;

use axum::Json;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use lettera_core::{Employee, LetteraError};
use serde::Serialize;

use crate::error::ApiError;
use crate::server::AppState;

/// Authenticated caller id, extracted from the `X-User-Id` header.
///
/// This replaces the original UI's implicit client-side session store with
/// an explicit per-request value.
pub struct CallerId(pub i64);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError(LetteraError::Validation(
                    "missing X-User-Id header".into(),
                ))
            })?;
        let id = value.parse::<i64>().map_err(|_| {
            ApiError(LetteraError::Validation(format!(
                "invalid X-User-Id header `{value}`"
            )))
        })?;
        Ok(CallerId(id))
    }
}

/// Resolve the calling account to its employee record, or reject.
pub(crate) async fn require_employee(
    state: &AppState,
    caller: &CallerId,
) -> Result<Employee, ApiError> {
    state
        .letters
        .employee_for_user(caller.0)
        .await?
        .ok_or_else(|| {
            ApiError(LetteraError::Forbidden(
                "this endpoint requires an employee account".into(),
            ))
        })
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

/// GET /health
///
/// Returns service status; unauthenticated.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
