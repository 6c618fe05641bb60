// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Letter submission, listing, opening, and finalization endpoints.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use lettera_core::{Letter, LetterStatus, LetteraError};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::{CallerId, require_employee};
use crate::server::AppState;

/// Request body for POST /api/letters.
#[derive(Debug, Deserialize)]
pub struct SubmitLetterRequest {
    pub text: String,
}

/// Optional status filter for letter listings.
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    #[serde(default)]
    pub status: Option<String>,
}

/// Request body for POST /api/employees/letters/{id}/send.
#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    pub final_response: String,
}

/// Response body for POST /api/employees/letters/{id}/send.
#[derive(Debug, Serialize)]
pub struct FinalizeResponse {
    pub message: String,
    pub letter_id: i64,
}

fn parse_status_filter(filter: &StatusFilter) -> Result<Option<LetterStatus>, ApiError> {
    match &filter.status {
        None => Ok(None),
        Some(raw) => LetterStatus::from_str(raw).map(Some).map_err(|_| {
            ApiError(LetteraError::Validation(format!(
                "unknown status `{raw}`"
            )))
        }),
    }
}

/// POST /api/letters
///
/// Submit a customer letter. Draft generation runs synchronously; the
/// response carries the stored letter with category and draft when
/// generation succeeded, or a bare `waiting` letter when it did not.
pub async fn submit_letter(
    State(state): State<AppState>,
    caller: CallerId,
    Json(body): Json<SubmitLetterRequest>,
) -> Result<Json<Letter>, ApiError> {
    let letter = state.letters.submit(caller.0, &body.text).await?;
    Ok(Json(letter))
}

/// GET /api/letters
///
/// List the calling customer's letters, newest first.
pub async fn list_letters(
    State(state): State<AppState>,
    caller: CallerId,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<Letter>>, ApiError> {
    let status = parse_status_filter(&filter)?;
    let letters = state.letters.list_user_letters(caller.0, status).await?;
    Ok(Json(letters))
}

/// GET /api/letters/{id}
///
/// Fetch one letter with ownership checks: customers see only their own
/// letters, employees only letters routable to them.
pub async fn get_letter(
    State(state): State<AppState>,
    caller: CallerId,
    Path(letter_id): Path<i64>,
) -> Result<Json<Letter>, ApiError> {
    let letter = match state.letters.employee_for_user(caller.0).await? {
        Some(employee) => {
            state
                .letters
                .get_letter_for_employee(letter_id, employee.id)
                .await?
        }
        None => state.letters.get_letter_for_user(letter_id, caller.0).await?,
    };
    Ok(Json(letter))
}

/// GET /api/employees/letters
///
/// The calling employee's work queue: letters in their category, newest
/// first, optionally filtered by status.
pub async fn employee_queue(
    State(state): State<AppState>,
    caller: CallerId,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<Letter>>, ApiError> {
    let employee = require_employee(&state, &caller).await?;
    let status = parse_status_filter(&filter)?;
    let letters = state
        .letters
        .list_employee_letters(employee.id, status)
        .await?;
    Ok(Json(letters))
}

/// POST /api/employees/letters/{id}/open
///
/// Open a letter for work; the first open assigns it and moves it to
/// `in_progress`.
pub async fn open_letter(
    State(state): State<AppState>,
    caller: CallerId,
    Path(letter_id): Path<i64>,
) -> Result<Json<Letter>, ApiError> {
    let employee = require_employee(&state, &caller).await?;
    let letter = state.letters.open_letter(letter_id, employee.id).await?;
    Ok(Json(letter))
}

/// POST /api/employees/letters/{id}/send
///
/// Send the final response to the customer.
pub async fn finalize(
    State(state): State<AppState>,
    caller: CallerId,
    Path(letter_id): Path<i64>,
    Json(body): Json<FinalizeRequest>,
) -> Result<Json<FinalizeResponse>, ApiError> {
    let employee = require_employee(&state, &caller).await?;
    state
        .letters
        .finalize(letter_id, employee.id, &body.final_response)
        .await?;
    Ok(Json(FinalizeResponse {
        message: "final response sent".to_string(),
        letter_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parses_known_values() {
        let filter = StatusFilter {
            status: Some("in_progress".into()),
        };
        assert_eq!(
            parse_status_filter(&filter).unwrap(),
            Some(LetterStatus::InProgress)
        );

        let none = StatusFilter { status: None };
        assert_eq!(parse_status_filter(&none).unwrap(), None);
    }

    #[test]
    fn status_filter_rejects_unknown_values() {
        let filter = StatusFilter {
            status: Some("done".into()),
        };
        assert!(parse_status_filter(&filter).is_err());
    }
}
