// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-based draft revision endpoints.

use axum::Json;
use axum::extract::{Path, State};
use lettera_core::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::{CallerId, require_employee};
use crate::server::AppState;

/// Request body for POST /api/employees/letters/{id}/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for POST /api/employees/letters/{id}/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub assistant_reply: String,
    pub updated_draft: String,
}

/// POST /api/employees/letters/{id}/chat
///
/// Apply one edit instruction to the letter's draft. The employee turn is
/// recorded even when generation fails, so a 502 response still leaves the
/// instruction visible in the history for a retry.
pub async fn post_message(
    State(state): State<AppState>,
    caller: CallerId,
    Path(letter_id): Path<i64>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let employee = require_employee(&state, &caller).await?;
    let revision = state
        .revisions
        .revise(letter_id, employee.id, &body.message)
        .await?;
    Ok(Json(ChatResponse {
        assistant_reply: revision.assistant_reply,
        updated_draft: revision.updated_draft,
    }))
}

/// GET /api/employees/letters/{id}/chat
///
/// The full revision history for a letter, oldest first.
pub async fn history(
    State(state): State<AppState>,
    caller: CallerId,
    Path(letter_id): Path<i64>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let employee = require_employee(&state, &caller).await?;
    let messages = state.revisions.chat_history(letter_id, employee.id).await?;
    Ok(Json(messages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_deserializes() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "Сделай короче"}"#).unwrap();
        assert_eq!(req.message, "Сделай короче");
    }

    #[test]
    fn chat_response_serializes_both_fields() {
        let resp = ChatResponse {
            assistant_reply: "Краткий ответ".into(),
            updated_draft: "Краткий ответ".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"assistant_reply\""));
        assert!(json.contains("\"updated_draft\""));
    }
}
