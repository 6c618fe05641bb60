// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the YandexGPT foundation-models completion API.

use serde::{Deserialize, Serialize};

/// Request body for the completion endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPayload {
    /// Fully qualified model URI, e.g. `gpt://{folder_id}/yandexgpt/latest`.
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    pub messages: Vec<ApiMessage>,
}

/// Generation options accepted by the completion endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// One message in the completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// `system`, `user`, or `assistant`.
    pub role: String,
    pub text: String,
}

/// Top-level success response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub result: CompletionResult,
}

/// The completion result wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub model_version: Option<String>,
}

/// One generated alternative. The API returns the best alternative first.
#[derive(Debug, Clone, Deserialize)]
pub struct Alternative {
    pub message: ApiMessage,
    #[serde(default)]
    pub status: Option<String>,
}

/// Token accounting. The API serializes counts as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub input_text_tokens: Option<String>,
    #[serde(default)]
    pub completion_tokens: Option<String>,
    #[serde(default)]
    pub total_tokens: Option<String>,
}

/// Error body returned by Yandex Cloud APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail inside an [`ApiErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub http_code: Option<u16>,
    #[serde(default)]
    pub http_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let payload = CompletionPayload {
            model_uri: "gpt://folder/yandexgpt/latest".into(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: 0.6,
                max_tokens: 2000,
            },
            messages: vec![ApiMessage {
                role: "user".into(),
                text: "Привет".into(),
            }],
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"modelUri\""));
        assert!(json.contains("\"completionOptions\""));
        assert!(json.contains("\"maxTokens\":2000"));
        assert!(json.contains("\"stream\":false"));
    }

    #[test]
    fn response_deserializes_alternatives_and_usage() {
        let body = serde_json::json!({
            "result": {
                "alternatives": [{
                    "message": {"role": "assistant", "text": "Здравствуйте!"},
                    "status": "ALTERNATIVE_STATUS_FINAL"
                }],
                "usage": {
                    "inputTextTokens": "10",
                    "completionTokens": "5",
                    "totalTokens": "15"
                },
                "modelVersion": "23.10"
            }
        });
        let response: ApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.result.alternatives.len(), 1);
        assert_eq!(response.result.alternatives[0].message.text, "Здравствуйте!");
        assert_eq!(response.result.model_version.as_deref(), Some("23.10"));
        let usage = response.result.usage.unwrap();
        assert_eq!(usage.total_tokens.as_deref(), Some("15"));
    }

    #[test]
    fn response_deserializes_without_optional_fields() {
        let body = serde_json::json!({
            "result": {
                "alternatives": [{
                    "message": {"role": "assistant", "text": "ok"}
                }]
            }
        });
        let response: ApiResponse = serde_json::from_value(body).unwrap();
        assert!(response.result.usage.is_none());
        assert!(response.result.model_version.is_none());
        assert!(response.result.alternatives[0].status.is_none());
    }

    #[test]
    fn error_body_deserializes() {
        let body = serde_json::json!({
            "error": {
                "grpcCode": 3,
                "httpCode": 400,
                "message": "folder not found",
                "httpStatus": "Bad Request"
            }
        });
        let err: ApiErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(err.error.message, "folder not found");
        assert_eq!(err.error.http_code, Some(400));
    }
}
