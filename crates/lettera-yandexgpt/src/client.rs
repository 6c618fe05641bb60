// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the YandexGPT completion API.
//!
//! Provides [`YandexGptClient`] which handles request construction,
//! Api-Key authentication, and transient error retry.

use std::time::Duration;

use lettera_core::LetteraError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ApiResponse, CompletionPayload};

/// Round-trip budget for one completion call. YandexGPT answers well within
/// this for the prompt sizes lettera produces.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for YandexGPT API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct YandexGptClient {
    client: reqwest::Client,
    folder_id: String,
    model: String,
    max_retries: u32,
    base_url: String,
}

impl YandexGptClient {
    /// Creates a new YandexGPT API client.
    ///
    /// # Arguments
    /// * `api_key` - Yandex Cloud API key
    /// * `folder_id` - Yandex Cloud folder id (also used in the model URI)
    /// * `base_url` - completion endpoint URL
    /// * `model` - model name within the folder, e.g. `yandexgpt/latest`
    pub fn new(
        api_key: String,
        folder_id: String,
        base_url: String,
        model: String,
    ) -> Result<Self, LetteraError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Api-Key {api_key}")).map_err(|e| {
                LetteraError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "x-folder-id",
            HeaderValue::from_str(&folder_id).map_err(|e| {
                LetteraError::Config(format!("invalid folder id header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LetteraError::Generation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            folder_id,
            model,
            max_retries: 1,
            base_url,
        })
    }

    /// Returns the fully qualified model URI for request payloads.
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.folder_id, self.model)
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a completion request and returns the parsed response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn complete(&self, payload: &CompletionPayload) -> Result<ApiResponse, LetteraError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(payload)
                .send()
                .await
                .map_err(|e| LetteraError::Generation {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| LetteraError::Generation {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let api_response: ApiResponse =
                    serde_json::from_str(&body).map_err(|e| LetteraError::Generation {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(api_response);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(LetteraError::generation(format!(
                    "API returned {status}: {body}"
                )));
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("YandexGPT API error ({status}): {}", api_err.error.message)
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(LetteraError::generation(error_msg));
        }

        Err(last_error
            .unwrap_or_else(|| LetteraError::generation("completion request failed after retries")))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
