// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YandexGPT completion provider adapter for the Lettera service.
//!
//! This crate implements [`CompletionProvider`] for the YandexGPT
//! foundation-models REST API.

pub mod client;
pub mod types;

use async_trait::async_trait;
use lettera_config::model::YandexGptConfig;
use lettera_core::{CompletionProvider, CompletionRequest, CompletionResponse, LetteraError};
use tracing::{debug, info};

use crate::client::YandexGptClient;
use crate::types::{ApiMessage, CompletionOptions, CompletionPayload};

/// YandexGPT provider implementing [`CompletionProvider`].
///
/// Credential resolution order: config -> `YANDEX_API_KEY` /
/// `YANDEX_FOLDER_ID` environment variables -> error.
pub struct YandexGptProvider {
    client: YandexGptClient,
}

impl YandexGptProvider {
    /// Creates a new YandexGPT provider from the given configuration.
    pub fn new(config: &YandexGptConfig) -> Result<Self, LetteraError> {
        let api_key = resolve_credential(&config.api_key, "YANDEX_API_KEY")?;
        let folder_id = resolve_credential(&config.folder_id, "YANDEX_FOLDER_ID")?;

        let client = YandexGptClient::new(
            api_key,
            folder_id,
            config.api_url.clone(),
            config.model.clone(),
        )?;

        info!(model = %config.model, "YandexGPT provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: YandexGptClient) -> Self {
        Self { client }
    }

    /// Converts a [`CompletionRequest`] to the YandexGPT wire payload.
    fn to_payload(&self, request: &CompletionRequest) -> CompletionPayload {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_prompt {
            messages.push(ApiMessage {
                role: "system".into(),
                text: system.clone(),
            });
        }
        messages.push(ApiMessage {
            role: "user".into(),
            text: request.prompt.clone(),
        });

        CompletionPayload {
            model_uri: self.client.model_uri(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            },
            messages,
        }
    }
}

#[async_trait]
impl CompletionProvider for YandexGptProvider {
    fn name(&self) -> &str {
        "yandexgpt"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LetteraError> {
        let payload = self.to_payload(&request);
        let response = self.client.complete(&payload).await?;

        let alternative = response
            .result
            .alternatives
            .into_iter()
            .next()
            .ok_or_else(|| LetteraError::generation("completion returned no alternatives"))?;

        if let Some(usage) = &response.result.usage {
            debug!(
                total_tokens = usage.total_tokens.as_deref().unwrap_or("?"),
                "completion finished"
            );
        }

        Ok(CompletionResponse {
            text: alternative.message.text.trim().to_string(),
            model: response.result.model_version,
        })
    }
}

/// Resolve a credential from config, falling back to an environment variable.
fn resolve_credential(
    configured: &Option<String>,
    env_var: &str,
) -> Result<String, LetteraError> {
    if let Some(value) = configured {
        if !value.trim().is_empty() {
            return Ok(value.clone());
        }
    }
    match std::env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(LetteraError::Config(format!(
            "YandexGPT credential missing: set yandexgpt section in lettera.toml or the {env_var} environment variable"
        ))),
    }
}
