// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for LLM text-completion backends.
//!
//! The drafting and revision engines depend only on this trait, so the real
//! YandexGPT client can be swapped for a deterministic mock in tests.

use async_trait::async_trait;

use crate::error::LetteraError;

/// A single text-completion request.
///
/// The provider treats the prompt as opaque text; all context assembly
/// (letter text, current draft, chat history) happens in the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Optional system instruction establishing the assistant's role.
    pub system_prompt: Option<String>,
    /// The user-visible prompt text.
    pub prompt: String,
    /// Sampling temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f64,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a request with the workspace default temperature and token cap.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            temperature: 0.6,
            max_tokens: 2000,
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system_prompt = Some(system.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated text, already trimmed of surrounding whitespace.
    pub text: String,
    /// Model version reported by the provider, when available.
    pub model: Option<String>,
}

/// Adapter for LLM text-completion services.
///
/// Calls are blocking round-trips with respect to the calling request: no
/// queueing or batching happens behind this trait. Failures surface as
/// [`LetteraError::Generation`].
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Human-readable name of the provider (used in logs).
    fn name(&self) -> &str;

    /// Sends a completion request and returns the generated text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LetteraError>;
}
