// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! outcomes, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lettera_core::{CompletionProvider, CompletionRequest, CompletionResponse, LetteraError};

enum MockOutcome {
    Text(String),
    Failure(String),
}

/// A mock completion provider that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned.
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given response texts.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(
                responses.into_iter().map(MockOutcome::Text).collect(),
            )),
        }
    }

    /// Queue a successful response text.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(MockOutcome::Text(text.into()));
    }

    /// Queue a generation failure with the given message.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(MockOutcome::Failure(message.into()));
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, LetteraError> {
        let outcome = self.outcomes.lock().await.pop_front();
        match outcome {
            Some(MockOutcome::Text(text)) => Ok(CompletionResponse {
                text,
                model: Some("mock".to_string()),
            }),
            Some(MockOutcome::Failure(message)) => Err(LetteraError::generation(message)),
            None => Ok(CompletionResponse {
                text: "mock response".to_string(),
                model: Some("mock".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest::new("prompt")
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.text, "mock response");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider = MockProvider::with_responses(vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ]);

        assert_eq!(provider.complete(request()).await.unwrap().text, "first");
        assert_eq!(provider.complete(request()).await.unwrap().text, "second");
        assert_eq!(provider.complete(request()).await.unwrap().text, "third");
        // Queue exhausted, falls back to default
        assert_eq!(
            provider.complete(request()).await.unwrap().text,
            "mock response"
        );
    }

    #[tokio::test]
    async fn queued_failure_surfaces_as_generation_error() {
        let provider = MockProvider::new();
        provider.add_failure("scripted outage").await;
        provider.add_response("recovered").await;

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, LetteraError::Generation { .. }));
        assert!(err.to_string().contains("scripted outage"));

        // Next call succeeds with the queued response.
        assert_eq!(
            provider.complete(request()).await.unwrap().text,
            "recovered"
        );
    }
}
