// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Initial draft generation: classify a letter and produce the first reply draft.
//!
//! Two completion calls per letter. Classification runs at low temperature
//! and must answer with a single category token; drafting uses the
//! configured sampling parameters.

use std::str::FromStr;
use std::sync::Arc;

use lettera_core::{Category, CompletionProvider, CompletionRequest, DraftResult, LetteraError};
use tracing::debug;

/// Classification runs nearly deterministic; the answer is one token.
const CLASSIFY_TEMPERATURE: f64 = 0.1;
const CLASSIFY_MAX_TOKENS: u32 = 50;

const CLASSIFY_SYSTEM_PROMPT: &str = "Ты — классификатор обращений клиентов банка. \
Определи категорию обращения и верни ОДНО слово из списка: \
credit, insurance, mortgage, deposit, cards, business, investment, online_banking, currency, other. \
Не добавляй никаких пояснений.";

const DRAFT_SYSTEM_PROMPT: &str = "Ты — помощник сотрудника банка. \
Составь вежливый черновик ответа на обращение клиента. \
Сохраняй корпоративный стиль банка и юридическую корректность.";

/// Generates the initial categorized draft for a submitted letter.
pub struct Drafter {
    provider: Arc<dyn CompletionProvider>,
    temperature: f64,
    max_tokens: u32,
}

impl Drafter {
    /// Create a drafter using `temperature`/`max_tokens` for the draft call.
    pub fn new(provider: Arc<dyn CompletionProvider>, temperature: f64, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Classify the letter and generate the first draft.
    ///
    /// Any provider failure surfaces as [`LetteraError::Generation`]; the
    /// caller leaves the letter untouched in that case (no partial state).
    pub async fn generate(&self, letter_text: &str) -> Result<DraftResult, LetteraError> {
        let classify_request = CompletionRequest {
            system_prompt: Some(CLASSIFY_SYSTEM_PROMPT.to_string()),
            prompt: letter_text.to_string(),
            temperature: CLASSIFY_TEMPERATURE,
            max_tokens: CLASSIFY_MAX_TOKENS,
        };
        let classification = self.provider.complete(classify_request).await?;
        let category = parse_category(&classification.text);
        debug!(
            raw = %classification.text,
            category = %category,
            "letter classified"
        );

        let draft_request = CompletionRequest {
            system_prompt: Some(DRAFT_SYSTEM_PROMPT.to_string()),
            prompt: format!(
                "Обращение клиента:\n{letter_text}\n\nСоставь черновик ответа на это обращение."
            ),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let draft = self.provider.complete(draft_request).await?;

        Ok(DraftResult {
            category,
            draft_text: draft.text,
        })
    }
}

/// Parse a classification answer into a [`Category`].
///
/// The model is instructed to answer with exactly one token, but answers like
/// `"Credit."` or `"категория: cards"` still occur; the last
/// alphanumeric/underscore word that parses wins. Anything unparseable falls
/// back to [`Category::Other`].
pub fn parse_category(answer: &str) -> Category {
    let lower = answer.to_lowercase();
    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .rev()
        .find_map(|word| Category::from_str(word).ok())
        .unwrap_or(Category::Other)
}
