// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-driven draft revision.
//!
//! Each revision appends the employee instruction to the letter's chat log,
//! asks the model for an improved reply with the full context, then stores
//! the assistant turn and the new draft atomically. The employee turn is
//! recorded before the model call, so a provider failure leaves an orphaned
//! employee message and an unchanged draft.

use std::sync::Arc;

use dashmap::DashMap;
use lettera_core::{
    ChatMessage, ChatRole, CompletionProvider, CompletionRequest, Letter, LetteraError,
};
use lettera_storage::Database;
use lettera_storage::queries::{chat, letters};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const REVISE_SYSTEM_PROMPT: &str = "Ты — помощник для редактирования ответов банка. \
Твоя задача — улучшать ответы на основе просьб сотрудника, \
сохраняя корпоративный стиль и юридическую корректность.";

/// Result of a successful revision turn.
///
/// The assistant's reply text and the stored draft are the same string; the
/// chat log keeps every intermediate draft recoverable.
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub assistant_reply: String,
    pub updated_draft: String,
}

/// Applies natural-language edit instructions to a letter's current draft.
pub struct RevisionEngine {
    db: Arc<Database>,
    provider: Arc<dyn CompletionProvider>,
    /// Per-letter locks serializing concurrent revisions so interleaved
    /// calls cannot corrupt chat-history ordering.
    locks: DashMap<i64, Arc<Mutex<()>>>,
    temperature: f64,
    max_tokens: u32,
}

impl RevisionEngine {
    pub fn new(
        db: Arc<Database>,
        provider: Arc<dyn CompletionProvider>,
        temperature: f64,
        max_tokens: u32,
    ) -> Self {
        Self {
            db,
            provider,
            locks: DashMap::new(),
            temperature,
            max_tokens,
        }
    }

    /// Apply one edit instruction to the letter's draft.
    ///
    /// Preconditions: the letter exists, is assigned to this employee, and
    /// has not been sent or closed; the instruction is non-empty.
    pub async fn revise(
        &self,
        letter_id: i64,
        employee_id: i64,
        instruction: &str,
    ) -> Result<Revision, LetteraError> {
        if instruction.trim().is_empty() {
            return Err(LetteraError::Validation(
                "chat message must not be empty".into(),
            ));
        }

        let lock = self.locks.entry(letter_id).or_default().clone();
        let _guard = lock.lock().await;

        let letter = self.load_assigned_letter(letter_id, employee_id).await?;
        if letter.status.is_terminal() {
            return Err(LetteraError::InvalidState(format!(
                "letter {letter_id} is already {} and can no longer be revised",
                letter.status
            )));
        }

        // Record the employee turn first. It stays in the log even when the
        // provider call below fails, so a retry shows the full history.
        chat::insert_message(&self.db, letter_id, ChatRole::Employee, instruction).await?;

        let history = chat::messages_for_letter(&self.db, letter_id).await?;
        let request = build_revision_request(
            &letter,
            &history,
            instruction,
            self.temperature,
            self.max_tokens,
        );

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(letter_id, error = %e, "revision generation failed, employee turn kept");
                return Err(e);
            }
        };

        let assistant = chat::append_revision(&self.db, letter_id, &response.text).await?;
        debug!(letter_id, message_id = assistant.id, "draft revised");

        Ok(Revision {
            assistant_reply: response.text.clone(),
            updated_draft: response.text,
        })
    }

    /// Get the ordered chat history for a letter assigned to this employee.
    pub async fn chat_history(
        &self,
        letter_id: i64,
        employee_id: i64,
    ) -> Result<Vec<ChatMessage>, LetteraError> {
        self.load_assigned_letter(letter_id, employee_id).await?;
        chat::messages_for_letter(&self.db, letter_id).await
    }

    async fn load_assigned_letter(
        &self,
        letter_id: i64,
        employee_id: i64,
    ) -> Result<Letter, LetteraError> {
        let letter = letters::get_letter(&self.db, letter_id)
            .await?
            .ok_or_else(|| LetteraError::not_found(format!("letter {letter_id}")))?;
        if letter.employee_id != Some(employee_id) {
            return Err(LetteraError::Forbidden(format!(
                "letter {letter_id} is not assigned to employee {employee_id}"
            )));
        }
        Ok(letter)
    }
}

/// Assemble the completion request for one revision turn.
///
/// Context mirrors what a reviewer would read: the customer letter, the
/// current draft, the full edit history, then the new instruction.
fn build_revision_request(
    letter: &Letter,
    history: &[ChatMessage],
    instruction: &str,
    temperature: f64,
    max_tokens: u32,
) -> CompletionRequest {
    let mut history_text = String::new();
    for msg in history {
        let role_name = match msg.role {
            ChatRole::Employee => "Сотрудник",
            ChatRole::Assistant => "Ассистент",
        };
        history_text.push_str(role_name);
        history_text.push_str(": ");
        history_text.push_str(&msg.message);
        history_text.push('\n');
    }

    let draft = letter
        .draft_response
        .as_deref()
        .unwrap_or("Черновик еще не создан");
    let history_block = if history_text.is_empty() {
        "Истории пока нет"
    } else {
        history_text.as_str()
    };

    let prompt = format!(
        "Исходное письмо от клиента:\n{}\n\n\
         Текущий черновик ответа:\n{}\n\n\
         История редактирования:\n{}\n\
         Сотрудник просит: {}\n\n\
         Предложи улучшенную версию ответа, учитывая просьбу сотрудника. \
         В ответе верни только текст нового черновика.",
        letter.text, draft, history_block, instruction
    );

    CompletionRequest {
        system_prompt: Some(REVISE_SYSTEM_PROMPT.to_string()),
        prompt,
        temperature,
        max_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettera_core::{Category, LetterStatus};

    fn sample_letter(draft: Option<&str>) -> Letter {
        Letter {
            id: 1,
            user_id: 1,
            text: "Недоволен обслуживанием".into(),
            category: Category::Other,
            status: LetterStatus::InProgress,
            employee_id: Some(1),
            draft_response: draft.map(|d| d.to_string()),
            final_response: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn revision_request_embeds_letter_draft_and_history() {
        let letter = sample_letter(Some("Длинный текст ответа..."));
        let history = vec![ChatMessage {
            id: 1,
            letter_id: 1,
            role: ChatRole::Employee,
            message: "Сделай короче".into(),
            timestamp: "2026-01-01T00:00:01.000Z".into(),
        }];

        let request = build_revision_request(&letter, &history, "Сделай короче", 0.7, 2000);
        assert!(request.prompt.contains("Недоволен обслуживанием"));
        assert!(request.prompt.contains("Длинный текст ответа..."));
        assert!(request.prompt.contains("Сотрудник: Сделай короче"));
        assert!(request.prompt.contains("Сотрудник просит: Сделай короче"));
        assert_eq!(request.temperature, 0.7);
        assert!(request.system_prompt.is_some());
    }

    #[test]
    fn revision_request_handles_missing_draft_and_history() {
        let letter = sample_letter(None);
        let request = build_revision_request(&letter, &[], "Добавь приветствие", 0.6, 2000);
        assert!(request.prompt.contains("Черновик еще не создан"));
        assert!(request.prompt.contains("Истории пока нет"));
    }
}
