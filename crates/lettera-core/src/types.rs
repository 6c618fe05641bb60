// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Lettera workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Banking service category a letter is classified into.
///
/// The set is closed: classification output that does not parse into one of
/// these variants falls back to [`Category::Other`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Credit,
    Insurance,
    Mortgage,
    Deposit,
    Cards,
    Business,
    Investment,
    OnlineBanking,
    Currency,
    Other,
}

impl Category {
    /// Every category, in display order. Used for statistics rollups and
    /// registration validation messages.
    pub const ALL: [Category; 10] = [
        Category::Credit,
        Category::Insurance,
        Category::Mortgage,
        Category::Deposit,
        Category::Cards,
        Category::Business,
        Category::Investment,
        Category::OnlineBanking,
        Category::Currency,
        Category::Other,
    ];
}

/// Lifecycle state of a letter.
///
/// Transitions only move forward: `waiting -> in_progress -> sent -> closed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    Waiting,
    InProgress,
    Sent,
    Closed,
}

impl LetterStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [LetterStatus; 4] = [
        LetterStatus::Waiting,
        LetterStatus::InProgress,
        LetterStatus::Sent,
        LetterStatus::Closed,
    ];

    /// Whether the letter has left the editable part of its lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, LetterStatus::Sent | LetterStatus::Closed)
    }
}

/// Role of a user account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Employee,
}

/// Author of a chat turn in the draft-revision loop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    Employee,
    Assistant,
}

/// A registered account (bank customer or bank employee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: String,
}

/// Employee record extending a [`User`] with routing information.
///
/// `category` determines which letters the employee receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub user_id: i64,
    pub department: Option<String>,
    pub category: Category,
    pub created_at: String,
}

/// A customer-submitted letter and its processing state.
///
/// `text` is immutable customer input. `draft_response` is overwritten by
/// each revision; only the chat history preserves prior drafts.
/// `final_response` is set exactly once, on finalize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub category: Category,
    pub status: LetterStatus,
    pub employee_id: Option<i64>,
    pub draft_response: Option<String>,
    pub final_response: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A single turn in a letter's draft-revision chat. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub letter_id: i64,
    pub role: ChatRole,
    pub message: String,
    pub timestamp: String,
}

/// Output of the draft generator: a category plus the initial draft text.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftResult {
    pub category: Category,
    pub draft_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_round_trips_through_strings() {
        for category in Category::ALL {
            let s = category.to_string();
            assert_eq!(Category::from_str(&s).unwrap(), category);
        }
        assert_eq!(Category::OnlineBanking.to_string(), "online_banking");
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Category::from_str("crypto").is_err());
        assert!(Category::from_str("").is_err());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in LetterStatus::ALL {
            let s = status.to_string();
            assert_eq!(LetterStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(LetterStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn terminal_statuses() {
        assert!(!LetterStatus::Waiting.is_terminal());
        assert!(!LetterStatus::InProgress.is_terminal());
        assert!(LetterStatus::Sent.is_terminal());
        assert!(LetterStatus::Closed.is_terminal());
    }

    #[test]
    fn letter_serializes_with_snake_case_enums() {
        let letter = Letter {
            id: 1,
            user_id: 2,
            text: "text".into(),
            category: Category::OnlineBanking,
            status: LetterStatus::InProgress,
            employee_id: None,
            draft_response: None,
            final_response: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        };
        let json = serde_json::to_string(&letter).unwrap();
        assert!(json.contains("\"category\":\"online_banking\""));
        assert!(json.contains("\"status\":\"in_progress\""));
    }
}
