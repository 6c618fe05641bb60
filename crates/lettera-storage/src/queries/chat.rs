// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat message operations for the draft-revision loop.
//!
//! The chat log is append-only. The only compound write is
//! [`append_revision`], which records the assistant turn and overwrites the
//! letter draft in one transaction.

use lettera_core::{ChatMessage, ChatRole, LetteraError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

fn map_message_row(row: &rusqlite::Row<'_>) -> Result<ChatMessage, rusqlite::Error> {
    let role: String = row.get(2)?;
    Ok(ChatMessage {
        id: row.get(0)?,
        letter_id: row.get(1)?,
        role: role.parse::<ChatRole>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        message: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

/// Append a chat message to a letter's revision log.
pub async fn insert_message(
    db: &Database,
    letter_id: i64,
    role: ChatRole,
    message: &str,
) -> Result<ChatMessage, LetteraError> {
    let message = message.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_messages (letter_id, role, message) VALUES (?1, ?2, ?3)",
                params![letter_id, role.to_string(), message],
            )?;
            let id = conn.last_insert_rowid();
            let msg = conn.query_row(
                "SELECT id, letter_id, role, message, timestamp
                 FROM chat_messages WHERE id = ?1",
                params![id],
                map_message_row,
            )?;
            Ok(msg)
        })
        .await
        .map_err(map_tr_err)
}

/// Get the full chat history for a letter in chronological order.
pub async fn messages_for_letter(
    db: &Database,
    letter_id: i64,
) -> Result<Vec<ChatMessage>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, letter_id, role, message, timestamp
                 FROM chat_messages WHERE letter_id = ?1
                 ORDER BY timestamp ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![letter_id], map_message_row)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}

/// Record a successful revision: append the assistant turn and overwrite the
/// letter's draft in one transaction.
///
/// Either both land or neither does, so a crash between the two writes
/// cannot leave an assistant reply that disagrees with the stored draft.
pub async fn append_revision(
    db: &Database,
    letter_id: i64,
    assistant_message: &str,
) -> Result<ChatMessage, LetteraError> {
    let assistant_message = assistant_message.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO chat_messages (letter_id, role, message) VALUES (?1, 'assistant', ?2)",
                params![letter_id, assistant_message],
            )?;
            let message_id = tx.last_insert_rowid();

            tx.execute(
                "UPDATE letters SET draft_response = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![assistant_message, letter_id],
            )?;

            let msg = tx.query_row(
                "SELECT id, letter_id, role, message, timestamp
                 FROM chat_messages WHERE id = ?1",
                params![message_id],
                map_message_row,
            )?;

            tx.commit()?;
            Ok(msg)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::letters::{get_letter, insert_letter};
    use crate::queries::users::create_user;
    use lettera_core::UserRole;
    use tempfile::tempdir;

    async fn setup_db_with_letter() -> (Database, i64, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let user = create_user(&db, "Anna", "anna@example.com", UserRole::User)
            .await
            .unwrap();
        let letter = insert_letter(&db, user.id, "text").await.unwrap();
        (db, letter.id, dir)
    }

    #[tokio::test]
    async fn insert_and_list_messages_in_order() {
        let (db, letter_id, _dir) = setup_db_with_letter().await;

        insert_message(&db, letter_id, ChatRole::Employee, "Сделай короче")
            .await
            .unwrap();
        insert_message(&db, letter_id, ChatRole::Assistant, "Краткий ответ")
            .await
            .unwrap();
        insert_message(&db, letter_id, ChatRole::Employee, "Добавь вежливости")
            .await
            .unwrap();

        let messages = messages_for_letter(&db, letter_id).await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ChatRole::Employee);
        assert_eq!(messages[0].message, "Сделай короче");
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert_eq!(messages[2].message, "Добавь вежливости");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn same_millisecond_messages_keep_insert_order() {
        let (db, letter_id, _dir) = setup_db_with_letter().await;

        // Rapid inserts can share a timestamp; the id tiebreaker must hold order.
        for i in 0..5 {
            insert_message(&db, letter_id, ChatRole::Employee, &format!("msg {i}"))
                .await
                .unwrap();
        }

        let messages = messages_for_letter(&db, letter_id).await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["msg 0", "msg 1", "msg 2", "msg 3", "msg 4"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn append_revision_updates_draft_and_history_together() {
        let (db, letter_id, _dir) = setup_db_with_letter().await;

        insert_message(&db, letter_id, ChatRole::Employee, "Сделай короче")
            .await
            .unwrap();
        let msg = append_revision(&db, letter_id, "Новый краткий черновик")
            .await
            .unwrap();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.message, "Новый краткий черновик");

        let letter = get_letter(&db, letter_id).await.unwrap().unwrap();
        assert_eq!(
            letter.draft_response.as_deref(),
            Some("Новый краткий черновик")
        );

        let messages = messages_for_letter(&db, letter_id).await.unwrap();
        assert_eq!(messages.len(), 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn empty_history_for_fresh_letter() {
        let (db, letter_id, _dir) = setup_db_with_letter().await;
        let messages = messages_for_letter(&db, letter_id).await.unwrap();
        assert!(messages.is_empty());
        db.close().await.unwrap();
    }
}
