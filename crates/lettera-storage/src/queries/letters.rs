// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Letter CRUD operations and lifecycle transitions.
//!
//! State transitions are conditional UPDATEs: the WHERE clause encodes the
//! allowed source states, so a transition either applies atomically on the
//! single writer thread or touches zero rows.

use lettera_core::{Category, Letter, LetterStatus, LetteraError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

const LETTER_COLUMNS: &str = "id, user_id, text, category, status, employee_id, \
                              draft_response, final_response, created_at, updated_at";

fn map_letter_row(row: &rusqlite::Row<'_>) -> Result<Letter, rusqlite::Error> {
    let category: String = row.get(3)?;
    let status: String = row.get(4)?;
    Ok(Letter {
        id: row.get(0)?,
        user_id: row.get(1)?,
        text: row.get(2)?,
        category: category.parse::<Category>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
        status: status.parse::<LetterStatus>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?,
        employee_id: row.get(5)?,
        draft_response: row.get(6)?,
        final_response: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Insert a newly submitted letter.
///
/// Starts in `waiting` with category `other` and no draft; classification
/// and drafting land later via [`set_draft`].
pub async fn insert_letter(db: &Database, user_id: i64, text: &str) -> Result<Letter, LetteraError> {
    let text = text.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO letters (user_id, text) VALUES (?1, ?2)",
                params![user_id, text],
            )?;
            let id = conn.last_insert_rowid();
            let letter = conn.query_row(
                &format!("SELECT {LETTER_COLUMNS} FROM letters WHERE id = ?1"),
                params![id],
                map_letter_row,
            )?;
            Ok(letter)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a letter by id.
pub async fn get_letter(db: &Database, id: i64) -> Result<Option<Letter>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {LETTER_COLUMNS} FROM letters WHERE id = ?1"),
                params![id],
                map_letter_row,
            );
            match result {
                Ok(letter) => Ok(Some(letter)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List a user's letters, newest first, optionally filtered by status.
pub async fn list_by_user(
    db: &Database,
    user_id: i64,
    status: Option<LetterStatus>,
) -> Result<Vec<Letter>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let mut letters = Vec::new();
            match status {
                Some(status) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LETTER_COLUMNS} FROM letters
                         WHERE user_id = ?1 AND status = ?2
                         ORDER BY created_at DESC, id DESC"
                    ))?;
                    let rows = stmt.query_map(params![user_id, status.to_string()], map_letter_row)?;
                    for row in rows {
                        letters.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LETTER_COLUMNS} FROM letters
                         WHERE user_id = ?1
                         ORDER BY created_at DESC, id DESC"
                    ))?;
                    let rows = stmt.query_map(params![user_id], map_letter_row)?;
                    for row in rows {
                        letters.push(row?);
                    }
                }
            }
            Ok(letters)
        })
        .await
        .map_err(map_tr_err)
}

/// List letters in a category, newest first, optionally filtered by status.
///
/// This is the employee work queue: employees see the letters routable to
/// their category.
pub async fn list_by_category(
    db: &Database,
    category: Category,
    status: Option<LetterStatus>,
) -> Result<Vec<Letter>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let mut letters = Vec::new();
            match status {
                Some(status) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LETTER_COLUMNS} FROM letters
                         WHERE category = ?1 AND status = ?2
                         ORDER BY created_at DESC, id DESC"
                    ))?;
                    let rows = stmt.query_map(
                        params![category.to_string(), status.to_string()],
                        map_letter_row,
                    )?;
                    for row in rows {
                        letters.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LETTER_COLUMNS} FROM letters
                         WHERE category = ?1
                         ORDER BY created_at DESC, id DESC"
                    ))?;
                    let rows = stmt.query_map(params![category.to_string()], map_letter_row)?;
                    for row in rows {
                        letters.push(row?);
                    }
                }
            }
            Ok(letters)
        })
        .await
        .map_err(map_tr_err)
}

/// Store the generated draft and classified category for a letter.
pub async fn set_draft(
    db: &Database,
    letter_id: i64,
    category: Category,
    draft: &str,
) -> Result<(), LetteraError> {
    let draft = draft.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE letters SET category = ?1, draft_response = ?2,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?3",
                params![category.to_string(), draft, letter_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Assign a waiting, unassigned letter to an employee and move it to
/// `in_progress`. Returns the number of rows changed (0 when the letter was
/// not in a claimable state).
pub async fn open_letter(
    db: &Database,
    letter_id: i64,
    employee_id: i64,
) -> Result<usize, LetteraError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE letters SET status = 'in_progress', employee_id = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2 AND status = 'waiting' AND employee_id IS NULL",
                params![employee_id, letter_id],
            )?;
            Ok(changed)
        })
        .await
        .map_err(map_tr_err)
}

/// Record the final response and move the letter to `sent`.
///
/// Only applies while the letter is still `waiting` or `in_progress`;
/// returns the number of rows changed so the caller can distinguish a lost
/// race (already sent/closed) from success.
pub async fn finalize_letter(
    db: &Database,
    letter_id: i64,
    final_text: &str,
) -> Result<usize, LetteraError> {
    let final_text = final_text.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE letters SET final_response = ?1, status = 'sent',
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2 AND status IN ('waiting', 'in_progress')",
                params![final_text, letter_id],
            )?;
            Ok(changed)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users::create_user;
    use lettera_core::UserRole;
    use tempfile::tempdir;

    async fn setup_db_with_user() -> (Database, i64, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let user = create_user(&db, "Anna", "anna@example.com", UserRole::User)
            .await
            .unwrap();
        (db, user.id, dir)
    }

    async fn seed_employee(db: &Database) -> i64 {
        let user = create_user(db, "Boris", "boris@bank.ru", UserRole::Employee)
            .await
            .unwrap();
        crate::queries::employees::create_employee(db, user.id, None, lettera_core::Category::Credit)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn insert_letter_starts_waiting_without_draft() {
        let (db, user_id, _dir) = setup_db_with_user().await;

        let letter = insert_letter(&db, user_id, "Недоволен обслуживанием")
            .await
            .unwrap();
        assert!(letter.id > 0);
        assert_eq!(letter.status, LetterStatus::Waiting);
        assert_eq!(letter.category, Category::Other);
        assert!(letter.draft_response.is_none());
        assert!(letter.final_response.is_none());
        assert!(letter.employee_id.is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn set_draft_updates_category_and_draft() {
        let (db, user_id, _dir) = setup_db_with_user().await;

        let letter = insert_letter(&db, user_id, "Вопрос по кредиту").await.unwrap();
        set_draft(&db, letter.id, Category::Credit, "Уважаемый клиент, ...")
            .await
            .unwrap();

        let updated = get_letter(&db, letter.id).await.unwrap().unwrap();
        assert_eq!(updated.category, Category::Credit);
        assert_eq!(updated.draft_response.as_deref(), Some("Уважаемый клиент, ..."));
        // Drafting never advances the lifecycle.
        assert_eq!(updated.status, LetterStatus::Waiting);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_letter_claims_only_waiting_unassigned() {
        let (db, user_id, _dir) = setup_db_with_user().await;
        let employee_id = seed_employee(&db).await;

        let letter = insert_letter(&db, user_id, "text").await.unwrap();
        let changed = open_letter(&db, letter.id, employee_id).await.unwrap();
        assert_eq!(changed, 1);

        let opened = get_letter(&db, letter.id).await.unwrap().unwrap();
        assert_eq!(opened.status, LetterStatus::InProgress);
        assert_eq!(opened.employee_id, Some(employee_id));

        // A second claim attempt finds nothing to update.
        let changed = open_letter(&db, letter.id, employee_id).await.unwrap();
        assert_eq!(changed, 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn finalize_letter_applies_exactly_once() {
        let (db, user_id, _dir) = setup_db_with_user().await;
        let employee_id = seed_employee(&db).await;

        let letter = insert_letter(&db, user_id, "text").await.unwrap();
        open_letter(&db, letter.id, employee_id).await.unwrap();

        let changed = finalize_letter(&db, letter.id, "Final answer").await.unwrap();
        assert_eq!(changed, 1);

        let sent = get_letter(&db, letter.id).await.unwrap().unwrap();
        assert_eq!(sent.status, LetterStatus::Sent);
        assert_eq!(sent.final_response.as_deref(), Some("Final answer"));

        // Second finalize touches zero rows and does not overwrite.
        let changed = finalize_letter(&db, letter.id, "Overwritten").await.unwrap();
        assert_eq!(changed, 0);
        let still_sent = get_letter(&db, letter.id).await.unwrap().unwrap();
        assert_eq!(still_sent.final_response.as_deref(), Some("Final answer"));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_by_user_newest_first_with_status_filter() {
        let (db, user_id, _dir) = setup_db_with_user().await;
        let employee_id = seed_employee(&db).await;

        let l1 = insert_letter(&db, user_id, "first").await.unwrap();
        let l2 = insert_letter(&db, user_id, "second").await.unwrap();
        open_letter(&db, l1.id, employee_id).await.unwrap();

        let all = list_by_user(&db, user_id, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, l2.id, "newest letter should come first");

        let waiting = list_by_user(&db, user_id, Some(LetterStatus::Waiting))
            .await
            .unwrap();
        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].id, l2.id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_by_category_sees_only_matching_letters() {
        let (db, user_id, _dir) = setup_db_with_user().await;

        let credit = insert_letter(&db, user_id, "credit question").await.unwrap();
        set_draft(&db, credit.id, Category::Credit, "draft").await.unwrap();
        let cards = insert_letter(&db, user_id, "cards question").await.unwrap();
        set_draft(&db, cards.id, Category::Cards, "draft").await.unwrap();

        let credit_queue = list_by_category(&db, Category::Credit, None).await.unwrap();
        assert_eq!(credit_queue.len(), 1);
        assert_eq!(credit_queue[0].id, credit.id);

        let empty = list_by_category(&db, Category::Mortgage, None).await.unwrap();
        assert!(empty.is_empty());

        db.close().await.unwrap();
    }
}
