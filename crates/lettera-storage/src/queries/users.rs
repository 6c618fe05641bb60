// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use lettera_core::{LetteraError, User, UserRole};
use rusqlite::params;

use crate::database::{Database, is_unique_violation, map_tr_err};

fn map_user_row(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    let role: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: role.parse::<UserRole>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
        created_at: row.get(4)?,
    })
}

/// Create a new user. Fails with a validation error when the email is taken.
pub async fn create_user(
    db: &Database,
    name: &str,
    email: &str,
    role: UserRole,
) -> Result<User, LetteraError> {
    let name = name.to_string();
    let email = email.to_string();
    let email_for_error = email.clone();

    let result = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (name, email, role) VALUES (?1, ?2, ?3)",
                params![name, email, role.to_string()],
            )?;
            let id = conn.last_insert_rowid();
            let user = conn.query_row(
                "SELECT id, name, email, role, created_at FROM users WHERE id = ?1",
                params![id],
                map_user_row,
            )?;
            Ok(user)
        })
        .await;

    match result {
        Ok(user) => Ok(user),
        Err(e) if is_unique_violation(&e) => Err(LetteraError::Validation(format!(
            "user with email {email_for_error} already exists"
        ))),
        Err(e) => Err(map_tr_err(e)),
    }
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: i64) -> Result<Option<User>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, name, email, role, created_at FROM users WHERE id = ?1",
                params![id],
                map_user_row,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Get a user by email.
pub async fn get_user_by_email(db: &Database, email: &str) -> Result<Option<User>, LetteraError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, name, email, role, created_at FROM users WHERE email = ?1",
                params![email],
                map_user_row,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_get_user_roundtrips() {
        let (db, _dir) = setup_db().await;

        let user = create_user(&db, "Anna", "anna@example.com", UserRole::User)
            .await
            .unwrap();
        assert!(user.id > 0);
        assert_eq!(user.name, "Anna");
        assert_eq!(user.email, "anna@example.com");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.created_at.is_empty());

        let retrieved = get_user(&db, user.id).await.unwrap().unwrap();
        assert_eq!(retrieved, user);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (db, _dir) = setup_db().await;

        create_user(&db, "Anna", "anna@example.com", UserRole::User)
            .await
            .unwrap();
        let err = create_user(&db, "Other", "anna@example.com", UserRole::User)
            .await
            .unwrap_err();
        match err {
            LetteraError::Validation(msg) => assert!(msg.contains("anna@example.com")),
            other => panic!("expected Validation error, got {other:?}"),
        }

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_nonexistent_user_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_user(&db, 999).await.unwrap().is_none());
        assert!(
            get_user_by_email(&db, "nobody@example.com")
                .await
                .unwrap()
                .is_none()
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_user_by_email_finds_employee_role() {
        let (db, _dir) = setup_db().await;

        create_user(&db, "Boris", "boris@bank.ru", UserRole::Employee)
            .await
            .unwrap();
        let user = get_user_by_email(&db, "boris@bank.ru")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, UserRole::Employee);

        db.close().await.unwrap();
    }
}
