// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Employee CRUD operations.
//!
//! An employee row extends a user with a department and the service category
//! used to route letters.

use lettera_core::{Category, Employee, LetteraError};
use rusqlite::params;

use crate::database::{Database, is_unique_violation, map_tr_err};

fn map_employee_row(row: &rusqlite::Row<'_>) -> Result<Employee, rusqlite::Error> {
    let category: String = row.get(3)?;
    Ok(Employee {
        id: row.get(0)?,
        user_id: row.get(1)?,
        department: row.get(2)?,
        category: category.parse::<Category>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
        created_at: row.get(4)?,
    })
}

/// Create an employee record for an existing user.
///
/// Fails with a validation error when the user already has an employee record.
pub async fn create_employee(
    db: &Database,
    user_id: i64,
    department: Option<&str>,
    category: Category,
) -> Result<Employee, LetteraError> {
    let department = department.map(|d| d.to_string());

    let result = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO employees (user_id, department, category) VALUES (?1, ?2, ?3)",
                params![user_id, department, category.to_string()],
            )?;
            let id = conn.last_insert_rowid();
            let employee = conn.query_row(
                "SELECT id, user_id, department, category, created_at
                 FROM employees WHERE id = ?1",
                params![id],
                map_employee_row,
            )?;
            Ok(employee)
        })
        .await;

    match result {
        Ok(employee) => Ok(employee),
        Err(e) if is_unique_violation(&e) => Err(LetteraError::Validation(format!(
            "user {user_id} is already registered as an employee"
        ))),
        Err(e) => Err(map_tr_err(e)),
    }
}

/// Get an employee by id.
pub async fn get_employee(db: &Database, id: i64) -> Result<Option<Employee>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, user_id, department, category, created_at
                 FROM employees WHERE id = ?1",
                params![id],
                map_employee_row,
            );
            match result {
                Ok(employee) => Ok(Some(employee)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Get the employee record belonging to a user account.
pub async fn get_employee_by_user(
    db: &Database,
    user_id: i64,
) -> Result<Option<Employee>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, user_id, department, category, created_at
                 FROM employees WHERE user_id = ?1",
                params![user_id],
                map_employee_row,
            );
            match result {
                Ok(employee) => Ok(Some(employee)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}
