// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only statistics rollups over the letters table.
//!
//! Queries return raw (key, count) pairs straight from GROUP BY; zero-filling
//! the full category/status matrix is the stats service's job.

use lettera_core::{Category, LetterStatus, LetteraError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

fn parse_status(idx: usize, value: String) -> Result<LetterStatus, rusqlite::Error> {
    value.parse::<LetterStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_category(idx: usize, value: String) -> Result<Category, rusqlite::Error> {
    value.parse::<Category>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Total number of letters in the store.
pub async fn total_letters(db: &Database) -> Result<i64, LetteraError> {
    db.connection()
        .call(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM letters", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// Letter counts grouped by status.
pub async fn status_counts(db: &Database) -> Result<Vec<(LetterStatus, i64)>, LetteraError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT status, COUNT(*) FROM letters GROUP BY status")?;
            let rows = stmt.query_map([], |row| {
                let status: String = row.get(0)?;
                Ok((parse_status(0, status)?, row.get::<_, i64>(1)?))
            })?;
            let mut counts = Vec::new();
            for row in rows {
                counts.push(row?);
            }
            Ok(counts)
        })
        .await
        .map_err(map_tr_err)
}

/// Letter counts grouped by (category, status).
pub async fn category_status_counts(
    db: &Database,
) -> Result<Vec<(Category, LetterStatus, i64)>, LetteraError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT category, status, COUNT(*) FROM letters GROUP BY category, status",
            )?;
            let rows = stmt.query_map([], |row| {
                let category: String = row.get(0)?;
                let status: String = row.get(1)?;
                Ok((
                    parse_category(0, category)?,
                    parse_status(1, status)?,
                    row.get::<_, i64>(2)?,
                ))
            })?;
            let mut counts = Vec::new();
            for row in rows {
                counts.push(row?);
            }
            Ok(counts)
        })
        .await
        .map_err(map_tr_err)
}

/// Letter counts grouped by status for one employee's assigned letters.
pub async fn employee_status_counts(
    db: &Database,
    employee_id: i64,
) -> Result<Vec<(LetterStatus, i64)>, LetteraError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT status, COUNT(*) FROM letters WHERE employee_id = ?1 GROUP BY status",
            )?;
            let rows = stmt.query_map(params![employee_id], |row| {
                let status: String = row.get(0)?;
                Ok((parse_status(0, status)?, row.get::<_, i64>(1)?))
            })?;
            let mut counts = Vec::new();
            for row in rows {
                counts.push(row?);
            }
            Ok(counts)
        })
        .await
        .map_err(map_tr_err)
}
