// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only statistics rollups over the letter store.
//!
//! Every rollup zero-fills the full status (and category) matrix so callers
//! always see all keys, matching the shape consumers chart directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use lettera_core::{Category, LetterStatus, LetteraError};
use lettera_storage::Database;
use lettera_storage::queries::{employees, stats};
use serde::Serialize;

/// Overview rollup: total letters plus counts per status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_letters: i64,
    pub by_status: BTreeMap<String, i64>,
}

/// Per-category rollup entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
}

/// Per-employee rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeStats {
    pub employee_id: i64,
    pub total_letters: i64,
    pub by_status: BTreeMap<String, i64>,
    /// Letters this employee has completed (status `sent`).
    pub processed: i64,
}

/// Read-only statistics over the letter store. No caching: every call
/// reflects the store's state at call time.
pub struct StatsService {
    db: Arc<Database>,
}

impl StatsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Counts by status across all letters.
    pub async fn overview(&self) -> Result<OverviewStats, LetteraError> {
        let total_letters = stats::total_letters(&self.db).await?;
        let mut by_status = zeroed_status_map();
        for (status, count) in stats::status_counts(&self.db).await? {
            by_status.insert(status.to_string(), count);
        }
        Ok(OverviewStats {
            total_letters,
            by_status,
        })
    }

    /// Counts by status within each category. All categories are present,
    /// zero-filled when empty.
    pub async fn by_category(&self) -> Result<BTreeMap<String, CategoryStats>, LetteraError> {
        let mut result: BTreeMap<String, CategoryStats> = Category::ALL
            .iter()
            .map(|category| {
                (
                    category.to_string(),
                    CategoryStats {
                        total: 0,
                        by_status: zeroed_status_map(),
                    },
                )
            })
            .collect();

        for (category, status, count) in stats::category_status_counts(&self.db).await? {
            if let Some(entry) = result.get_mut(&category.to_string()) {
                entry.total += count;
                entry.by_status.insert(status.to_string(), count);
            }
        }
        Ok(result)
    }

    /// Counts by status for one employee's assigned letters.
    pub async fn by_employee(&self, employee_id: i64) -> Result<EmployeeStats, LetteraError> {
        employees::get_employee(&self.db, employee_id)
            .await?
            .ok_or_else(|| LetteraError::not_found(format!("employee {employee_id}")))?;

        let mut by_status = zeroed_status_map();
        let mut total_letters = 0;
        for (status, count) in stats::employee_status_counts(&self.db, employee_id).await? {
            total_letters += count;
            by_status.insert(status.to_string(), count);
        }
        let processed = by_status
            .get(&LetterStatus::Sent.to_string())
            .copied()
            .unwrap_or(0);

        Ok(EmployeeStats {
            employee_id,
            total_letters,
            by_status,
            processed,
        })
    }
}

fn zeroed_status_map() -> BTreeMap<String, i64> {
    LetterStatus::ALL
        .iter()
        .map(|status| (status.to_string(), 0))
        .collect()
}
