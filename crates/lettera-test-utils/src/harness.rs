// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Isolated test environment: temp SQLite plus fully wired services over a
//! mock provider.

use std::sync::Arc;

use lettera_core::{Employee, Letter, LetteraError, User};
use lettera_engine::{Drafter, LetterService, RevisionEngine, StatsService};
use lettera_storage::Database;
use tempfile::TempDir;

use crate::mock_provider::MockProvider;

/// Everything an integration test needs, backed by a throwaway database.
///
/// The temp directory lives as long as the harness; dropping the harness
/// removes the database.
pub struct TestHarness {
    pub db: Arc<Database>,
    pub provider: Arc<MockProvider>,
    pub letters: Arc<LetterService>,
    pub revisions: Arc<RevisionEngine>,
    pub stats: Arc<StatsService>,
    _dir: TempDir,
}

impl TestHarness {
    /// Build a harness with an empty mock response queue.
    pub async fn new() -> Result<Self, LetteraError> {
        Self::with_responses(Vec::new()).await
    }

    /// Build a harness with pre-scripted mock responses.
    pub async fn with_responses(responses: Vec<String>) -> Result<Self, LetteraError> {
        let dir = TempDir::new().map_err(|e| LetteraError::Internal(e.to_string()))?;
        let db_path = dir.path().join("harness.db");
        let db = Arc::new(Database::open(db_path.to_str().expect("utf-8 temp path")).await?);

        let provider = Arc::new(MockProvider::with_responses(responses));
        let drafter = Drafter::new(provider.clone(), 0.6, 2000);
        let letters = Arc::new(LetterService::new(db.clone(), drafter));
        let revisions = Arc::new(RevisionEngine::new(db.clone(), provider.clone(), 0.6, 2000));
        let stats = Arc::new(StatsService::new(db.clone()));

        Ok(Self {
            db,
            provider,
            letters,
            revisions,
            stats,
            _dir: dir,
        })
    }

    /// Register a customer account.
    pub async fn register_user(&self, name: &str, email: &str) -> User {
        self.letters
            .register_user(name, email)
            .await
            .expect("user registration should succeed")
    }

    /// Register an employee with the given routing category.
    pub async fn register_employee(&self, name: &str, email: &str, category: &str) -> Employee {
        let (_user, employee) = self
            .letters
            .register_employee(name, email, Some("Support"), category)
            .await
            .expect("employee registration should succeed");
        employee
    }

    /// Submit a letter whose classification and draft are already scripted
    /// on the mock provider queue.
    pub async fn submit_letter(&self, user_id: i64, text: &str) -> Letter {
        self.letters
            .submit(user_id, text)
            .await
            .expect("letter submission should succeed")
    }
}
