// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Letter lifecycle controller: registration, submission, assignment, and
//! finalization.
//!
//! All status transitions go through conditional UPDATEs in the store, so
//! racing callers serialize on the single writer thread and losers observe
//! zero changed rows instead of overwriting state.

use std::str::FromStr;
use std::sync::Arc;

use lettera_core::{Category, Employee, Letter, LetterStatus, LetteraError, User, UserRole};
use lettera_storage::Database;
use lettera_storage::queries::{employees, letters, users};
use tracing::{info, warn};

use crate::drafter::Drafter;

/// Orchestrates letter state transitions and ownership checks.
pub struct LetterService {
    db: Arc<Database>,
    drafter: Drafter,
}

impl LetterService {
    pub fn new(db: Arc<Database>, drafter: Drafter) -> Self {
        Self { db, drafter }
    }

    // --- Registration ---

    /// Register a bank customer.
    pub async fn register_user(&self, name: &str, email: &str) -> Result<User, LetteraError> {
        validate_identity(name, email)?;
        users::create_user(&self.db, name.trim(), email.trim(), UserRole::User).await
    }

    /// Register a bank employee with a routing category.
    ///
    /// The category must be one of the closed set; anything else is a
    /// validation error listing the valid values.
    pub async fn register_employee(
        &self,
        name: &str,
        email: &str,
        department: Option<&str>,
        category: &str,
    ) -> Result<(User, Employee), LetteraError> {
        validate_identity(name, email)?;
        let category = Category::from_str(category.trim()).map_err(|_| {
            let valid = Category::ALL
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            LetteraError::Validation(format!(
                "unknown category `{category}`; valid categories: {valid}"
            ))
        })?;

        let user = users::create_user(&self.db, name.trim(), email.trim(), UserRole::Employee).await?;
        let employee = employees::create_employee(&self.db, user.id, department, category).await?;
        info!(
            employee_id = employee.id,
            category = %employee.category,
            "employee registered"
        );
        Ok((user, employee))
    }

    /// Look up an account by email (login is lookup-only; authentication is
    /// out of scope).
    pub async fn login(&self, email: &str) -> Result<User, LetteraError> {
        users::get_user_by_email(&self.db, email.trim())
            .await?
            .ok_or_else(|| LetteraError::not_found(format!("user with email {}", email.trim())))
    }

    /// Get the employee record for a user account, if any.
    pub async fn employee_for_user(&self, user_id: i64) -> Result<Option<Employee>, LetteraError> {
        employees::get_employee_by_user(&self.db, user_id).await
    }

    // --- Submission ---

    /// Submit a new customer letter.
    ///
    /// The letter is stored in `waiting` first; draft generation runs
    /// synchronously afterwards. A generation failure is logged and
    /// swallowed so the customer's letter is never lost — the letter simply
    /// stays in `waiting` with no draft and category `other`.
    pub async fn submit(&self, user_id: i64, text: &str) -> Result<Letter, LetteraError> {
        if text.trim().is_empty() {
            return Err(LetteraError::Validation(
                "letter text must not be empty".into(),
            ));
        }
        let user = users::get_user(&self.db, user_id)
            .await?
            .ok_or_else(|| LetteraError::not_found(format!("user {user_id}")))?;
        if user.role != UserRole::User {
            return Err(LetteraError::Forbidden(
                "only customers can submit letters".into(),
            ));
        }

        let letter = letters::insert_letter(&self.db, user_id, text.trim()).await?;
        info!(letter_id = letter.id, user_id, "letter submitted");

        match self.drafter.generate(&letter.text).await {
            Ok(draft) => {
                letters::set_draft(&self.db, letter.id, draft.category, &draft.draft_text).await?;
                info!(
                    letter_id = letter.id,
                    category = %draft.category,
                    "draft generated"
                );
            }
            Err(e) => {
                warn!(
                    letter_id = letter.id,
                    error = %e,
                    "draft generation failed, letter left waiting without draft"
                );
            }
        }

        letters::get_letter(&self.db, letter.id)
            .await?
            .ok_or_else(|| LetteraError::Internal(format!("letter {} vanished", letter.id)))
    }

    // --- Employee workflow ---

    /// Open a letter for work.
    ///
    /// The first open by an employee of the matching category assigns the
    /// letter and moves it `waiting -> in_progress`. Re-opening an already
    /// assigned letter is a no-op for its owner and forbidden for everyone
    /// else.
    pub async fn open_letter(
        &self,
        letter_id: i64,
        employee_id: i64,
    ) -> Result<Letter, LetteraError> {
        let employee = self.require_employee(employee_id).await?;
        let letter = self.require_letter(letter_id).await?;

        if letter.category != employee.category {
            return Err(LetteraError::Forbidden(format!(
                "letter {letter_id} belongs to category {}, not {}",
                letter.category, employee.category
            )));
        }

        if letter.employee_id == Some(employee.id) {
            return Ok(letter);
        }
        if letter.employee_id.is_some() {
            return Err(LetteraError::Forbidden(format!(
                "letter {letter_id} is assigned to another employee"
            )));
        }

        let changed = letters::open_letter(&self.db, letter_id, employee.id).await?;
        if changed == 0 {
            // Lost a race or the letter is past claiming; re-read to decide.
            let current = self.require_letter(letter_id).await?;
            if current.employee_id == Some(employee.id) {
                return Ok(current);
            }
            if current.employee_id.is_some() {
                return Err(LetteraError::Forbidden(format!(
                    "letter {letter_id} is assigned to another employee"
                )));
            }
            return Err(LetteraError::InvalidState(format!(
                "letter {letter_id} is {} and cannot be opened",
                current.status
            )));
        }

        info!(letter_id, employee_id = employee.id, "letter opened");
        self.require_letter(letter_id).await
    }

    /// Send the final response and move the letter to `sent`.
    ///
    /// Idempotent-rejecting: the first successful call wins, later calls get
    /// [`LetteraError::InvalidState`] and the stored response never changes.
    pub async fn finalize(
        &self,
        letter_id: i64,
        employee_id: i64,
        final_text: &str,
    ) -> Result<(), LetteraError> {
        if final_text.trim().is_empty() {
            return Err(LetteraError::Validation(
                "final response must not be empty".into(),
            ));
        }
        let employee = self.require_employee(employee_id).await?;
        let letter = self.require_letter(letter_id).await?;
        if letter.employee_id != Some(employee.id) {
            return Err(LetteraError::Forbidden(format!(
                "letter {letter_id} is not assigned to employee {employee_id}"
            )));
        }

        let changed = letters::finalize_letter(&self.db, letter_id, final_text.trim()).await?;
        if changed == 0 {
            return Err(LetteraError::InvalidState(format!(
                "letter {letter_id} is already sent or closed"
            )));
        }
        info!(letter_id, employee_id, "final response sent");
        Ok(())
    }

    // --- Reads ---

    /// Get a single letter, checked against the owning customer.
    pub async fn get_letter_for_user(
        &self,
        letter_id: i64,
        user_id: i64,
    ) -> Result<Letter, LetteraError> {
        let letter = self.require_letter(letter_id).await?;
        if letter.user_id != user_id {
            return Err(LetteraError::Forbidden(format!(
                "letter {letter_id} belongs to another user"
            )));
        }
        Ok(letter)
    }

    /// Get a single letter, checked against employee routing: the letter
    /// must be assigned to this employee, or unassigned in their category.
    pub async fn get_letter_for_employee(
        &self,
        letter_id: i64,
        employee_id: i64,
    ) -> Result<Letter, LetteraError> {
        let employee = self.require_employee(employee_id).await?;
        let letter = self.require_letter(letter_id).await?;

        let assigned_to_caller = letter.employee_id == Some(employee.id);
        let routable = letter.employee_id.is_none() && letter.category == employee.category;
        if !assigned_to_caller && !routable {
            return Err(LetteraError::Forbidden(format!(
                "letter {letter_id} is not routable to employee {employee_id}"
            )));
        }
        Ok(letter)
    }

    /// List a customer's own letters, newest first.
    pub async fn list_user_letters(
        &self,
        user_id: i64,
        status: Option<LetterStatus>,
    ) -> Result<Vec<Letter>, LetteraError> {
        users::get_user(&self.db, user_id)
            .await?
            .ok_or_else(|| LetteraError::not_found(format!("user {user_id}")))?;
        letters::list_by_user(&self.db, user_id, status).await
    }

    /// List the letters routable to an employee (their category), newest first.
    pub async fn list_employee_letters(
        &self,
        employee_id: i64,
        status: Option<LetterStatus>,
    ) -> Result<Vec<Letter>, LetteraError> {
        let employee = self.require_employee(employee_id).await?;
        letters::list_by_category(&self.db, employee.category, status).await
    }

    async fn require_employee(&self, employee_id: i64) -> Result<Employee, LetteraError> {
        employees::get_employee(&self.db, employee_id)
            .await?
            .ok_or_else(|| LetteraError::not_found(format!("employee {employee_id}")))
    }

    async fn require_letter(&self, letter_id: i64) -> Result<Letter, LetteraError> {
        letters::get_letter(&self.db, letter_id)
            .await?
            .ok_or_else(|| LetteraError::not_found(format!("letter {letter_id}")))
    }
}

fn validate_identity(name: &str, email: &str) -> Result<(), LetteraError> {
    if name.trim().is_empty() {
        return Err(LetteraError::Validation("name must not be empty".into()));
    }
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(LetteraError::Validation(format!(
            "`{email}` is not a valid email address"
        )));
    }
    Ok(())
}
