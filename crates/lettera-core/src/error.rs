// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lettera letter-processing service.

use thiserror::Error;

/// The primary error type used across all Lettera crates.
#[derive(Debug, Error)]
pub enum LetteraError {
    /// Bad or empty input from the caller (empty letter text, unknown category, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced entity (letter, user, employee) does not exist.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// The caller is not allowed to act on this entity (ownership or
    /// category mismatch).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The operation is not valid for the letter's current lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// LLM provider errors (API failure, timeout, malformed response).
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LetteraError {
    /// Shorthand for a [`LetteraError::NotFound`] describing the missing entity.
    pub fn not_found(what: impl Into<String>) -> Self {
        LetteraError::NotFound { what: what.into() }
    }

    /// Shorthand for a [`LetteraError::Generation`] without an underlying source.
    pub fn generation(message: impl Into<String>) -> Self {
        LetteraError::Generation {
            message: message.into(),
            source: None,
        }
    }
}
