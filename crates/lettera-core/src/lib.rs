// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lettera letter-processing service.
//!
//! This crate provides the error taxonomy, domain types, and the completion
//! provider trait used throughout the Lettera workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LetteraError;
pub use traits::{CompletionProvider, CompletionRequest, CompletionResponse};
pub use types::{
    Category, ChatMessage, ChatRole, DraftResult, Employee, Letter, LetterStatus, User, UserRole,
};
