// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for pluggable Lettera components.

pub mod provider;

pub use provider::{CompletionProvider, CompletionRequest, CompletionResponse};
