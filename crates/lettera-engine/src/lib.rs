// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain engine for the Lettera service: draft generation, chat-driven
//! draft revision, letter lifecycle control, and statistics rollups.
//!
//! The engine depends only on the [`lettera_core::CompletionProvider`] trait
//! for text generation, so every flow is testable with a deterministic mock.

pub mod drafter;
pub mod lifecycle;
pub mod revision;
pub mod stats;

pub use drafter::Drafter;
pub use lifecycle::LetterService;
pub use revision::{Revision, RevisionEngine};
pub use stats::{CategoryStats, EmployeeStats, OverviewStats, StatsService};
