// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table (plus read-only statistics rollups).

pub mod chat;
pub mod employees;
pub mod letters;
pub mod stats;
pub mod users;
