// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST API gateway for the Lettera service.
//!
//! A thin axum layer over the domain engine: JSON DTOs, the `X-User-Id`
//! caller extractor, and typed error-to-status mapping. No sessions, no
//! token auth — the service runs as an internal back office tool.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{AppState, GatewayConfig, build_router, start_server};
