// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the REST API.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use lettera_core::LetteraError;
use lettera_engine::{LetterService, RevisionEngine, StatsService};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub letters: Arc<LetterService>,
    pub revisions: Arc<RevisionEngine>,
    pub stats: Arc<StatsService>,
    /// Process start time for the health endpoint's uptime field.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        letters: Arc<LetterService>,
        revisions: Arc<RevisionEngine>,
        stats: Arc<StatsService>,
    ) -> Self {
        Self {
            letters,
            revisions,
            stats,
            start_time: Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors ServerConfig from lettera-config).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Assemble the full API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/auth/register/user",
            post(handlers::auth::register_user),
        )
        .route(
            "/api/auth/register/employee",
            post(handlers::auth::register_employee),
        )
        .route("/api/auth/login", post(handlers::auth::login))
        .route(
            "/api/letters",
            post(handlers::letters::submit_letter).get(handlers::letters::list_letters),
        )
        .route("/api/letters/{id}", get(handlers::letters::get_letter))
        .route(
            "/api/employees/letters",
            get(handlers::letters::employee_queue),
        )
        .route(
            "/api/employees/letters/{id}/open",
            post(handlers::letters::open_letter),
        )
        .route(
            "/api/employees/letters/{id}/chat",
            post(handlers::chat::post_message).get(handlers::chat::history),
        )
        .route(
            "/api/employees/letters/{id}/send",
            post(handlers::letters::finalize),
        )
        .route("/api/statistics/overview", get(handlers::stats::overview))
        .route(
            "/api/statistics/by_category",
            get(handlers::stats::by_category),
        )
        .route(
            "/api/statistics/by_employee",
            get(handlers::stats::by_employee),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until the task is aborted.
pub async fn start_server(config: &GatewayConfig, state: AppState) -> Result<(), LetteraError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| LetteraError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| LetteraError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
