// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lettera serve` command implementation.
//!
//! Starts the full service: SQLite storage, the YandexGPT provider, the
//! domain engine, and the REST gateway. Runs until SIGINT, then checkpoints
//! the database and exits.

use std::sync::Arc;

use lettera_config::LetteraConfig;
use lettera_core::{CompletionProvider, LetteraError};
use lettera_engine::{Drafter, LetterService, RevisionEngine, StatsService};
use lettera_gateway::{AppState, GatewayConfig};
use lettera_storage::Database;
use lettera_yandexgpt::YandexGptProvider;
use tracing::{error, info};

/// Runs the `lettera serve` command.
pub async fn run_serve(config: LetteraConfig) -> Result<(), LetteraError> {
    init_tracing(&config.app.log_level);

    info!("starting lettera serve");

    // Initialize storage.
    let db = Arc::new(
        Database::open_with(&config.storage.database_path, config.storage.wal_mode).await?,
    );
    info!(path = %config.storage.database_path, "storage initialized");

    // Initialize the YandexGPT provider.
    let provider: Arc<dyn CompletionProvider> = {
        let p = YandexGptProvider::new(&config.yandexgpt).map_err(|e| {
            error!(error = %e, "failed to initialize YandexGPT provider");
            eprintln!(
                "error: YandexGPT credentials required. Set via: lettera.toml [yandexgpt] section, \
                 or the YANDEX_API_KEY and YANDEX_FOLDER_ID environment variables"
            );
            e
        })?;
        Arc::new(p)
    };

    // Wire the domain engine.
    let drafter = Drafter::new(
        provider.clone(),
        config.yandexgpt.temperature,
        config.yandexgpt.max_tokens,
    );
    let letters = Arc::new(LetterService::new(db.clone(), drafter));
    let revisions = Arc::new(RevisionEngine::new(
        db.clone(),
        provider,
        config.yandexgpt.temperature,
        config.yandexgpt.max_tokens,
    ));
    let stats = Arc::new(StatsService::new(db.clone()));
    let state = AppState::new(letters, revisions, stats);

    // Run the gateway as a background task so the main task can wait for
    // the shutdown signal.
    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let server = tokio::spawn(async move {
        if let Err(e) = lettera_gateway::start_server(&gateway_config, state).await {
            error!(error = %e, "gateway server error");
        }
    });

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| LetteraError::Internal(format!("failed to install signal handler: {e}")))?;
    info!("shutdown signal received");

    server.abort();
    db.close().await?;
    info!("lettera stopped");
    Ok(())
}

/// Initialize the tracing subscriber from the configured log level.
///
/// `RUST_LOG` overrides the config value when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lettera={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
