// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vintra serve` command implementation.
//!
//! Wires SQLite storage into the HTTP gateway and runs until a shutdown
//! signal arrives, then checkpoints the database.

use std::sync::Arc;

use tracing::info;

use vintra_config::VintraConfig;
use vintra_core::VintraError;
use vintra_gateway::{GatewayState, ServerConfig, start_server};
use vintra_storage::SqliteStorage;

/// Runs the `vintra serve` command.
pub async fn run_serve(config: VintraConfig) -> Result<(), VintraError> {
    init_tracing(&config.server.log_level);

    info!("starting vintra serve");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let state = GatewayState::new(storage.clone(), &config.bot.default_lang);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    tokio::select! {
        result = start_server(&server_config, state) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    storage.close().await?;
    info!("vintra serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vintra={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
