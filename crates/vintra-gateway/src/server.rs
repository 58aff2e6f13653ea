// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use axum::{
    Router,
    routing::{get, post, put},
};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use vintra_bot::BotSession;
use vintra_core::{Store, VintraError};

use crate::typing::TypingBoard;
use crate::{activity, chat, handlers, typing};

/// Bot sessions untouched for this long are dropped from memory. The
/// persisted conversation is unaffected; a later message simply starts
/// from a fresh session state.
pub const SESSION_IDLE_SECS: u64 = 30 * 60;

/// One conversation's bot session plus its last-touch time, in seconds
/// since gateway start.
#[derive(Clone)]
pub struct SessionSlot {
    /// The mutex serializes chat turns for the conversation.
    pub session: Arc<Mutex<BotSession>>,
    pub last_used: Arc<AtomicU64>,
}

impl SessionSlot {
    pub fn new(lang: &str, now_secs: u64) -> Self {
        Self {
            session: Arc::new(Mutex::new(BotSession::new(lang))),
            last_used: Arc::new(AtomicU64::new(now_secs)),
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Persistence seam for conversations and tickets.
    pub store: Arc<dyn Store + Send + Sync>,
    /// One bot session per conversation id; idle entries are swept on
    /// chat traffic, see [`SESSION_IDLE_SECS`].
    pub sessions: Arc<DashMap<String, SessionSlot>>,
    /// Typing indicator board, process-local.
    pub typing: TypingBoard,
    /// Admin availability flag, process-local, last-write-wins.
    pub admin_available: Arc<AtomicBool>,
    /// Language key for new bot sessions.
    pub default_lang: String,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(store: Arc<dyn Store + Send + Sync>, default_lang: &str) -> Self {
        Self {
            store,
            sessions: Arc::new(DashMap::new()),
            typing: TypingBoard::new(),
            admin_available: Arc::new(AtomicBool::new(false)),
            default_lang: default_lang.to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Seconds elapsed since the gateway started; the clock behind
    /// [`SessionSlot::last_used`].
    pub fn now_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Drop bot sessions that have not seen a chat turn within the idle
    /// window. Storage is untouched.
    pub fn sweep_idle_sessions(&self, now_secs: u64) {
        self.sessions.retain(|_, slot| {
            now_secs.saturating_sub(slot.last_used.load(Ordering::Relaxed)) < SESSION_IDLE_SECS
        });
    }
}

/// Gateway server configuration (mirrors ServerConfig from vintra-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full application router.
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/api/chat", post(chat::post_chat))
        .route("/api/conversations", get(handlers::list_conversations))
        .route(
            "/api/conversations/{id}",
            get(handlers::get_conversation)
                .put(handlers::put_conversation_status)
                .delete(handlers::delete_conversation),
        )
        .route(
            "/api/conversations/{id}/reply",
            post(handlers::post_admin_reply),
        )
        .route(
            "/api/tickets",
            get(handlers::list_tickets).post(handlers::post_ticket),
        )
        .route(
            "/api/tickets/{id}",
            put(handlers::put_ticket).delete(handlers::delete_ticket),
        )
        .route(
            "/api/admin/typing",
            get(typing::get_typing).post(typing::post_typing),
        )
        .route(
            "/api/admin/availability",
            get(handlers::get_availability).post(handlers::post_availability),
        )
        .route("/api/chat-activity", get(activity::get_chat_activity))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), VintraError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VintraError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| VintraError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vintra_config::StorageConfig;
    use vintra_storage::SqliteStorage;

    async fn make_state(dir: &tempfile::TempDir) -> GatewayState {
        let db_path = dir.path().join("gateway.db");
        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        });
        storage.initialize().await.unwrap();
        GatewayState::new(Arc::new(storage), "no")
    }

    #[tokio::test]
    async fn gateway_state_builds_and_clones() {
        let dir = tempdir().unwrap();
        let state = make_state(&dir).await;
        let cloned = state.clone();
        assert_eq!(cloned.default_lang, "no");
        // Clones share the session map.
        state
            .sessions
            .insert("c1".to_string(), SessionSlot::new("no", 0));
        assert!(cloned.sessions.contains_key("c1"));
    }

    #[tokio::test]
    async fn idle_sessions_are_swept_but_fresh_ones_survive() {
        let dir = tempdir().unwrap();
        let state = make_state(&dir).await;
        state
            .sessions
            .insert("stale".to_string(), SessionSlot::new("no", 0));
        state.sessions.insert(
            "fresh".to_string(),
            SessionSlot::new("no", SESSION_IDLE_SECS),
        );

        state.sweep_idle_sessions(SESSION_IDLE_SECS);

        assert!(!state.sessions.contains_key("stale"));
        assert!(state.sessions.contains_key("fresh"));
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let dir = tempdir().unwrap();
        let state = make_state(&dir).await;
        // Route conflicts panic at build time, so constructing is the test.
        let _app = build_router(state);
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
