// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Vintra support backend.
//!
//! Exposes the admin REST API (conversations, tickets, availability,
//! typing, chat activity) and the user-facing chat pipeline over axum.
//! All state behind the handlers lives in [`server::GatewayState`]: the
//! storage seam, the per-conversation bot sessions, and the process-local
//! admin flags.

pub mod activity;
pub mod chat;
pub mod error;
pub mod handlers;
pub mod server;
pub mod typing;

pub use error::ApiError;
pub use server::{GatewayState, ServerConfig, SessionSlot, build_router, start_server};
pub use typing::TypingBoard;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::tempdir;

    use vintra_bot::Intent;
    use vintra_config::StorageConfig;
    use vintra_core::ConversationStore;
    use vintra_core::types::Sender;
    use vintra_storage::SqliteStorage;

    use super::*;
    use crate::chat::{ChatRequest, post_chat};
    use axum::Json;
    use axum::extract::State;

    async fn make_state(dir: &tempfile::TempDir) -> GatewayState {
        let db_path = dir.path().join("pipeline.db");
        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        });
        storage.initialize().await.unwrap();
        GatewayState::new(Arc::new(storage), "no")
    }

    fn chat_body(conversation_id: Option<&str>, message: &str) -> ChatRequest {
        serde_json::from_value(serde_json::json!({
            "conversationId": conversation_id,
            "message": message,
            "email": "alice@example.com",
            "name": "Alice"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn chat_turn_creates_conversation_and_appends_both_sides() {
        let dir = tempdir().unwrap();
        let state = make_state(&dir).await;

        let Json(resp) = post_chat(State(state.clone()), Json(chat_body(Some("c1"), "hei")))
            .await
            .unwrap();
        assert_eq!(resp.intent, Intent::Greeting);
        assert_eq!(resp.conversation_id, "c1");

        let conversation = state.store.get_conversation("c1").await.unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].sender, Sender::User);
        assert_eq!(conversation.messages[0].text, "hei");
        assert_eq!(conversation.messages[1].sender, Sender::Bot);
        assert_eq!(conversation.messages[1].text, resp.reply);
    }

    #[tokio::test]
    async fn chat_without_id_generates_one_and_keeps_session_state() {
        let dir = tempdir().unwrap();
        let state = make_state(&dir).await;

        let Json(first) = post_chat(State(state.clone()), Json(chat_body(None, "hjelp")))
            .await
            .unwrap();
        assert_eq!(first.intent, Intent::AskTicket);
        assert!(!first.conversation_id.is_empty());

        // Second turn on the same id sees the pending confirmation.
        let Json(second) = post_chat(
            State(state.clone()),
            Json(chat_body(Some(&first.conversation_id), "ja")),
        )
        .await
        .unwrap();
        assert_eq!(second.intent, Intent::ConfirmTicketYes);
        assert_eq!(second.conversation_id, first.conversation_id);

        let conversation = state
            .store
            .get_conversation(&first.conversation_id)
            .await
            .unwrap();
        assert_eq!(conversation.messages.len(), 4);
    }

    #[tokio::test]
    async fn empty_chat_message_is_a_validation_error() {
        let dir = tempdir().unwrap();
        let state = make_state(&dir).await;

        let err = post_chat(State(state), Json(chat_body(Some("c1"), "   ")))
            .await
            .unwrap_err();
        assert!(matches!(err.0, vintra_core::VintraError::Validation(_)));
    }
}
