// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The user-facing chat pipeline.
//!
//! One POST runs a full bot turn: find or create the conversation, append
//! the user message, run normalize/classify/transition/resolve, append the
//! bot reply. The per-conversation mutex is held across the whole turn so
//! two concurrent messages for the same conversation cannot interleave
//! their appends or race on the confirmation flag.

use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vintra_bot::Intent;
use vintra_core::types::Sender;
use vintra_core::{NewConversation, VintraError};

use crate::error::ApiError;
use crate::server::{GatewayState, SessionSlot};

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Omitted on the first message; the server generates an id then.
    #[serde(default)]
    pub conversation_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Response body for POST /api/chat.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub intent: Intent,
    pub conversation_id: String,
}

/// POST /api/chat
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if body.message.trim().is_empty() {
        return Err(VintraError::Validation("message must not be empty".to_string()).into());
    }

    let conversation_id = body
        .conversation_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let lang = body
        .language
        .clone()
        .unwrap_or_else(|| state.default_lang.clone());

    let now_secs = state.now_secs();
    state.sweep_idle_sessions(now_secs);

    // One mutex per conversation, held for the whole turn.
    let slot = state
        .sessions
        .entry(conversation_id.clone())
        .or_insert_with(|| SessionSlot::new(&lang, now_secs))
        .clone();
    slot.last_used.store(now_secs, Ordering::Relaxed);
    let mut session = slot.session.lock().await;

    ensure_conversation(&state, &conversation_id, &body).await?;

    state
        .store
        .append_message(&conversation_id, Sender::User, &body.message)
        .await?;

    let outcome = session.handle_message(&body.message);
    debug!(
        conversation_id = %conversation_id,
        intent = %outcome.intent,
        "chat turn"
    );

    state
        .store
        .append_message(&conversation_id, Sender::Bot, &outcome.reply)
        .await?;

    Ok(Json(ChatResponse {
        reply: outcome.reply,
        intent: outcome.intent,
        conversation_id,
    }))
}

/// Create the conversation on first contact; later turns see it exist.
async fn ensure_conversation(
    state: &GatewayState,
    id: &str,
    body: &ChatRequest,
) -> Result<(), VintraError> {
    match state.store.get_conversation(id).await {
        Ok(_) => Ok(()),
        Err(VintraError::NotFound { .. }) => {
            state
                .store
                .create_conversation(NewConversation {
                    conversation_id: id.to_string(),
                    email: body.email.clone().unwrap_or_default(),
                    name: body.name.clone().unwrap_or_default(),
                    category: body.category.clone().unwrap_or_default(),
                    sub_category: body.sub_category.clone().unwrap_or_default(),
                })
                .await?;
            info!(conversation_id = %id, "conversation created");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
