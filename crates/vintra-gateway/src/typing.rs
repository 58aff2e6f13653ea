// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typing indicator side channel.
//!
//! Process-local and intentionally unpersisted: a restart clears it.
//! Keyed by `(conversation scope, operator id)` so two admins typing in
//! different conversations do not clobber each other. The legacy body
//! without those keys maps to a global scope and a default operator, and
//! reads report "any operator typing" so old clients keep working.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

/// Scope used when the client does not name a conversation.
const GLOBAL_SCOPE: &str = "";
/// Operator used when the client does not identify itself.
const DEFAULT_OPERATOR: &str = "admin";

/// Set of currently-typing `(conversation, operator)` pairs.
#[derive(Clone, Default)]
pub struct TypingBoard {
    entries: Arc<DashMap<(String, String), ()>>,
}

impl TypingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or clear one operator's typing state. Last write wins per key.
    pub fn set(&self, conversation_id: Option<&str>, operator_id: Option<&str>, typing: bool) {
        let key = (
            conversation_id.unwrap_or(GLOBAL_SCOPE).to_string(),
            operator_id.unwrap_or(DEFAULT_OPERATOR).to_string(),
        );
        if typing {
            self.entries.insert(key, ());
        } else {
            self.entries.remove(&key);
        }
    }

    /// Is anyone typing? A conversation filter also sees global-scope
    /// entries, since a legacy writer cannot say which conversation it
    /// meant.
    pub fn any_typing(&self, conversation_id: Option<&str>) -> bool {
        match conversation_id {
            Some(id) => self
                .entries
                .iter()
                .any(|entry| entry.key().0 == id || entry.key().0 == GLOBAL_SCOPE),
            None => !self.entries.is_empty(),
        }
    }
}

/// Request body for POST /api/admin/typing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingRequest {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub operator_id: Option<String>,
    pub typing: bool,
}

/// Query parameters for GET /api/admin/typing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingQuery {
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Response body for the typing endpoints.
#[derive(Debug, Serialize)]
pub struct TypingResponse {
    pub typing: bool,
}

/// POST /api/admin/typing
pub async fn post_typing(
    State(state): State<GatewayState>,
    Json(body): Json<TypingRequest>,
) -> Json<TypingResponse> {
    state.typing.set(
        body.conversation_id.as_deref(),
        body.operator_id.as_deref(),
        body.typing,
    );
    Json(TypingResponse {
        typing: body.typing,
    })
}

/// GET /api/admin/typing
pub async fn get_typing(
    State(state): State<GatewayState>,
    Query(query): Query<TypingQuery>,
) -> Json<TypingResponse> {
    Json(TypingResponse {
        typing: state.typing.any_typing(query.conversation_id.as_deref()),
    })
}
