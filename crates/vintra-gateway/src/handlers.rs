// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the admin REST API.
//!
//! Conversations, tickets, admin availability, and health. Enum-valued
//! fields arrive as strings and are parsed here so bad values surface as
//! 400s instead of generic body-rejection errors.

use std::str::FromStr;
use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use vintra_core::VintraError;
use vintra_core::types::{Conversation, ConversationStatus, Sender, Ticket, TicketCategory};
use vintra_core::{NewTicket, TicketUpdate};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Query parameters for GET /api/conversations.
#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Request body for POST /api/conversations/{id}/reply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_text: String,
}

/// Request body for PUT /api/conversations/{id}.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Request body for POST /api/tickets.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreateRequest {
    pub category: String,
    pub email: String,
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub sub_category: Option<String>,
}

/// Request body for PUT /api/tickets/{id}. All fields optional.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdateRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
}

/// Body for the admin availability endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityBody {
    pub available: bool,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// --- Conversations ---

/// GET /api/conversations
pub async fn list_conversations(
    State(state): State<GatewayState>,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<Vec<Conversation>>, ApiError> {
    let conversations = state
        .store
        .list_conversations(query.category.as_deref())
        .await?;
    Ok(Json(conversations))
}

/// GET /api/conversations/{id}
pub async fn get_conversation(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
    Ok(Json(state.store.get_conversation(&id).await?))
}

/// POST /api/conversations/{id}/reply
///
/// Appends an admin message. Works against closed conversations too and
/// never changes status.
pub async fn post_admin_reply(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<ReplyRequest>,
) -> Result<Json<Conversation>, ApiError> {
    if body.reply_text.trim().is_empty() {
        return Err(VintraError::Validation("replyText must not be empty".to_string()).into());
    }
    state
        .store
        .append_message(&id, Sender::Admin, &body.reply_text)
        .await?;
    Ok(Json(state.store.get_conversation(&id).await?))
}

/// PUT /api/conversations/{id}
pub async fn put_conversation_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Conversation>, ApiError> {
    let status = parse_status(&body.status)?;
    state.store.set_status(&id, status).await?;
    Ok(Json(state.store.get_conversation(&id).await?))
}

/// DELETE /api/conversations/{id}
pub async fn delete_conversation(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_conversation(&id).await?;
    // Drop the in-memory bot session along with the log.
    state.sessions.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

// --- Tickets ---

/// GET /api/tickets
pub async fn list_tickets(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    Ok(Json(state.store.list_tickets().await?))
}

/// POST /api/tickets
pub async fn post_ticket(
    State(state): State<GatewayState>,
    Json(body): Json<TicketCreateRequest>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let category = parse_category(&body.category)?;
    for (field, value) in [
        ("email", &body.email),
        ("name", &body.name),
        ("message", &body.message),
    ] {
        if value.trim().is_empty() {
            return Err(VintraError::Validation(format!("{field} must not be empty")).into());
        }
    }
    let ticket = state
        .store
        .create_ticket(NewTicket {
            category,
            email: body.email,
            name: body.name,
            message: body.message,
            sub_category: body.sub_category.unwrap_or_default(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// PUT /api/tickets/{id}
pub async fn put_ticket(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<TicketUpdateRequest>,
) -> Result<Json<Ticket>, ApiError> {
    let update = TicketUpdate {
        category: body.category.as_deref().map(parse_category).transpose()?,
        reply: body.reply,
        status: body.status.as_deref().map(parse_status).transpose()?,
        sub_category: body.sub_category,
    };
    Ok(Json(state.store.update_ticket(&id, update).await?))
}

/// DELETE /api/tickets/{id}
pub async fn delete_ticket(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_ticket(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Admin availability ---

/// GET /api/admin/availability
pub async fn get_availability(State(state): State<GatewayState>) -> Json<AvailabilityBody> {
    Json(AvailabilityBody {
        available: state.admin_available.load(Ordering::Relaxed),
    })
}

/// POST /api/admin/availability
pub async fn post_availability(
    State(state): State<GatewayState>,
    Json(body): Json<AvailabilityBody>,
) -> Json<AvailabilityBody> {
    state.admin_available.store(body.available, Ordering::Relaxed);
    Json(body)
}

// --- Health ---

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

fn parse_status(raw: &str) -> Result<ConversationStatus, VintraError> {
    ConversationStatus::from_str(raw).map_err(|_| {
        VintraError::Validation(format!(
            "invalid status `{raw}`; expected open, pending, or closed"
        ))
    })
}

fn parse_category(raw: &str) -> Result<TicketCategory, VintraError> {
    TicketCategory::from_str(raw).map_err(|_| {
        VintraError::Validation(format!(
            "invalid category `{raw}`; expected Games, General, Other, Work, Billing, Support, or Sales"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_request_uses_camel_case() {
        let req: ReplyRequest =
            serde_json::from_str(r#"{"replyText": "Vi ser på saken"}"#).unwrap();
        assert_eq!(req.reply_text, "Vi ser på saken");
    }

    #[test]
    fn status_parsing_rejects_unknown_values() {
        assert_eq!(parse_status("closed").unwrap(), ConversationStatus::Closed);
        assert!(matches!(
            parse_status("archived"),
            Err(VintraError::Validation(_))
        ));
        // Case is significant; statuses are lowercase on the wire.
        assert!(parse_status("Closed").is_err());
    }

    #[test]
    fn category_parsing_never_coerces() {
        assert_eq!(parse_category("Billing").unwrap(), TicketCategory::Billing);
        assert!(parse_category("billing").is_err());
        assert!(parse_category("Spam").is_err());
    }

    #[test]
    fn ticket_create_request_deserializes() {
        let req: TicketCreateRequest = serde_json::from_str(
            r#"{
                "category": "Games",
                "email": "bob@example.com",
                "name": "Bob",
                "message": "Krasjer ved oppstart",
                "subCategory": "VOTE"
            }"#,
        )
        .unwrap();
        assert_eq!(req.category, "Games");
        assert_eq!(req.sub_category.as_deref(), Some("VOTE"));
    }

    #[test]
    fn ticket_update_request_allows_partial_bodies() {
        let req: TicketUpdateRequest =
            serde_json::from_str(r#"{"reply": "Fikset i neste patch"}"#).unwrap();
        assert_eq!(req.reply.as_deref(), Some("Fikset i neste patch"));
        assert!(req.category.is_none());
        assert!(req.status.is_none());
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
