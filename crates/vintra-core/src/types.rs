// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types used across the storage seam and the gateway.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Who appended a message to a conversation log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    Admin,
}

/// Conversation lifecycle status.
///
/// Transitions are deliberately unrestricted: any status may follow any
/// status, and appending a message never changes status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Open,
    Pending,
    Closed,
}

/// Closed set of support ticket categories. Values outside this set are a
/// validation error at the API boundary, never coerced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum TicketCategory {
    Games,
    General,
    Other,
    Work,
    Billing,
    Support,
    Sales,
}

/// One entry in a conversation's append-only message log.
/// Immutable once appended; insertion order is the only ordering guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// RFC 3339 UTC, millisecond precision (see [`now_rfc3339`]).
    pub timestamp: String,
}

/// A persisted conversation: participant identity captured once, a message
/// log, and admin-managed classification/status metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub conversation_id: String,
    pub email: String,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub status: ConversationStatus,
    pub messages: Vec<Message>,
    pub created_at: String,
    pub updated_at: String,
}

/// A support ticket. Independent of conversations by design: the two are
/// separate escalation paths with no foreign key between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub category: TicketCategory,
    pub email: String,
    pub name: String,
    pub message: String,
    pub sub_category: String,
    pub reply: String,
    pub status: ConversationStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Current UTC time as RFC 3339 with fixed millisecond precision.
///
/// The fixed width makes lexicographic order equal to time order, which the
/// storage layer relies on for `ORDER BY updated_at DESC`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
