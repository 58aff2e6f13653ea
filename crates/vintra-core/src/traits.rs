// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage traits at the persistence seam.
//!
//! The gateway and the bot pipeline consume conversations and tickets
//! through these traits; `vintra-storage` provides the SQLite
//! implementation. Every mutating operation is a single atomic call, so
//! callers never need read-then-write transactions.

use async_trait::async_trait;

use crate::error::VintraError;
use crate::types::{Conversation, ConversationStatus, Message, Sender, Ticket};

/// Parameters for creating a conversation. Participant identity is captured
/// once here and is immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct NewConversation {
    pub conversation_id: String,
    pub email: String,
    pub name: String,
    pub category: String,
    pub sub_category: String,
}

/// Parameters for creating a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub category: crate::types::TicketCategory,
    pub email: String,
    pub name: String,
    pub message: String,
    pub sub_category: String,
}

/// Partial update for a ticket; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TicketUpdate {
    pub category: Option<crate::types::TicketCategory>,
    pub reply: Option<String>,
    pub status: Option<ConversationStatus>,
    pub sub_category: Option<String>,
}

/// Append-only conversation log persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create a conversation. Fails with [`VintraError::DuplicateId`] if the
    /// id already exists.
    async fn create_conversation(&self, new: NewConversation) -> Result<Conversation, VintraError>;

    /// Fetch one conversation with its full ordered message log.
    /// Fails with [`VintraError::NotFound`] if absent.
    async fn get_conversation(&self, id: &str) -> Result<Conversation, VintraError>;

    /// List all conversations (with message logs), newest activity first.
    /// `category` filters by exact equality when present.
    async fn list_conversations(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Conversation>, VintraError>;

    /// Append one message and bump `updated_at`. The append and the bump are
    /// one atomic operation. Fails with [`VintraError::NotFound`] if the
    /// conversation does not exist. Appending never changes status.
    async fn append_message(
        &self,
        id: &str,
        sender: Sender,
        text: &str,
    ) -> Result<Message, VintraError>;

    /// Set conversation status. All transitions are permitted and the call
    /// is idempotent. Fails with [`VintraError::NotFound`] if absent.
    async fn set_status(&self, id: &str, status: ConversationStatus) -> Result<(), VintraError>;

    /// Hard delete; irreversible. Fails with [`VintraError::NotFound`] if absent.
    async fn delete_conversation(&self, id: &str) -> Result<(), VintraError>;

    /// Raw `(timestamp, sender)` pairs for messages at or after `since`
    /// (RFC 3339), in ascending timestamp order. The read side buckets these
    /// for the activity chart.
    async fn message_activity_since(
        &self,
        since: &str,
    ) -> Result<Vec<(String, Sender)>, VintraError>;
}

/// Support ticket persistence. A separate aggregate from conversations by
/// design; no relation is enforced between the two.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Create a ticket with a generated id and `open` status.
    async fn create_ticket(&self, new: NewTicket) -> Result<Ticket, VintraError>;

    /// List all tickets, newest first.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, VintraError>;

    /// Apply a partial update (reply, status, category, sub-category).
    /// Fails with [`VintraError::NotFound`] if absent.
    async fn update_ticket(&self, id: &str, update: TicketUpdate) -> Result<Ticket, VintraError>;

    /// Hard delete. Fails with [`VintraError::NotFound`] if absent.
    async fn delete_ticket(&self, id: &str) -> Result<(), VintraError>;
}

/// Combined store seam consumed by the gateway.
pub trait Store: ConversationStore + TicketStore {}

impl<T: ConversationStore + TicketStore> Store for T {}
