// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vintra support backend.
//!
//! Provides the shared error type, domain types (conversations, messages,
//! tickets), and the storage traits that the gateway consumes. The SQLite
//! implementation lives in `vintra-storage`; the bot engine in `vintra-bot`.

pub mod error;
pub mod traits;
pub mod types;

pub use error::VintraError;
pub use traits::{ConversationStore, NewConversation, NewTicket, Store, TicketStore, TicketUpdate};
pub use types::{
    Conversation, ConversationStatus, Message, Sender, Ticket, TicketCategory, now_rfc3339,
};
