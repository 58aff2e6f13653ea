// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vintra support backend.

use thiserror::Error;

/// The primary error type used across the storage seam and core operations.
///
/// The bot engine itself is total and never returns this type; unmatched
/// input degrades to a fallback intent instead of erroring.
#[derive(Debug, Error)]
pub enum VintraError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    /// Surfaced to HTTP callers as an upstream-unavailable condition.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An operation referenced a conversation or ticket id that does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A conversation was created with a caller-supplied id that already exists.
    #[error("conversation id already exists: {id}")]
    DuplicateId { id: String },

    /// A required field was missing or a value fell outside a closed enumeration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Gateway/transport errors (bind failure, serve failure).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VintraError {
    /// Shorthand for a `NotFound` on a conversation id.
    pub fn conversation_not_found(id: impl Into<String>) -> Self {
        VintraError::NotFound {
            kind: "conversation",
            id: id.into(),
        }
    }

    /// Shorthand for a `NotFound` on a ticket id.
    pub fn ticket_not_found(id: impl Into<String>) -> Self {
        VintraError::NotFound {
            kind: "ticket",
            id: id.into(),
        }
    }
}
