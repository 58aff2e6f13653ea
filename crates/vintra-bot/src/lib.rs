// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The VOTE-bot engine.
//!
//! Pattern-based intent detection over a fixed reply table: regex and
//! substring matching over normalized text, plus a small per-session
//! state machine for the ticket-escalation flow. No ML model involved.
//!
//! The whole pipeline is total: any input resolves to exactly one intent
//! and one reply. Error handling lives at the storage and HTTP seams, not
//! here.

pub mod intent;
pub mod normalize;
pub mod replies;
pub mod session;

pub use intent::{Intent, classify};
pub use normalize::normalize;
pub use replies::{ReplyTemplate, resolve_reply};
pub use session::{ActiveView, BotSession, SessionState, TurnOutcome};
