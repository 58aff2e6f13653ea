// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session bot state machine.
//!
//! Two states, derived from the confirmation flag: `Idle` and
//! `AwaitingTicketConfirm`. The flag lives for at most one pending turn: it
//! is consumed on the next turn no matter which intent resolves, so
//! confirmation answers can never leak into unrelated turns. State mutation
//! happens before reply resolution, so the returned snapshot always reflects
//! the post-transition state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::intent::{Intent, classify};
use crate::normalize::normalize;
use crate::replies::resolve_reply;

/// Navigation signal read by the surrounding UI. Set once when the user
/// confirms a ticket; the engine itself never resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActiveView {
    None,
    CreateTicket,
}

/// Ephemeral per-session bot state, owned exclusively by one [`BotSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// True only between an `ask_ticket` turn and the next user turn.
    pub awaiting_ticket_confirm: bool,
    pub active_view: ActiveView,
    /// Last resolved intent. Stored for future multi-turn rules; no current
    /// rule consumes it.
    pub last_topic: Option<Intent>,
    /// Fixed at session creation; selects the reply template language set.
    pub user_lang: String,
}

impl SessionState {
    pub fn new(lang: &str) -> Self {
        Self {
            awaiting_ticket_confirm: false,
            active_view: ActiveView::None,
            last_topic: None,
            user_lang: lang.to_string(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new("no")
    }
}

/// The externally observable result of one turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub intent: Intent,
    pub state: SessionState,
}

/// One user's bot session. Calls to [`handle_message`](Self::handle_message)
/// must be serialized per session; sessions share no mutable state.
#[derive(Debug, Clone)]
pub struct BotSession {
    state: SessionState,
}

impl BotSession {
    pub fn new(lang: &str) -> Self {
        Self {
            state: SessionState::new(lang),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Process one turn: normalize, classify against the current state,
    /// apply the transition, then resolve the reply. No intent is ever
    /// dropped silently and no input can make this fail.
    pub fn handle_message(&mut self, text: &str) -> TurnOutcome {
        let normalized = normalize(text);
        let intent = classify(&normalized, &self.state);
        self.apply_transition(intent);
        self.state.last_topic = Some(intent);
        debug!(%intent, awaiting = self.state.awaiting_ticket_confirm, "bot turn");
        let reply = resolve_reply(intent, &self.state.user_lang);
        TurnOutcome {
            reply,
            intent,
            state: self.state.clone(),
        }
    }

    fn apply_transition(&mut self, intent: Intent) {
        // A pending confirmation is consumed by whatever this turn resolved
        // to, including intents that are neither yes nor no.
        self.state.awaiting_ticket_confirm = false;
        match intent {
            Intent::AskTicket => self.state.awaiting_ticket_confirm = true,
            Intent::ConfirmTicketYes => self.state.active_view = ActiveView::CreateTicket,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_ticket_enters_awaiting_confirmation() {
        let mut session = BotSession::new("no");
        let turn = session.handle_message("Hjelp, jeg har et problem");
        assert_eq!(turn.intent, Intent::AskTicket);
        assert!(turn.state.awaiting_ticket_confirm);
        assert_eq!(turn.state.active_view, ActiveView::None);
    }

    #[test]
    fn yes_confirms_and_opens_ticket_view() {
        let mut session = BotSession::new("no");
        session.handle_message("hjelp");
        let turn = session.handle_message("ja takk");
        assert_eq!(turn.intent, Intent::ConfirmTicketYes);
        assert!(!turn.state.awaiting_ticket_confirm);
        assert_eq!(turn.state.active_view, ActiveView::CreateTicket);
    }

    #[test]
    fn no_declines_without_opening_the_view() {
        let mut session = BotSession::new("no");
        session.handle_message("support");
        let turn = session.handle_message("nei");
        assert_eq!(turn.intent, Intent::ConfirmTicketNo);
        assert!(!turn.state.awaiting_ticket_confirm);
        assert_eq!(turn.state.active_view, ActiveView::None);
    }

    #[test]
    fn unrelated_answer_resets_the_pending_flag() {
        let mut session = BotSession::new("no");
        session.handle_message("hjelp");
        let turn = session.handle_message("hva er prisen");
        assert_eq!(turn.intent, Intent::Price);
        assert!(!turn.state.awaiting_ticket_confirm);
    }

    #[test]
    fn snapshot_reflects_post_transition_state() {
        let mut session = BotSession::new("no");
        let turn = session.handle_message("ticket");
        // The snapshot in the outcome must already show the new state.
        assert!(turn.state.awaiting_ticket_confirm);
        assert!(session.state().awaiting_ticket_confirm);
    }

    #[test]
    fn last_topic_tracks_each_turn() {
        let mut session = BotSession::new("no");
        session.handle_message("hei");
        assert_eq!(session.state().last_topic, Some(Intent::Greeting));
        session.handle_message("hva koster det");
        assert_eq!(session.state().last_topic, Some(Intent::Price));
    }

    #[test]
    fn reply_comes_from_the_matching_template() {
        let mut session = BotSession::new("no");
        let turn = session.handle_message("hvem lager spillet");
        assert_eq!(turn.reply, "Vi er et lite indie-team på tre personer.");
    }

    #[test]
    fn fallback_turn_never_mutates_flags() {
        let mut session = BotSession::new("no");
        let turn = session.handle_message("asdkjh");
        assert_eq!(turn.intent, Intent::Fallback);
        assert!(!turn.state.awaiting_ticket_confirm);
        assert_eq!(turn.state.active_view, ActiveView::None);
    }
}
