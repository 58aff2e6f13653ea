// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification over normalized text.
//!
//! A fixed-priority rule list: state-conditioned confirmation rules first,
//! then topic keywords, then support keywords, then social keywords, then a
//! fallback. First match wins; there is no scoring. The classifier is total
//! and returns exactly one intent per call.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::session::SessionState;

/// The user's inferred goal for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Questions about the studio itself.
    WhatIsVintra,
    /// Who makes the game / how many people.
    TeamSize,
    /// Pricing questions.
    Price,
    /// When the game launches; requires a "when" token and a release token.
    ReleaseWindow,
    /// What playing the game is like.
    GameplayInfo,
    /// What the game is about.
    WhatIsVote,
    /// The user needs support; the bot offers to open a ticket.
    AskTicket,
    /// Affirmative answer to the pending ticket offer.
    ConfirmTicketYes,
    /// Negative answer to the pending ticket offer.
    ConfirmTicketNo,
    Greeting,
    Thanks,
    Farewell,
    /// Nothing matched; the bot points at what it can answer.
    Fallback,
}

impl Intent {
    /// Wire label, matching the serde representation.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::WhatIsVintra => "what_is_vintra",
            Intent::TeamSize => "team_size",
            Intent::Price => "price",
            Intent::ReleaseWindow => "release_window",
            Intent::GameplayInfo => "gameplay_info",
            Intent::WhatIsVote => "what_is_vote",
            Intent::AskTicket => "ask_ticket",
            Intent::ConfirmTicketYes => "confirm_ticket_yes",
            Intent::ConfirmTicketNo => "confirm_ticket_no",
            Intent::Greeting => "greeting",
            Intent::Thanks => "thanks",
            Intent::Farewell => "farewell",
            Intent::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Whole-word token patterns, compiled once. Input is already normalized,
// so the patterns never need case-insensitivity or punctuation handling.
static YES_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(ja|japp|jepp|yes|ok)\b").expect("invalid regex: yes tokens")
});
static NO_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(nei|no|nope)\b").expect("invalid regex: no tokens"));
static SUPPORT_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(hjelp|support|ticket|sak|kundeservice)\b")
        .expect("invalid regex: support tokens")
});
static GREETING_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(hei|hallo|heisann|hi|hello)\b").expect("invalid regex: greeting tokens")
});
static THANKS_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(takk|thanks)\b").expect("invalid regex: thanks tokens"));
static FAREWELL_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(hade|snakkes|bye)\b").expect("invalid regex: farewell tokens")
});

/// Classify one normalized turn of input against the current session state.
///
/// An ambiguous answer while a ticket confirmation is pending is not forced
/// into a confirm branch: it falls through and is treated as an ordinary new
/// query. That behavior is deliberate.
pub fn classify(normalized: &str, state: &SessionState) -> Intent {
    let n = normalized;

    if state.awaiting_ticket_confirm {
        if YES_TOKENS.is_match(n) {
            return Intent::ConfirmTicketYes;
        }
        if NO_TOKENS.is_match(n) {
            return Intent::ConfirmTicketNo;
        }
    }

    if n.contains("vintra") {
        return Intent::WhatIsVintra;
    }
    if n.contains("hvem lager") || n.contains("team") || n.contains("hvor mange") {
        return Intent::TeamSize;
    }
    if n.contains("pris") || n.contains("koster") || n.contains("cost") {
        return Intent::Price;
    }
    if n.contains("når") && (n.contains("kommer") || n.contains("release") || n.contains("ute")) {
        return Intent::ReleaseWindow;
    }
    if n.contains("gameplay") || n.contains("hvordan er spillet") {
        return Intent::GameplayInfo;
    }
    if n.contains("hva er vote") || n.contains("hva handler") {
        return Intent::WhatIsVote;
    }

    if SUPPORT_TOKENS.is_match(n) {
        return Intent::AskTicket;
    }

    if GREETING_TOKENS.is_match(n) {
        return Intent::Greeting;
    }
    if THANKS_TOKENS.is_match(n) {
        return Intent::Thanks;
    }
    if FAREWELL_TOKENS.is_match(n) {
        return Intent::Farewell;
    }

    Intent::Fallback
}
