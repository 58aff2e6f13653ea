// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply resolution: maps an intent to reply text.
//!
//! Templates are a tagged variant rather than duck-typed values: either a
//! single fixed string or a nonempty set of alternatives picked uniformly at
//! random. The table is partitioned by language key so additional language
//! sets can be added without changing the resolver signature; only the
//! Norwegian set exists today, and unknown languages fall back to it.

use rand::seq::SliceRandom;

use crate::intent::Intent;

/// A reply template for one intent.
#[derive(Debug, Clone, Copy)]
pub enum ReplyTemplate {
    Fixed(&'static str),
    RandomOf(&'static [&'static str]),
}

const FALLBACK_NO: &str =
    "Jeg hjelper gjerne med info om VOTE! Spør om gameplay, pris, lansering eller support.";

/// The Norwegian template set.
fn norwegian(intent: Intent) -> ReplyTemplate {
    use ReplyTemplate::{Fixed, RandomOf};
    match intent {
        Intent::Greeting => RandomOf(&[
            "Hei! 👋 Hva kan jeg hjelpe deg med om VOTE eller Vintra Studio i dag?",
            "Hei hei! 😄 Lurer du på noe om VOTE, pris eller lansering?",
            "Hallais! 🙌 Spør meg gjerne om VOTE, gameplay eller support.",
        ]),
        Intent::Farewell => RandomOf(&[
            "Ha det! 👋 Bare kom tilbake hvis du lurer på mer.",
            "Snakkes! 😊",
        ]),
        Intent::Thanks => RandomOf(&[
            "Bare hyggelig! 😊",
            "Ingen problem, glad jeg kunne hjelpe! 🙌",
        ]),
        Intent::Price => Fixed("Vi sikter rundt 200 kr (~$20), men endelig pris er ikke satt ennå."),
        Intent::ReleaseWindow => Fixed(
            "Planen er å slippe VOTE en gang i løpet av 2026. Spillet er under utvikling, så datoen kan endre seg.",
        ),
        Intent::GameplayInfo => Fixed(
            "VOTE er et historiedrevet action/strategi-spill der valgene dine faktisk får konsekvenser. Vi fokuserer på stemning og historie.",
        ),
        Intent::WhatIsVintra => Fixed(
            "Vintra Studio er et lite indie-studio med tre utviklere. Vi jobber med VOTE, Roblox-prosjekter og nettsider.",
        ),
        Intent::WhatIsVote => Fixed(
            "VOTE er vårt historiedrevne spill der valgene dine betyr noe. Vil du høre mer om gameplay eller lansering?",
        ),
        Intent::TeamSize => Fixed("Vi er et lite indie-team på tre personer."),
        Intent::AskTicket => Fixed(
            "Høres ut som du trenger support. Vil du at jeg oppretter en support-ticket nå?",
        ),
        Intent::ConfirmTicketYes => Fixed(
            "Supert — bytter til Ny ticket. Legg inn en kort tittel og beskrivelse.",
        ),
        Intent::ConfirmTicketNo => Fixed("Ingen problem. Bare si ifra hvis du ombestemmer deg."),
        Intent::Fallback => Fixed(FALLBACK_NO),
    }
}

/// Look up the template set for a language key.
fn table_for(lang: &str) -> fn(Intent) -> ReplyTemplate {
    match lang {
        "no" => norwegian,
        // New language sets slot in here; anything unknown resolves to
        // Norwegian so the resolver stays total.
        _ => norwegian,
    }
}

/// Resolve an intent to reply text. Never fails.
pub fn resolve_reply(intent: Intent, lang: &str) -> String {
    match table_for(lang)(intent) {
        ReplyTemplate::Fixed(text) => text.to_string(),
        ReplyTemplate::RandomOf(options) => options
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_NO)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_templates_resolve_verbatim() {
        assert_eq!(
            resolve_reply(Intent::TeamSize, "no"),
            "Vi er et lite indie-team på tre personer."
        );
        assert!(resolve_reply(Intent::AskTicket, "no").contains("support-ticket"));
    }

    #[test]
    fn random_templates_pick_from_the_set() {
        let greeting = match norwegian(Intent::Greeting) {
            ReplyTemplate::RandomOf(options) => options,
            ReplyTemplate::Fixed(_) => panic!("greeting should have alternatives"),
        };
        for _ in 0..20 {
            let reply = resolve_reply(Intent::Greeting, "no");
            assert!(greeting.contains(&reply.as_str()));
        }
    }

    #[test]
    fn unknown_language_falls_back_to_norwegian() {
        assert_eq!(
            resolve_reply(Intent::TeamSize, "xx"),
            resolve_reply(Intent::TeamSize, "no")
        );
    }

    #[test]
    fn every_intent_has_a_template() {
        let all = [
            Intent::WhatIsVintra,
            Intent::TeamSize,
            Intent::Price,
            Intent::ReleaseWindow,
            Intent::GameplayInfo,
            Intent::WhatIsVote,
            Intent::AskTicket,
            Intent::ConfirmTicketYes,
            Intent::ConfirmTicketNo,
            Intent::Greeting,
            Intent::Thanks,
            Intent::Farewell,
            Intent::Fallback,
        ];
        for intent in all {
            assert!(!resolve_reply(intent, "no").is_empty());
        }
    }
}
