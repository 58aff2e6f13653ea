// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text normalization so keyword rules match regardless of
//! capitalization, accenting, or punctuation noise.
//!
//! Lowercases, NFD-decomposes and strips combining marks while preserving
//! the Norwegian letters `æ ø å`, replaces everything outside
//! `[a-z0-9æøå]` with a space, collapses whitespace runs, and trims.
//! Total and deterministic; empty input yields empty output.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize free text for keyword matching.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        for lower in ch.to_lowercase() {
            // æøå are letters here, not accent variants. They must not
            // reach the NFD pass: å decomposes to `a` + ring, which would
            // fold it away and break the "når"-based release rules.
            if matches!(lower, 'æ' | 'ø' | 'å') {
                push_letter(&mut out, &mut pending_space, lower);
                continue;
            }
            for base in std::iter::once(lower).nfd() {
                if is_combining_mark(base) {
                    continue;
                }
                match base {
                    'a'..='z' | '0'..='9' => push_letter(&mut out, &mut pending_space, base),
                    _ => pending_space = true,
                }
            }
        }
    }
    out
}

fn push_letter(out: &mut String, pending_space: &mut bool, c: char) {
    if *pending_space && !out.is_empty() {
        out.push(' ');
    }
    *pending_space = false;
    out.push(c);
}
