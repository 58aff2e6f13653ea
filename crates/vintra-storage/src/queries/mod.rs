// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per aggregate.

pub mod activity;
pub mod conversations;
pub mod tickets;

/// Parse a TEXT column into a string-backed enum, reporting failures as a
/// column conversion error. The CHECK constraints make failures unreachable
/// for rows written by this crate, but hand-edited databases exist.
pub(crate) fn parse_text_enum<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
