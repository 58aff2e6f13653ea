// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw message activity reads for the chat-activity chart.
//!
//! The storage layer returns `(timestamp, sender)` pairs; bucketing into
//! chart series is the gateway's job.

use rusqlite::params;

use vintra_core::VintraError;
use vintra_core::types::Sender;

use crate::database::{Database, map_tr_err};

/// All message `(timestamp, sender)` pairs at or after `since`, ascending.
///
/// `since` must be in the same fixed-width RFC 3339 format the writers use;
/// the comparison is lexicographic.
pub async fn message_activity_since(
    db: &Database,
    since: &str,
) -> Result<Vec<(String, Sender)>, VintraError> {
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT timestamp, sender FROM messages
                 WHERE timestamp >= ?1 ORDER BY timestamp ASC",
            )?;
            let rows = stmt.query_map(params![since], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    super::parse_text_enum(1, row.get::<_, String>(1)?)?,
                ))
            })?;
            let mut pairs = Vec::new();
            for row in rows {
                pairs.push(row?);
            }
            Ok(pairs)
        })
        .await
        .map_err(map_tr_err)
}
