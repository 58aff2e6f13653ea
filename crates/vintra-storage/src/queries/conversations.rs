// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation CRUD and the append-only message log.

use rusqlite::params;

use vintra_core::types::{Conversation, ConversationStatus, Message, Sender, now_rfc3339};
use vintra_core::{NewConversation, VintraError};

use crate::database::{Database, map_tr_err};

/// Create a conversation with `open` status and an empty message log.
///
/// A caller-supplied id that already exists surfaces as
/// [`VintraError::DuplicateId`], never as a silent upsert.
pub async fn create_conversation(
    db: &Database,
    new: NewConversation,
) -> Result<Conversation, VintraError> {
    let now = now_rfc3339();
    let record = Conversation {
        conversation_id: new.conversation_id,
        email: new.email,
        name: new.name,
        category: new.category,
        sub_category: new.sub_category,
        status: ConversationStatus::Open,
        messages: Vec::new(),
        created_at: now.clone(),
        updated_at: now,
    };
    let row = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations
                     (conversation_id, email, name, category, sub_category, status,
                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    row.conversation_id,
                    row.email,
                    row.name,
                    row.category,
                    row.sub_category,
                    row.status.to_string(),
                    row.created_at,
                    row.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| duplicate_or_storage(e, &record.conversation_id))?;
    Ok(record)
}

/// Get one conversation with its full message log, in append order.
pub async fn get_conversation(db: &Database, id: &str) -> Result<Conversation, VintraError> {
    let id_owned = id.to_string();
    let found = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT conversation_id, email, name, category, sub_category, status,
                        created_at, updated_at
                 FROM conversations WHERE conversation_id = ?1",
            )?;
            let result = stmt.query_row(params![id_owned], conversation_from_row);
            match result {
                Ok(mut conversation) => {
                    conversation.messages = load_messages(conn, &conversation.conversation_id)?;
                    Ok(Some(conversation))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;
    found.ok_or_else(|| VintraError::conversation_not_found(id))
}

/// List all conversations with message logs, most recent activity first.
/// `category` filters by exact string equality when present.
pub async fn list_conversations(
    db: &Database,
    category: Option<&str>,
) -> Result<Vec<Conversation>, VintraError> {
    let category = category.map(|c| c.to_string());
    db.connection()
        .call(move |conn| {
            let mut conversations = Vec::new();
            match &category {
                Some(filter) => {
                    let mut stmt = conn.prepare(
                        "SELECT conversation_id, email, name, category, sub_category, status,
                                created_at, updated_at
                         FROM conversations WHERE category = ?1 ORDER BY updated_at DESC",
                    )?;
                    let rows = stmt.query_map(params![filter], conversation_from_row)?;
                    for row in rows {
                        conversations.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT conversation_id, email, name, category, sub_category, status,
                                created_at, updated_at
                         FROM conversations ORDER BY updated_at DESC",
                    )?;
                    let rows = stmt.query_map([], conversation_from_row)?;
                    for row in rows {
                        conversations.push(row?);
                    }
                }
            }
            for conversation in &mut conversations {
                conversation.messages = load_messages(conn, &conversation.conversation_id)?;
            }
            Ok(conversations)
        })
        .await
        .map_err(map_tr_err)
}

/// Append one message and bump `updated_at`, atomically.
///
/// Status is untouched: appending to a closed conversation is allowed and
/// does not reopen it.
pub async fn append_message(
    db: &Database,
    id: &str,
    sender: Sender,
    text: &str,
) -> Result<Message, VintraError> {
    let ts = now_rfc3339();
    let id_owned = id.to_string();
    let text_owned = text.to_string();
    let appended = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let changed = tx.execute(
                "UPDATE conversations SET updated_at = ?1 WHERE conversation_id = ?2",
                params![ts, id_owned],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            tx.execute(
                "INSERT INTO messages (conversation_id, sender, text, timestamp)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id_owned, sender.to_string(), text_owned, ts],
            )?;
            tx.commit()?;
            Ok(Some(Message {
                sender,
                text: text_owned,
                timestamp: ts,
            }))
        })
        .await
        .map_err(map_tr_err)?;
    appended.ok_or_else(|| VintraError::conversation_not_found(id))
}

/// Set conversation status. Any transition is permitted; setting the current
/// status again is a no-op success.
pub async fn set_status(
    db: &Database,
    id: &str,
    status: ConversationStatus,
) -> Result<(), VintraError> {
    let id_owned = id.to_string();
    let ts = now_rfc3339();
    let changed = db
        .connection()
        .call(move |conn| {
            Ok(conn.execute(
                "UPDATE conversations SET status = ?1, updated_at = ?2
                 WHERE conversation_id = ?3",
                params![status.to_string(), ts, id_owned],
            )?)
        })
        .await
        .map_err(map_tr_err)?;
    if changed == 0 {
        return Err(VintraError::conversation_not_found(id));
    }
    Ok(())
}

/// Hard delete a conversation and (via cascade) its messages.
pub async fn delete_conversation(db: &Database, id: &str) -> Result<(), VintraError> {
    let id_owned = id.to_string();
    let changed = db
        .connection()
        .call(move |conn| {
            Ok(conn.execute(
                "DELETE FROM conversations WHERE conversation_id = ?1",
                params![id_owned],
            )?)
        })
        .await
        .map_err(map_tr_err)?;
    if changed == 0 {
        return Err(VintraError::conversation_not_found(id));
    }
    Ok(())
}

fn conversation_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        conversation_id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        sub_category: row.get(4)?,
        status: super::parse_text_enum(5, row.get::<_, String>(5)?)?,
        messages: Vec::new(),
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Load a conversation's messages in append (rowid) order. Equal timestamps
/// cannot reorder entries this way.
fn load_messages(conn: &rusqlite::Connection, id: &str) -> rusqlite::Result<Vec<Message>> {
    let mut stmt = conn.prepare(
        "SELECT sender, text, timestamp FROM messages
         WHERE conversation_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![id], |row| {
        Ok(Message {
            sender: super::parse_text_enum(0, row.get::<_, String>(0)?)?,
            text: row.get(1)?,
            timestamp: row.get(2)?,
        })
    })?;
    rows.collect()
}

fn duplicate_or_storage(err: tokio_rusqlite::Error, id: &str) -> VintraError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            VintraError::DuplicateId { id: id.to_string() }
        }
        _ => map_tr_err(err),
    }
}
