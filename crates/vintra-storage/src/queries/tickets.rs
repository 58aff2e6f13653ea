// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket CRUD operations.

use rusqlite::params;
use uuid::Uuid;

use vintra_core::types::{ConversationStatus, Ticket, now_rfc3339};
use vintra_core::{NewTicket, TicketUpdate, VintraError};

use crate::database::{Database, map_tr_err};

/// Create a ticket with a generated id, empty reply, and `open` status.
pub async fn create_ticket(db: &Database, new: NewTicket) -> Result<Ticket, VintraError> {
    let now = now_rfc3339();
    let record = Ticket {
        id: Uuid::new_v4().to_string(),
        category: new.category,
        email: new.email,
        name: new.name,
        message: new.message,
        sub_category: new.sub_category,
        reply: String::new(),
        status: ConversationStatus::Open,
        created_at: now.clone(),
        updated_at: now,
    };
    let row = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tickets
                     (id, category, email, name, message, sub_category, reply, status,
                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row.id,
                    row.category.to_string(),
                    row.email,
                    row.name,
                    row.message,
                    row.sub_category,
                    row.reply,
                    row.status.to_string(),
                    row.created_at,
                    row.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    Ok(record)
}

/// List all tickets, newest first.
pub async fn list_tickets(db: &Database) -> Result<Vec<Ticket>, VintraError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, category, email, name, message, sub_category, reply, status,
                        created_at, updated_at
                 FROM tickets ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map([], ticket_from_row)?;
            let mut tickets = Vec::new();
            for row in rows {
                tickets.push(row?);
            }
            Ok(tickets)
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a partial update; `None` fields are left unchanged. Returns the
/// updated ticket.
pub async fn update_ticket(
    db: &Database,
    id: &str,
    update: TicketUpdate,
) -> Result<Ticket, VintraError> {
    let id_owned = id.to_string();
    let ts = now_rfc3339();
    let updated = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let current = {
                let mut stmt = tx.prepare(
                    "SELECT id, category, email, name, message, sub_category, reply, status,
                            created_at, updated_at
                     FROM tickets WHERE id = ?1",
                )?;
                match stmt.query_row(params![id_owned], ticket_from_row) {
                    Ok(ticket) => Some(ticket),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(e.into()),
                }
            };
            let Some(mut ticket) = current else {
                return Ok(None);
            };
            if let Some(category) = update.category {
                ticket.category = category;
            }
            if let Some(reply) = update.reply {
                ticket.reply = reply;
            }
            if let Some(status) = update.status {
                ticket.status = status;
            }
            if let Some(sub_category) = update.sub_category {
                ticket.sub_category = sub_category;
            }
            ticket.updated_at = ts;
            tx.execute(
                "UPDATE tickets
                 SET category = ?1, reply = ?2, status = ?3, sub_category = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    ticket.category.to_string(),
                    ticket.reply,
                    ticket.status.to_string(),
                    ticket.sub_category,
                    ticket.updated_at,
                    ticket.id,
                ],
            )?;
            tx.commit()?;
            Ok(Some(ticket))
        })
        .await
        .map_err(map_tr_err)?;
    updated.ok_or_else(|| VintraError::ticket_not_found(id))
}

/// Hard delete a ticket.
pub async fn delete_ticket(db: &Database, id: &str) -> Result<(), VintraError> {
    let id_owned = id.to_string();
    let changed = db
        .connection()
        .call(move |conn| {
            Ok(conn.execute("DELETE FROM tickets WHERE id = ?1", params![id_owned])?)
        })
        .await
        .map_err(map_tr_err)?;
    if changed == 0 {
        return Err(VintraError::ticket_not_found(id));
    }
    Ok(())
}

fn ticket_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        category: super::parse_text_enum(1, row.get::<_, String>(1)?)?,
        email: row.get(2)?,
        name: row.get(3)?,
        message: row.get(4)?,
        sub_category: row.get(5)?,
        reply: row.get(6)?,
        status: super::parse_text_enum(7, row.get::<_, String>(7)?)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vintra_core::types::TicketCategory;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn make_new(category: TicketCategory) -> NewTicket {
        NewTicket {
            category,
            email: "bob@example.com".to_string(),
            name: "Bob".to_string(),
            message: "Spillet starter ikke".to_string(),
            sub_category: String::new(),
        }
    }

    #[tokio::test]
    async fn create_generates_id_and_defaults() {
        let (db, _dir) = setup_db().await;
        let ticket = create_ticket(&db, make_new(TicketCategory::Support))
            .await
            .unwrap();
        assert!(!ticket.id.is_empty());
        assert_eq!(ticket.status, ConversationStatus::Open);
        assert!(ticket.reply.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let (db, _dir) = setup_db().await;
        let a = create_ticket(&db, make_new(TicketCategory::Games)).await.unwrap();
        let b = create_ticket(&db, make_new(TicketCategory::Billing)).await.unwrap();

        let tickets = list_tickets(&db).await.unwrap();
        assert_eq!(tickets.len(), 2);
        // Same-millisecond creations tie on created_at; both orders are valid then.
        if a.created_at != b.created_at {
            assert_eq!(tickets[0].id, b.id);
        }
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() {
        let (db, _dir) = setup_db().await;
        let ticket = create_ticket(&db, make_new(TicketCategory::Support))
            .await
            .unwrap();

        let updated = update_ticket(
            &db,
            &ticket.id,
            TicketUpdate {
                reply: Some("Vi ser på saken!".to_string()),
                status: Some(ConversationStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.reply, "Vi ser på saken!");
        assert_eq!(updated.status, ConversationStatus::Pending);
        assert_eq!(updated.category, TicketCategory::Support);
        assert_eq!(updated.message, "Spillet starter ikke");
        assert!(updated.updated_at >= ticket.updated_at);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_missing_ticket_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = update_ticket(&db, "no-such-id", TicketUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VintraError::NotFound { kind: "ticket", .. }));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_removes_the_ticket() {
        let (db, _dir) = setup_db().await;
        let ticket = create_ticket(&db, make_new(TicketCategory::Other))
            .await
            .unwrap();
        delete_ticket(&db, &ticket.id).await.unwrap();

        assert!(list_tickets(&db).await.unwrap().is_empty());
        let err = delete_ticket(&db, &ticket.id).await.unwrap_err();
        assert!(matches!(err, VintraError::NotFound { .. }));
        db.close().await.unwrap();
    }
}
