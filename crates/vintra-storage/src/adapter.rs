// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the store traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use vintra_config::StorageConfig;
use vintra_core::types::{Conversation, ConversationStatus, Message, Sender, Ticket};
use vintra_core::{
    ConversationStore, NewConversation, NewTicket, TicketStore, TicketUpdate, VintraError,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`initialize`](Self::initialize).
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize)
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), VintraError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| VintraError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    /// Checkpoint the WAL ahead of shutdown. No-op if never initialized.
    pub async fn close(&self) -> Result<(), VintraError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
        }
        Ok(())
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, VintraError> {
        self.db.get().ok_or_else(|| VintraError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl ConversationStore for SqliteStorage {
    async fn create_conversation(
        &self,
        new: NewConversation,
    ) -> Result<Conversation, VintraError> {
        queries::conversations::create_conversation(self.db()?, new).await
    }

    async fn get_conversation(&self, id: &str) -> Result<Conversation, VintraError> {
        queries::conversations::get_conversation(self.db()?, id).await
    }

    async fn list_conversations(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Conversation>, VintraError> {
        queries::conversations::list_conversations(self.db()?, category).await
    }

    async fn append_message(
        &self,
        id: &str,
        sender: Sender,
        text: &str,
    ) -> Result<Message, VintraError> {
        queries::conversations::append_message(self.db()?, id, sender, text).await
    }

    async fn set_status(&self, id: &str, status: ConversationStatus) -> Result<(), VintraError> {
        queries::conversations::set_status(self.db()?, id, status).await
    }

    async fn delete_conversation(&self, id: &str) -> Result<(), VintraError> {
        queries::conversations::delete_conversation(self.db()?, id).await
    }

    async fn message_activity_since(
        &self,
        since: &str,
    ) -> Result<Vec<(String, Sender)>, VintraError> {
        queries::activity::message_activity_since(self.db()?, since).await
    }
}

#[async_trait]
impl TicketStore for SqliteStorage {
    async fn create_ticket(&self, new: NewTicket) -> Result<Ticket, VintraError> {
        queries::tickets::create_ticket(self.db()?, new).await
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, VintraError> {
        queries::tickets::list_tickets(self.db()?).await
    }

    async fn update_ticket(&self, id: &str, update: TicketUpdate) -> Result<Ticket, VintraError> {
        queries::tickets::update_ticket(self.db()?, id, update).await
    }

    async fn delete_ticket(&self, id: &str) -> Result<(), VintraError> {
        queries::tickets::delete_ticket(self.db()?, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vintra_core::types::TicketCategory;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        let result = storage.initialize().await;
        assert!(result.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        let result = storage.get_conversation("c1").await;
        assert!(matches!(result, Err(VintraError::Storage { .. })));
    }

    #[tokio::test]
    async fn full_conversation_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        let created = storage
            .create_conversation(NewConversation {
                conversation_id: "conv-1".to_string(),
                email: "alice@example.com".to_string(),
                name: "Alice".to_string(),
                category: "Support".to_string(),
                sub_category: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(created.status, ConversationStatus::Open);

        storage
            .append_message("conv-1", Sender::User, "hjelp")
            .await
            .unwrap();
        storage
            .append_message("conv-1", Sender::Bot, "Vil du opprette en ticket?")
            .await
            .unwrap();

        let fetched = storage.get_conversation("conv-1").await.unwrap();
        assert_eq!(fetched.messages.len(), 2);

        storage
            .set_status("conv-1", ConversationStatus::Closed)
            .await
            .unwrap();
        storage.delete_conversation("conv-1").await.unwrap();
        assert!(storage.list_conversations(None).await.unwrap().is_empty());

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn full_ticket_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tickets.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        let ticket = storage
            .create_ticket(NewTicket {
                category: TicketCategory::Games,
                email: "bob@example.com".to_string(),
                name: "Bob".to_string(),
                message: "Krasjer ved oppstart".to_string(),
                sub_category: String::new(),
            })
            .await
            .unwrap();

        let updated = storage
            .update_ticket(
                &ticket.id,
                TicketUpdate {
                    status: Some(ConversationStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ConversationStatus::Pending);

        storage.delete_ticket(&ticket.id).await.unwrap();
        assert!(storage.list_tickets().await.unwrap().is_empty());

        storage.close().await.unwrap();
    }
}
