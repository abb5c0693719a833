//! PostgreSQL implementation of `ConversationStore`.
//!
//! Conversations are one row each; the append-only turn history is stored
//! as a JSONB column and rewritten whole on upsert. At the volumes one
//! dialogue reaches this is cheaper than a per-turn table and keeps the
//! aggregate's serialization format in one place.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::conversation::{Conversation, ConversationTurn};
use crate::domain::foundation::{ConversationId, Timestamp, UserId};
use crate::ports::{ConversationStore, ConversationSummary, StoreError};

/// PostgreSQL-backed conversation store.
#[derive(Clone)]
pub struct PostgresConversationStore {
    pool: PgPool,
}

impl PostgresConversationStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PostgresConversationStore {
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner, title, created_at, turns
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to load conversation: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let owner: String = row.get("owner");
        let owner = UserId::new(owner)
            .map_err(|e| StoreError::Corrupt(format!("invalid owner: {}", e)))?;

        let turns_json: serde_json::Value = row.get("turns");
        let turns: Vec<ConversationTurn> = serde_json::from_value(turns_json)
            .map_err(|e| StoreError::Corrupt(format!("invalid turn history: {}", e)))?;

        Ok(Some(Conversation::from_parts(
            ConversationId::from_uuid(row.get("id")),
            owner,
            row.get("title"),
            Timestamp::from_datetime(row.get("created_at")),
            turns,
        )))
    }

    async fn upsert(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let turns = serde_json::to_value(conversation.turns())
            .map_err(|e| StoreError::Database(format!("Failed to encode turns: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO conversations (id, owner, title, created_at, turns)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET turns = EXCLUDED.turns
            "#,
        )
        .bind(conversation.id().as_uuid())
        .bind(conversation.owner().as_str())
        .bind(conversation.title())
        .bind(conversation.created_at().as_datetime())
        .bind(turns)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to upsert conversation: {}", e)))?;

        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ConversationSummary>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, created_at
            FROM conversations
            WHERE owner = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to list conversations: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| ConversationSummary {
                id: ConversationId::from_uuid(row.get("id")),
                title: row.get("title"),
                created_at: Timestamp::from_datetime(row.get("created_at")),
            })
            .collect())
    }
}
