//! PostgreSQL implementation of MessageSink
//!
//! Writes allowed messages into the platform's messages table. Blocked
//! messages never reach this sink.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use guard_core::error::DomainError;
use guard_core::traits::{MessageSink, OutboundMessage, PersistedMessage};

use super::error::map_db_error;

/// PostgreSQL implementation of MessageSink
#[derive(Clone)]
pub struct PgMessageSink {
    pool: PgPool,
}

impl PgMessageSink {
    /// Create a new PgMessageSink
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageSink for PgMessageSink {
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn persist(&self, message: OutboundMessage) -> Result<PersistedMessage, DomainError> {
        let created_at: (DateTime<Utc>,) = sqlx::query_as(
            r#"
            INSERT INTO messages (id, channel_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING created_at
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.channel_id.into_inner())
        .bind(message.author_id.into_inner())
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(PersistedMessage {
            id: message.id,
            channel_id: message.channel_id,
            author_id: message.author_id,
            content: message.content,
            created_at: created_at.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMessageSink>();
    }
}
