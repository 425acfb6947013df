//! PostgreSQL implementation of GuildDirectory
//!
//! The moderation subsystem shares a database with the rest of the platform
//! and reads guild ownership and membership directly from the platform
//! tables. It never writes to them.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guard_core::error::DomainError;
use guard_core::traits::GuildDirectory;
use guard_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of GuildDirectory
#[derive(Clone)]
pub struct PgGuildDirectory {
    pool: PgPool,
}

impl PgGuildDirectory {
    /// Create a new PgGuildDirectory
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuildDirectory for PgGuildDirectory {
    #[instrument(skip(self))]
    async fn channel_guild(
        &self,
        channel_id: Snowflake,
    ) -> Result<Option<Snowflake>, DomainError> {
        let row: Option<(Option<i64>,)> = sqlx::query_as(
            "SELECT guild_id FROM channels WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match row {
            None => Err(DomainError::ChannelNotFound(channel_id)),
            // DM channels exist but carry no guild; moderation skips them.
            Some((guild_id,)) => Ok(guild_id.map(Snowflake::new)),
        }
    }

    #[instrument(skip(self))]
    async fn is_owner(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<bool, DomainError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT owner_id FROM guilds WHERE id = $1")
            .bind(guild_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match row {
            None => Err(DomainError::GuildNotFound(guild_id)),
            Some((owner_id,)) => Ok(owner_id == user_id.into_inner()),
        }
    }

    #[instrument(skip(self))]
    async fn is_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<bool, DomainError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT 1 FROM guild_members WHERE guild_id = $1 AND user_id = $2",
        )
        .bind(guild_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.is_some())
    }
}
