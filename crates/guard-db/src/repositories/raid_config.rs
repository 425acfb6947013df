//! PostgreSQL implementation of RaidConfigRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use guard_core::entities::RaidConfig;
use guard_core::traits::{RaidConfigRepository, RepoResult};
use guard_core::value_objects::Snowflake;

use crate::mappers::RaidConfigUpsert;
use crate::models::RaidConfigModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RaidConfigRepository
#[derive(Clone)]
pub struct PgRaidConfigRepository {
    pool: PgPool,
}

impl PgRaidConfigRepository {
    /// Create a new PgRaidConfigRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RaidConfigRepository for PgRaidConfigRepository {
    #[instrument(skip(self))]
    async fn find(&self, guild_id: Snowflake) -> RepoResult<Option<RaidConfig>> {
        let result = sqlx::query_as::<_, RaidConfigModel>(
            r#"
            SELECT guild_id, enabled, join_threshold, join_window_seconds, action, updated_at
            FROM raid_configs
            WHERE guild_id = $1
            "#,
        )
        .bind(guild_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(RaidConfig::try_from).transpose()
    }

    #[instrument(skip(self, config), fields(guild_id = %config.guild_id))]
    async fn upsert(&self, config: &RaidConfig) -> RepoResult<()> {
        let upsert = RaidConfigUpsert::new(config);

        sqlx::query(
            r#"
            INSERT INTO raid_configs (guild_id, enabled, join_threshold, join_window_seconds, action, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (guild_id) DO UPDATE
            SET enabled = EXCLUDED.enabled,
                join_threshold = EXCLUDED.join_threshold,
                join_window_seconds = EXCLUDED.join_window_seconds,
                action = EXCLUDED.action,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(upsert.guild_id)
        .bind(upsert.enabled)
        .bind(upsert.join_threshold)
        .bind(upsert.join_window_seconds)
        .bind(upsert.action)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRaidConfigRepository>();
    }
}
