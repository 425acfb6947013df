//! PostgreSQL implementation of ActionLogRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgArguments, query::QueryAs, PgPool, Postgres};
use tracing::instrument;

use guard_core::entities::ActionLog;
use guard_core::traits::{ActionLogQuery, ActionLogRepository, RepoResult};
use guard_core::value_objects::Snowflake;

use crate::mappers::ActionLogInsert;
use crate::models::ActionLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ActionLogRepository
///
/// The log is append-only: no update or delete paths exist.
#[derive(Clone)]
pub struct PgActionLogRepository {
    pool: PgPool,
}

impl PgActionLogRepository {
    /// Create a new PgActionLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bind_optional(
    query: QueryAs<'_, Postgres, ActionLogModel, PgArguments>,
    value: Option<Snowflake>,
) -> QueryAs<'_, Postgres, ActionLogModel, PgArguments> {
    query.bind(value.map(Snowflake::into_inner))
}

#[async_trait]
impl ActionLogRepository for PgActionLogRepository {
    #[instrument(skip(self, log), fields(log_id = %log.id, rule_id = %log.rule_id))]
    async fn append(&self, log: &ActionLog) -> RepoResult<()> {
        let insert = ActionLogInsert::new(log);

        sqlx::query(
            r#"
            INSERT INTO auto_mod_action_logs
                (id, rule_id, guild_id, channel_id, user_id, matched_keyword, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(insert.id)
        .bind(insert.rule_id)
        .bind(insert.guild_id)
        .bind(insert.channel_id)
        .bind(insert.user_id)
        .bind(insert.matched_keyword)
        .bind(insert.content)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_guild(
        &self,
        guild_id: Snowflake,
        query: ActionLogQuery,
    ) -> RepoResult<Vec<ActionLog>> {
        let limit = query.limit.clamp(1, 100);

        // Optional filters are pushed into the query as NULL-tolerant
        // predicates so one statement covers every filter combination.
        let q = sqlx::query_as::<_, ActionLogModel>(
            r#"
            SELECT id, rule_id, guild_id, channel_id, user_id, matched_keyword, content, created_at
            FROM auto_mod_action_logs
            WHERE guild_id = $1
              AND ($2::BIGINT IS NULL OR id < $2)
              AND ($3::BIGINT IS NULL OR rule_id = $3)
              AND ($4::BIGINT IS NULL OR user_id = $4)
            ORDER BY id DESC
            LIMIT $5
            "#,
        )
        .bind(guild_id.into_inner());
        let q = bind_optional(q, query.before);
        let q = bind_optional(q, query.rule_id);
        let q = bind_optional(q, query.user_id);

        let results = q
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(ActionLog::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_since(&self, guild_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM auto_mod_action_logs WHERE guild_id = $1 AND created_at >= $2",
        )
        .bind(guild_id.into_inner())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count.0)
    }
}
