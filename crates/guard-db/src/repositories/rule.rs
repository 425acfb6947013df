//! PostgreSQL implementation of RuleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guard_core::entities::{AutoModRule, TriggerKind};
use guard_core::traits::{RepoResult, RuleRecord, RuleRepository};
use guard_core::value_objects::Snowflake;

use crate::mappers::RuleInsert;
use crate::models::AutoModRuleModel;

use super::error::{map_db_error, rule_not_found};

const RULE_COLUMNS: &str =
    "id, guild_id, name, creator_id, event_kind, trigger_kind, trigger, actions, enabled, created_at, updated_at";

/// PostgreSQL implementation of RuleRepository
#[derive(Clone)]
pub struct PgRuleRepository {
    pool: PgPool,
}

impl PgRuleRepository {
    /// Create a new PgRuleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleRepository for PgRuleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
    ) -> RepoResult<Option<AutoModRule>> {
        let result = sqlx::query_as::<_, AutoModRuleModel>(&format!(
            "SELECT {RULE_COLUMNS} FROM auto_mod_rules WHERE guild_id = $1 AND id = $2",
        ))
        .bind(guild_id.into_inner())
        .bind(rule_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AutoModRule::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_guild(
        &self,
        guild_id: Snowflake,
        enabled_only: bool,
    ) -> RepoResult<Vec<RuleRecord>> {
        // Snowflake IDs are time-ordered, so ORDER BY id is creation order.
        let results = if enabled_only {
            sqlx::query_as::<_, AutoModRuleModel>(&format!(
                "SELECT {RULE_COLUMNS} FROM auto_mod_rules WHERE guild_id = $1 AND enabled = TRUE ORDER BY id ASC",
            ))
            .bind(guild_id.into_inner())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, AutoModRuleModel>(&format!(
                "SELECT {RULE_COLUMNS} FROM auto_mod_rules WHERE guild_id = $1 ORDER BY id ASC",
            ))
            .bind(guild_id.into_inner())
            .fetch_all(&self.pool)
            .await
        }
        .map_err(map_db_error)?;

        // A row whose JSONB payload no longer decodes must not poison the
        // whole listing; it travels as a Corrupt record instead.
        Ok(results
            .into_iter()
            .map(|model| {
                let rule_id = Snowflake::new(model.id);
                match AutoModRule::try_from(model) {
                    Ok(rule) => RuleRecord::Decoded(rule),
                    Err(e) => RuleRecord::Corrupt {
                        rule_id,
                        detail: e.to_string(),
                    },
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_by_trigger_kind(
        &self,
        guild_id: Snowflake,
        kind: TriggerKind,
    ) -> RepoResult<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM auto_mod_rules WHERE guild_id = $1 AND trigger_kind = $2",
        )
        .bind(guild_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count.0)
    }

    #[instrument(skip(self, rule), fields(rule_id = %rule.id))]
    async fn create(&self, rule: &AutoModRule) -> RepoResult<()> {
        let insert = RuleInsert::new(rule)?;

        sqlx::query(
            r#"
            INSERT INTO auto_mod_rules
                (id, guild_id, name, creator_id, event_kind, trigger_kind, trigger, actions, enabled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(insert.id)
        .bind(insert.guild_id)
        .bind(insert.name)
        .bind(insert.creator_id)
        .bind(&insert.event_kind)
        .bind(insert.trigger_kind)
        .bind(&insert.trigger)
        .bind(&insert.actions)
        .bind(insert.enabled)
        .bind(rule.created_at)
        .bind(rule.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, rule), fields(rule_id = %rule.id))]
    async fn update(&self, rule: &AutoModRule) -> RepoResult<()> {
        let insert = RuleInsert::new(rule)?;

        let result = sqlx::query(
            r#"
            UPDATE auto_mod_rules
            SET name = $3, trigger_kind = $4, trigger = $5, actions = $6, enabled = $7, updated_at = $8
            WHERE guild_id = $1 AND id = $2
            "#,
        )
        .bind(insert.guild_id)
        .bind(insert.id)
        .bind(insert.name)
        .bind(insert.trigger_kind)
        .bind(&insert.trigger)
        .bind(&insert.actions)
        .bind(insert.enabled)
        .bind(rule.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(rule_not_found(rule.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: Snowflake, rule_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM auto_mod_rules WHERE guild_id = $1 AND id = $2")
            .bind(guild_id.into_inner())
            .bind(rule_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(rule_not_found(rule_id));
        }

        Ok(())
    }
}
