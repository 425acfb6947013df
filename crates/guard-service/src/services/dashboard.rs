//! Moderation dashboard service
//!
//! Owner-only rollup of a guild's moderation state plus the recent-actions
//! listing.

use chrono::{Duration, Utc};
use guard_core::error::DomainError;
use guard_core::traits::ActionLogQuery;
use guard_core::Snowflake;
use tracing::instrument;

use crate::dto::{ActionLogResponse, DashboardResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

const DEFAULT_WINDOW_DAYS: i64 = 7;
const DEFAULT_ACTIONS_LIMIT: i64 = 25;

/// Moderation dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    /// Create a new DashboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn require_owner(&self, guild_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.guild_directory().is_owner(guild_id, user_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotGuildOwner.into())
        }
    }

    /// Dashboard rollup over the last `days` days (default 7)
    #[instrument(skip(self))]
    pub async fn dashboard(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        days: Option<i64>,
    ) -> ServiceResult<DashboardResponse> {
        self.require_owner(guild_id, user_id).await?;

        let days = days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, 90);
        let since = Utc::now() - Duration::days(days);

        // Corrupt rows still count; the rule row exists and is enabled
        let active_records = self.ctx.rule_repo().find_by_guild(guild_id, true).await?;
        let recent_actions = self.ctx.log_repo().count_since(guild_id, since).await?;
        let raiding = self.ctx.raid_tracker().is_raiding(guild_id);

        Ok(DashboardResponse {
            active_auto_mod_rules: active_records.len() as i64,
            recent_auto_mod_actions: recent_actions,
            raid_status: if raiding { "active" } else { "inactive" }.to_string(),
        })
    }

    /// Most recent moderation actions, newest first
    #[instrument(skip(self))]
    pub async fn recent_actions(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<ActionLogResponse>> {
        self.require_owner(guild_id, user_id).await?;

        let query = ActionLogQuery {
            limit: limit.unwrap_or(DEFAULT_ACTIONS_LIMIT),
            ..Default::default()
        };
        let logs = self.ctx.log_repo().find_by_guild(guild_id, query).await?;
        Ok(logs.iter().map(ActionLogResponse::from).collect())
    }
}
