//! Auto-moderation rule service
//!
//! Guild-scoped CRUD for moderation rules plus the action log read path.
//! All operations require guild ownership.

use guard_core::entities::AutoModRule;
use guard_core::error::DomainError;
use guard_core::traits::{ActionLogQuery, RuleRecord};
use guard_core::Snowflake;
use tracing::{info, instrument, warn};

use crate::dto::{
    ActionLogResponse, CreateRuleRequest, LogQueryParams, RuleResponse, UpdateRuleRequest,
};
use crate::dto::mappers::{actions_from_wire, trigger_from_wire};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Upper bound on rules per trigger kind per guild
pub const MAX_RULES_PER_TRIGGER_TYPE: i64 = 6;

const DEFAULT_LOG_LIMIT: i64 = 50;

/// Auto-moderation rule service
pub struct RuleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RuleService<'a> {
    /// Create a new RuleService
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

    /// Create a new rule
    #[instrument(skip(self, request), fields(rule_name = %request.name))]
    pub async fn create_rule(
        &self,
        guild_id: Snowflake,
        creator_id: Snowflake,
        request: CreateRuleRequest,
    ) -> ServiceResult<RuleResponse> {
        self.require_owner(guild_id, creator_id).await?;

        if request.event_type != "message_send" {
            return Err(ServiceError::validation(format!(
                "unknown event type: {}",
                request.event_type
            )));
        }

        let trigger = trigger_from_wire(&request.trigger_type, &request.trigger_metadata)?;
        let actions = actions_from_wire(&request.actions)?;

        let existing = self
            .ctx
            .rule_repo()
            .count_by_trigger_kind(guild_id, trigger.kind())
            .await?;
        if existing >= MAX_RULES_PER_TRIGGER_TYPE {
            return Err(DomainError::RuleLimitReached {
                max: MAX_RULES_PER_TRIGGER_TYPE as usize,
            }
            .into());
        }

        let mut rule = AutoModRule::new(
            self.ctx.generate_id(),
            guild_id,
            request.name,
            creator_id,
            trigger,
            actions,
        );
        if let Some(enabled) = request.enabled {
            rule.enabled = enabled;
        }

        self.ctx.rule_repo().create(&rule).await?;

        info!(rule_id = %rule.id, guild_id = %guild_id, "Auto-moderation rule created");

        Ok(RuleResponse::from(rule))
    }

    /// List a guild's rules in creation order
    #[instrument(skip(self))]
    pub async fn list_rules(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<RuleResponse>> {
        self.require_owner(guild_id, user_id).await?;

        let records = self.ctx.rule_repo().find_by_guild(guild_id, false).await?;
        Ok(records
            .into_iter()
            .filter_map(|record| match record {
                RuleRecord::Decoded(rule) => Some(RuleResponse::from(rule)),
                // Listing stays usable even if one stored payload rotted
                RuleRecord::Corrupt { rule_id, detail } => {
                    warn!(rule_id = %rule_id, guild_id = %guild_id, %detail,
                        "Skipping undecodable auto-moderation rule in listing");
                    None
                }
            })
            .collect())
    }

    /// Get a single rule
    #[instrument(skip(self))]
    pub async fn get_rule(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<RuleResponse> {
        self.require_owner(guild_id, user_id).await?;

        let rule = self
            .ctx
            .rule_repo()
            .find_by_id(guild_id, rule_id)
            .await?
            .ok_or(DomainError::RuleNotFound(rule_id))?;

        Ok(RuleResponse::from(rule))
    }

    /// Update a rule with a partial merge
    ///
    /// A new `triggerType` requires its metadata; metadata alone re-shapes
    /// the current kind. Changing the kind re-checks the per-kind cap.
    #[instrument(skip(self, request))]
    pub async fn update_rule(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
        user_id: Snowflake,
        request: UpdateRuleRequest,
    ) -> ServiceResult<RuleResponse> {
        self.require_owner(guild_id, user_id).await?;

        let mut rule = self
            .ctx
            .rule_repo()
            .find_by_id(guild_id, rule_id)
            .await?
            .ok_or(DomainError::RuleNotFound(rule_id))?;

        if let Some(name) = request.name {
            rule.name = name;
        }

        match (&request.trigger_type, &request.trigger_metadata) {
            (Some(_), None) => {
                return Err(ServiceError::validation(
                    "triggerType requires triggerMetadata",
                ));
            }
            (trigger_type, Some(metadata)) => {
                let kind = trigger_type
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| rule.trigger_kind().as_str().to_string());
                let trigger = trigger_from_wire(&kind, metadata)?;

                if trigger.kind() != rule.trigger_kind() {
                    let existing = self
                        .ctx
                        .rule_repo()
                        .count_by_trigger_kind(guild_id, trigger.kind())
                        .await?;
                    if existing >= MAX_RULES_PER_TRIGGER_TYPE {
                        return Err(DomainError::RuleLimitReached {
                            max: MAX_RULES_PER_TRIGGER_TYPE as usize,
                        }
                        .into());
                    }
                }

                rule.set_trigger(trigger)?;
            }
            (None, None) => {}
        }

        if let Some(actions) = &request.actions {
            rule.actions = actions_from_wire(actions)?;
        }
        if let Some(enabled) = request.enabled {
            rule.set_enabled(enabled);
        }
        rule.updated_at = chrono::Utc::now();

        self.ctx.rule_repo().update(&rule).await?;

        info!(rule_id = %rule.id, guild_id = %guild_id, "Auto-moderation rule updated");

        Ok(RuleResponse::from(rule))
    }

    /// Permanently delete a rule; its action logs remain
    #[instrument(skip(self))]
    pub async fn delete_rule(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.require_owner(guild_id, user_id).await?;

        self.ctx.rule_repo().delete(guild_id, rule_id).await?;

        info!(rule_id = %rule_id, guild_id = %guild_id, "Auto-moderation rule deleted");

        Ok(())
    }

    /// List a guild's action log entries, newest first
    #[instrument(skip(self, params))]
    pub async fn list_logs(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        params: LogQueryParams,
    ) -> ServiceResult<Vec<ActionLogResponse>> {
        self.require_owner(guild_id, user_id).await?;

        let query = ActionLogQuery {
            before: parse_optional_snowflake(params.before.as_deref(), "before")?,
            rule_id: parse_optional_snowflake(params.rule_id.as_deref(), "ruleId")?,
            user_id: parse_optional_snowflake(params.user_id.as_deref(), "userId")?,
            limit: params.limit.unwrap_or(DEFAULT_LOG_LIMIT),
        };

        let logs = self.ctx.log_repo().find_by_guild(guild_id, query).await?;
        Ok(logs.iter().map(ActionLogResponse::from).collect())
    }
}

fn parse_optional_snowflake(
    value: Option<&str>,
    field: &str,
) -> ServiceResult<Option<Snowflake>> {
    value
        .map(|s| {
            Snowflake::parse(s)
                .map_err(|_| ServiceError::validation(format!("invalid snowflake in {field}")))
        })
        .transpose()
}
