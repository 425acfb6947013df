//! Auto-moderation rule handlers
//!
//! Endpoints for managing a guild's auto-moderation rules and for reading
//! the enforcement log. All endpoints are restricted to the guild owner.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use guard_service::{
    dto::{ActionLogResponse, CreateRuleRequest, LogQueryParams, RuleResponse, UpdateRuleRequest},
    RuleService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create an auto-moderation rule
///
/// POST /guilds/{guild_id}/auto-moderation/rules
pub async fn create_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateRuleRequest>,
) -> ApiResult<Created<Json<RuleResponse>>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let service = RuleService::new(state.service_context());
    let response = service.create_rule(guild_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List a guild's auto-moderation rules
///
/// GET /guilds/{guild_id}/auto-moderation/rules
pub async fn list_rules(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
) -> ApiResult<Json<Vec<RuleResponse>>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let service = RuleService::new(state.service_context());
    let rules = service.list_rules(guild_id, auth.user_id).await?;
    Ok(Json(rules))
}

/// Get a single auto-moderation rule
///
/// GET /guilds/{guild_id}/auto-moderation/rules/{rule_id}
pub async fn get_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((guild_id, rule_id)): Path<(String, String)>,
) -> ApiResult<Json<RuleResponse>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;
    let rule_id = rule_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid rule_id format"))?;

    let service = RuleService::new(state.service_context());
    let response = service.get_rule(guild_id, rule_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update an auto-moderation rule
///
/// PATCH /guilds/{guild_id}/auto-moderation/rules/{rule_id}
pub async fn update_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((guild_id, rule_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateRuleRequest>,
) -> ApiResult<Json<RuleResponse>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;
    let rule_id = rule_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid rule_id format"))?;

    let service = RuleService::new(state.service_context());
    let response = service
        .update_rule(guild_id, rule_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete an auto-moderation rule
///
/// DELETE /guilds/{guild_id}/auto-moderation/rules/{rule_id}
pub async fn delete_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((guild_id, rule_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;
    let rule_id = rule_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid rule_id format"))?;

    let service = RuleService::new(state.service_context());
    service.delete_rule(guild_id, rule_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Query the guild's enforcement log
///
/// GET /guilds/{guild_id}/auto-moderation/logs
pub async fn list_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
    Query(params): Query<LogQueryParams>,
) -> ApiResult<Json<Vec<ActionLogResponse>>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let service = RuleService::new(state.service_context());
    let logs = service.list_logs(guild_id, auth.user_id, params).await?;
    Ok(Json(logs))
}
