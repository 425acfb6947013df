//! Raid protection handlers
//!
//! Endpoints for raid configuration, manual resolution, and the member-join
//! feed. Join events are reported by the platform on behalf of the joining
//! user and are not owner-gated.

use axum::{
    extract::{Path, State},
    Json,
};
use guard_service::{
    dto::{RaidConfigResponse, RaidResolveResponse, UpdateRaidConfigRequest},
    RaidGuard,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

/// Get a guild's raid protection configuration
///
/// GET /guilds/{guild_id}/raid-config
pub async fn get_raid_config(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
) -> ApiResult<Json<RaidConfigResponse>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let guard = RaidGuard::new(state.service_context());
    let response = guard.get_config(guild_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update a guild's raid protection configuration
///
/// PATCH /guilds/{guild_id}/raid-config
pub async fn update_raid_config(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRaidConfigRequest>,
) -> ApiResult<Json<RaidConfigResponse>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let guard = RaidGuard::new(state.service_context());
    let response = guard
        .update_config(guild_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Manually resolve an active raid
///
/// POST /guilds/{guild_id}/raid-resolve
pub async fn resolve_raid(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
) -> ApiResult<Json<RaidResolveResponse>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let guard = RaidGuard::new(state.service_context());
    let response = guard.resolve(guild_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Record a member join for raid detection
///
/// POST /guilds/{guild_id}/members/{user_id}/joins
pub async fn record_join(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((guild_id, user_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let guard = RaidGuard::new(state.service_context());
    guard.record_join(guild_id, user_id).await?;
    Ok(NoContent)
}
