//! Moderation dashboard handlers
//!
//! Owner-only rollup of moderation activity plus a recent-actions feed.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use guard_service::{
    dto::{ActionLogResponse, DashboardResponse},
    DashboardService,
};
use serde::Deserialize;

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for the dashboard rollup
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Lookback window in days, clamped to 1..=90
    pub days: Option<i64>,
}

/// Query parameters for the recent-actions feed
#[derive(Debug, Deserialize)]
pub struct ActionsQuery {
    pub limit: Option<i64>,
}

/// Moderation dashboard rollup
///
/// GET /guilds/{guild_id}/moderation/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
    Query(params): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let service = DashboardService::new(state.service_context());
    let response = service
        .dashboard(guild_id, auth.user_id, params.days)
        .await?;
    Ok(Json(response))
}

/// Recent moderation actions, newest first
///
/// GET /guilds/{guild_id}/moderation/actions
pub async fn recent_actions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guild_id): Path<String>,
    Query(params): Query<ActionsQuery>,
) -> ApiResult<Json<Vec<ActionLogResponse>>> {
    let guild_id = guild_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))?;

    let service = DashboardService::new(state.service_context());
    let actions = service
        .recent_actions(guild_id, auth.user_id, params.limit)
        .await?;
    Ok(Json(actions))
}
