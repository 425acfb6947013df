//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{dashboard, health, messages, raid, rules};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(rule_routes())
        .merge(raid_routes())
        .merge(dashboard_routes())
        .merge(message_routes())
}

/// Auto-moderation rule routes
fn rule_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds/:guild_id/auto-moderation/rules", post(rules::create_rule))
        .route("/guilds/:guild_id/auto-moderation/rules", get(rules::list_rules))
        .route("/guilds/:guild_id/auto-moderation/rules/:rule_id", get(rules::get_rule))
        .route("/guilds/:guild_id/auto-moderation/rules/:rule_id", patch(rules::update_rule))
        .route("/guilds/:guild_id/auto-moderation/rules/:rule_id", delete(rules::delete_rule))
        .route("/guilds/:guild_id/auto-moderation/logs", get(rules::list_logs))
}

/// Raid protection routes
fn raid_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds/:guild_id/raid-config", get(raid::get_raid_config))
        .route("/guilds/:guild_id/raid-config", patch(raid::update_raid_config))
        .route("/guilds/:guild_id/raid-resolve", post(raid::resolve_raid))
        .route("/guilds/:guild_id/members/:user_id/joins", post(raid::record_join))
}

/// Moderation dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds/:guild_id/moderation/dashboard", get(dashboard::dashboard))
        .route("/guilds/:guild_id/moderation/actions", get(dashboard::recent_actions))
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new().route("/channels/:channel_id/messages", post(messages::create_message))
}
