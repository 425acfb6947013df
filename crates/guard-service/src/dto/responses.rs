//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Rule Responses
// ============================================================================

/// Trigger metadata as it appears on the wire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMetadataResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_filter: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_total_limit: Option<u32>,
}

/// A single rule action on the wire
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Auto-moderation rule response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResponse {
    pub id: String,
    pub guild_id: String,
    pub name: String,
    pub creator_id: String,
    pub event_type: String,
    pub trigger_type: String,
    pub trigger_metadata: TriggerMetadataResponse,
    pub actions: Vec<ActionResponse>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Action Log Responses
// ============================================================================

/// Moderation action log entry response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLogResponse {
    pub id: String,
    pub rule_id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// Persisted message response (the allowed-send outcome)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub channel_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Raid Responses
// ============================================================================

/// Raid protection config response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidConfigResponse {
    pub guild_id: String,
    pub enabled: bool,
    pub join_threshold: u32,
    pub join_window_seconds: u32,
    pub action: String,
    pub updated_at: DateTime<Utc>,
}

/// Raid resolution acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct RaidResolveResponse {
    pub resolved: bool,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

/// Moderation dashboard rollup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub active_auto_mod_rules: i64,
    pub recent_auto_mod_actions: i64,
    /// "active" while the guild is in the raiding state, else "inactive"
    pub raid_status: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health status of each external dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
