//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and, where they carry free-form
//! input, `Validate`.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Auto-Moderation Rule Requests
// ============================================================================

/// Trigger payload as it appears on the wire
///
/// The wire splits a trigger into `triggerType` plus a metadata object whose
/// relevant field depends on the type. The mapper converts this pair into
/// the domain's tagged `Trigger` enum and rejects mismatches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMetadataDto {
    /// Keywords for `keyword` triggers
    pub keyword_filter: Option<Vec<String>>,

    /// Preset list names for `keyword_preset` triggers
    pub presets: Option<Vec<String>>,

    /// Mention cap for `mention_spam` triggers
    pub mention_total_limit: Option<u32>,
}

/// A single rule action on the wire
///
/// `Serialize` is needed for the length check on `CreateRuleRequest::actions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDto {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Create auto-moderation rule request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    #[validate(length(min = 1, max = 100, message = "Rule name must be 1-100 characters"))]
    pub name: String,

    /// Event the rule listens on; only "message_send" exists today
    #[serde(default = "default_event_type")]
    pub event_type: String,

    pub trigger_type: String,

    #[serde(default)]
    pub trigger_metadata: TriggerMetadataDto,

    #[validate(length(min = 1, message = "At least one action is required"))]
    pub actions: Vec<ActionDto>,

    /// Defaults to enabled
    pub enabled: Option<bool>,
}

fn default_event_type() -> String {
    "message_send".to_string()
}

/// Update auto-moderation rule request (partial merge)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleRequest {
    #[validate(length(min = 1, max = 100, message = "Rule name must be 1-100 characters"))]
    pub name: Option<String>,

    /// New trigger type; requires `triggerMetadata` alongside it
    pub trigger_type: Option<String>,

    /// New trigger payload; without `triggerType` it re-shapes the
    /// existing trigger kind
    pub trigger_metadata: Option<TriggerMetadataDto>,

    pub actions: Option<Vec<ActionDto>>,

    pub enabled: Option<bool>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Create message request (the moderated send path)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,

    /// Client-supplied idempotency token; retries carrying the same nonce
    /// produce at most one moderation log entry
    #[validate(length(max = 64, message = "Nonce must be at most 64 characters"))]
    pub nonce: Option<String>,
}

// ============================================================================
// Raid Config Requests
// ============================================================================

/// Update raid config request (partial merge over defaults)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRaidConfigRequest {
    pub enabled: Option<bool>,

    #[validate(range(min = 1, max = 1000, message = "joinThreshold must be 1-1000"))]
    pub join_threshold: Option<u32>,

    #[validate(range(min = 1, max = 3600, message = "joinWindowSeconds must be 1-3600"))]
    pub join_window_seconds: Option<u32>,

    /// "alert_only" or "lock_channels"
    pub action: Option<String>,
}

// ============================================================================
// Log Query Params
// ============================================================================

/// Query string for action log listings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQueryParams {
    pub limit: Option<i64>,
    /// Snowflake cursor; entries strictly before it
    pub before: Option<String>,
    pub rule_id: Option<String>,
    pub user_id: Option<String>,
}
