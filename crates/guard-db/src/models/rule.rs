//! Auto-moderation rule database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the auto_mod_rules table
///
/// Trigger and action payloads are stored as JSONB columns; `trigger_kind`
/// is denormalized from the trigger payload so the per-kind rule cap can be
/// counted without decoding JSON.
#[derive(Debug, Clone, FromRow)]
pub struct AutoModRuleModel {
    pub id: i64,
    pub guild_id: i64,
    pub name: String,
    pub creator_id: i64,
    pub event_kind: String,
    pub trigger_kind: String,
    pub trigger: serde_json::Value,
    pub actions: serde_json::Value,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
