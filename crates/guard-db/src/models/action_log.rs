//! Action log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the auto_mod_action_logs table
#[derive(Debug, Clone, FromRow)]
pub struct ActionLogModel {
    pub id: i64,
    pub rule_id: i64,
    pub guild_id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub matched_keyword: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
