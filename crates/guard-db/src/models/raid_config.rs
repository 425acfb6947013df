//! Raid configuration database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the raid_configs table
///
/// One row per guild; a missing row means the guild has never configured
/// raid protection and gets the domain defaults.
#[derive(Debug, Clone, FromRow)]
pub struct RaidConfigModel {
    pub guild_id: i64,
    pub enabled: bool,
    pub join_threshold: i32,
    pub join_window_seconds: i32,
    pub action: String,
    pub updated_at: DateTime<Utc>,
}
