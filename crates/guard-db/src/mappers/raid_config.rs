//! RaidConfig entity <-> model mapper

use guard_core::entities::{RaidAction, RaidConfig};
use guard_core::error::DomainError;
use guard_core::value_objects::Snowflake;

use crate::models::RaidConfigModel;

/// Convert RaidConfigModel to RaidConfig entity
impl TryFrom<RaidConfigModel> for RaidConfig {
    type Error = DomainError;

    fn try_from(model: RaidConfigModel) -> Result<Self, Self::Error> {
        let action = RaidAction::parse(&model.action)
            .map_err(|_| DomainError::DatabaseError(format!("invalid raid action: {}", model.action)))?;

        Ok(RaidConfig {
            guild_id: Snowflake::new(model.guild_id),
            enabled: model.enabled,
            join_threshold: model.join_threshold.max(0) as u32,
            join_window_seconds: model.join_window_seconds.max(0) as u32,
            action,
            updated_at: model.updated_at,
        })
    }
}

/// Convert RaidConfig entity reference to values for database upsert
pub struct RaidConfigUpsert {
    pub guild_id: i64,
    pub enabled: bool,
    pub join_threshold: i32,
    pub join_window_seconds: i32,
    pub action: &'static str,
}

impl RaidConfigUpsert {
    pub fn new(config: &RaidConfig) -> Self {
        Self {
            guild_id: config.guild_id.into_inner(),
            enabled: config.enabled,
            join_threshold: config.join_threshold as i32,
            join_window_seconds: config.join_window_seconds as i32,
            action: config.action.as_str(),
        }
    }
}
