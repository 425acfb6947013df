//! Raid protection configuration entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Action taken when a join burst crosses the threshold
///
/// This core only notifies; `LockChannels` is advisory state read by the
/// platform's channel service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RaidAction {
    #[default]
    AlertOnly,
    LockChannels,
}

impl RaidAction {
    /// Stable string form, used in API payloads and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlertOnly => "alert_only",
            Self::LockChannels => "lock_channels",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "alert_only" => Ok(Self::AlertOnly),
            "lock_channels" => Ok(Self::LockChannels),
            other => Err(DomainError::ValidationError(format!(
                "unknown raid action: {other}"
            ))),
        }
    }
}

/// Per-guild raid protection settings
///
/// The raiding flag and the rolling join window are derived runtime state
/// owned by RaidGuard, deliberately not part of this entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidConfig {
    pub guild_id: Snowflake,
    pub enabled: bool,
    pub join_threshold: u32,
    pub join_window_seconds: u32,
    pub action: RaidAction,
    pub updated_at: DateTime<Utc>,
}

impl RaidConfig {
    /// Default join threshold for guilds with no stored config
    pub const DEFAULT_JOIN_THRESHOLD: u32 = 10;
    /// Default join window for guilds with no stored config
    pub const DEFAULT_JOIN_WINDOW_SECONDS: u32 = 60;

    /// Defaults for a guild with no stored configuration: disabled tracking
    pub fn defaults(guild_id: Snowflake) -> Self {
        Self {
            guild_id,
            enabled: false,
            join_threshold: Self::DEFAULT_JOIN_THRESHOLD,
            join_window_seconds: Self::DEFAULT_JOIN_WINDOW_SECONDS,
            action: RaidAction::AlertOnly,
            updated_at: Utc::now(),
        }
    }

    /// Validate the settable fields
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.join_threshold == 0 {
            return Err(DomainError::ValidationError(
                "join_threshold must be positive".to_string(),
            ));
        }
        if self.join_window_seconds == 0 {
            return Err(DomainError::ValidationError(
                "join_window_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
