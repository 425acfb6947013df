//! Collaborator ports - narrow interfaces to external platform services
//!
//! The moderation subsystem does not own identity, membership, or message
//! storage. It consumes them through these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::RaidAction;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Read access to the platform's guild/membership data
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Resolve the channel's owning guild; None for channels outside guilds
    async fn channel_guild(&self, channel_id: Snowflake)
        -> Result<Option<Snowflake>, DomainError>;

    /// Whether the user owns the guild (the privileged-read check)
    async fn is_owner(&self, guild_id: Snowflake, user_id: Snowflake)
        -> Result<bool, DomainError>;

    /// Whether the user is a member of the guild
    async fn is_member(&self, guild_id: Snowflake, user_id: Snowflake)
        -> Result<bool, DomainError>;
}

/// A message that passed moderation and is handed off for persistence
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
}

/// The persisted form returned by the message store
#[derive(Debug, Clone)]
pub struct PersistedMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The platform's message persistence service
///
/// Invoked only for messages the gate did not block.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn persist(&self, message: OutboundMessage) -> Result<PersistedMessage, DomainError>;
}

/// Alert emitted when a guild transitions into the raiding state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidAlert {
    pub guild_id: Snowflake,
    pub join_count: usize,
    pub window_seconds: u32,
    pub action: RaidAction,
}

/// The platform's notification sink for raid alerts
#[async_trait]
pub trait RaidNotifier: Send + Sync {
    /// Deliver a raid alert; fired once per raid episode
    async fn raid_detected(&self, alert: RaidAlert) -> Result<(), DomainError>;

    /// Announce manual resolution of a raid
    async fn raid_resolved(&self, guild_id: Snowflake) -> Result<(), DomainError>;
}
