//! Raid alert delivery
//!
//! The default notifier surfaces raid alerts through the tracing pipeline.
//! Deployments that fan alerts out to staff channels plug in their own
//! `RaidNotifier` implementation instead.

use async_trait::async_trait;
use guard_core::{DomainError, RaidAlert, RaidNotifier, Snowflake};
use tracing::warn;

/// Notifier that records raid transitions as structured log events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRaidNotifier;

impl TracingRaidNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RaidNotifier for TracingRaidNotifier {
    async fn raid_detected(&self, alert: RaidAlert) -> Result<(), DomainError> {
        warn!(
            guild_id = %alert.guild_id,
            join_count = alert.join_count,
            window_seconds = alert.window_seconds,
            action = %alert.action.as_str(),
            "Raid detected"
        );
        Ok(())
    }

    async fn raid_resolved(&self, guild_id: Snowflake) -> Result<(), DomainError> {
        warn!(guild_id = %guild_id, "Raid resolved");
        Ok(())
    }
}
