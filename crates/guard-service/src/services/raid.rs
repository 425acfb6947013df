//! Raid guard
//!
//! Join-burst detection with a per-guild sliding window. Each guild moves
//! through Disabled → Armed → Raiding → (manual resolve) → Armed. The window
//! and the raiding flag are in-process state owned by `RaidTracker`; only the
//! configuration is persisted.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use guard_core::entities::{RaidAction, RaidConfig};
use guard_core::error::DomainError;
use guard_core::traits::RaidAlert;
use guard_core::Snowflake;
use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use crate::dto::{RaidConfigResponse, RaidResolveResponse, UpdateRaidConfigRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Per-guild join window
#[derive(Debug, Default)]
struct JoinWindow {
    joins: VecDeque<DateTime<Utc>>,
    raiding: bool,
}

/// In-process per-guild raid state
///
/// Guild windows are independent; each append-evict-check runs under that
/// guild's lock only.
#[derive(Default)]
pub struct RaidTracker {
    windows: DashMap<Snowflake, Mutex<JoinWindow>>,
}

impl RaidTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a join; Some(count) when this join transitions the guild into
    /// the raiding state
    ///
    /// The threshold check runs after evicting joins older than the window,
    /// so stale joins never count. While already raiding, joins keep feeding
    /// the window but fire nothing.
    pub fn record_join(
        &self,
        guild_id: Snowflake,
        now: DateTime<Utc>,
        threshold: u32,
        window_seconds: u32,
    ) -> Option<usize> {
        let entry = self.windows.entry(guild_id).or_default();
        let mut window = entry.lock();

        window.joins.push_back(now);
        let cutoff = now - Duration::seconds(i64::from(window_seconds));
        while window.joins.front().is_some_and(|t| *t <= cutoff) {
            window.joins.pop_front();
        }

        if !window.raiding && window.joins.len() >= threshold as usize {
            window.raiding = true;
            return Some(window.joins.len());
        }
        None
    }

    /// Whether the guild is currently in the raiding state
    pub fn is_raiding(&self, guild_id: Snowflake) -> bool {
        self.windows
            .get(&guild_id)
            .is_some_and(|w| w.lock().raiding)
    }

    /// Clear the window and raiding flag (on disable)
    pub fn clear(&self, guild_id: Snowflake) {
        self.windows.remove(&guild_id);
    }

    /// Leave the raiding state; true if the guild was raiding
    ///
    /// The window is cleared so lingering joins do not immediately re-trigger.
    pub fn resolve(&self, guild_id: Snowflake) -> bool {
        match self.windows.get(&guild_id) {
            Some(entry) => {
                let mut window = entry.lock();
                let was_raiding = window.raiding;
                window.raiding = false;
                window.joins.clear();
                was_raiding
            }
            None => false,
        }
    }
}

/// Raid guard service
pub struct RaidGuard<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RaidGuard<'a> {
    /// Create a new RaidGuard
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn require_owner(&self, guild_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.guild_directory().is_owner(guild_id, user_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotGuildOwner.into())
        }
    }

    async fn load_config(&self, guild_id: Snowflake) -> ServiceResult<RaidConfig> {
        Ok(self
            .ctx
            .raid_config_repo()
            .find(guild_id)
            .await?
            .unwrap_or_else(|| RaidConfig::defaults(guild_id)))
    }

    /// Get a guild's raid config; defaults when never configured
    #[instrument(skip(self))]
    pub async fn get_config(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<RaidConfigResponse> {
        self.require_owner(guild_id, user_id).await?;
        let config = self.load_config(guild_id).await?;
        Ok(RaidConfigResponse::from(&config))
    }

    /// Merge the request over the stored (or default) config and upsert
    ///
    /// Disabling clears the guild's window and raiding flag.
    #[instrument(skip(self, request))]
    pub async fn update_config(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        request: UpdateRaidConfigRequest,
    ) -> ServiceResult<RaidConfigResponse> {
        self.require_owner(guild_id, user_id).await?;

        let mut config = self.load_config(guild_id).await?;
        if let Some(enabled) = request.enabled {
            config.enabled = enabled;
        }
        if let Some(threshold) = request.join_threshold {
            config.join_threshold = threshold;
        }
        if let Some(window) = request.join_window_seconds {
            config.join_window_seconds = window;
        }
        if let Some(action) = &request.action {
            config.action = RaidAction::parse(action)?;
        }
        config.updated_at = Utc::now();
        config.validate()?;

        self.ctx.raid_config_repo().upsert(&config).await?;

        if !config.enabled {
            self.ctx.raid_tracker().clear(guild_id);
        }

        info!(guild_id = %guild_id, enabled = config.enabled, "Raid config updated");

        Ok(RaidConfigResponse::from(&config))
    }

    /// Feed a member join into the guild's window
    ///
    /// Fires the configured action through the notifier exactly once per raid
    /// episode. Notifier failure is logged, never propagated; alert delivery
    /// must not fail the join itself.
    #[instrument(skip(self))]
    pub async fn record_join(&self, guild_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let config = self.load_config(guild_id).await?;
        if !config.enabled {
            return Ok(());
        }

        let transition = self.ctx.raid_tracker().record_join(
            guild_id,
            Utc::now(),
            config.join_threshold,
            config.join_window_seconds,
        );

        if let Some(join_count) = transition {
            info!(
                guild_id = %guild_id,
                join_count,
                window_seconds = config.join_window_seconds,
                "Raid detected"
            );
            let alert = RaidAlert {
                guild_id,
                join_count,
                window_seconds: config.join_window_seconds,
                action: config.action,
            };
            if let Err(e) = self.ctx.raid_notifier().raid_detected(alert).await {
                warn!(guild_id = %guild_id, error = %e, "Raid alert delivery failed");
            }
        }

        Ok(())
    }

    /// Manually resolve a raid; a no-op success while not raiding
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<RaidResolveResponse> {
        self.require_owner(guild_id, user_id).await?;

        if self.ctx.raid_tracker().resolve(guild_id) {
            info!(guild_id = %guild_id, "Raid manually resolved");
            if let Err(e) = self.ctx.raid_notifier().raid_resolved(guild_id).await {
                warn!(guild_id = %guild_id, error = %e, "Raid resolution notice failed");
            }
        }

        Ok(RaidResolveResponse { resolved: true })
    }
}
