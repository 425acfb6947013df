//! Action executor
//!
//! Applies a matched rule's actions: one audit log entry per logical send
//! attempt, then the block signal. Client retries carrying the same nonce are
//! collapsed by an in-process TTL registry so a double send writes one log.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use guard_core::entities::ActionLog;
use guard_core::Snowflake;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::evaluator::BlockDecision;

/// In-process registry of recently seen send attempts
///
/// Keys expire after the configured TTL; expired entries are pruned lazily
/// on insert.
pub struct AttemptRegistry {
    entries: DashMap<String, Instant>,
    ttl: Duration,
}

impl AttemptRegistry {
    /// Create a registry with the given entry TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Record an attempt key; true if this is its first (non-expired) use
    pub fn first_attempt(&self, key: String) -> bool {
        let now = Instant::now();
        self.entries
            .retain(|_, seen| now.duration_since(*seen) < self.ttl);

        match self.entries.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(now);
                true
            }
        }
    }

    /// Drop a key so a later retry counts as a fresh attempt
    pub fn forget(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Action executor
pub struct ActionExecutor<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActionExecutor<'a> {
    /// Create a new ActionExecutor
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Execute the block decision's side effects
    ///
    /// Writes the audit log entry unless the attempt nonce was already seen.
    /// The caller surfaces the block signal itself; a blocked message never
    /// reaches the message sink.
    #[instrument(skip(self, decision, content), fields(rule_id = %decision.rule.id))]
    pub async fn execute_block(
        &self,
        decision: &BlockDecision,
        channel_id: Snowflake,
        user_id: Snowflake,
        content: &str,
        nonce: Option<&str>,
    ) -> ServiceResult<()> {
        let attempt_key = nonce.map(|nonce| {
            format!("{}:{}:{}", decision.rule.guild_id, user_id, nonce)
        });
        if let Some(key) = &attempt_key {
            if !self.ctx.attempt_registry().first_attempt(key.clone()) {
                info!(user_id = %user_id, "Duplicate send attempt; skipping log write");
                return Ok(());
            }
        }

        let log = ActionLog::new(
            self.ctx.generate_id(),
            decision.rule.id,
            decision.rule.guild_id,
            channel_id,
            user_id,
            decision.fragment.clone(),
            content,
        );
        // A failed append must not leave the nonce marked as seen, or the
        // client's retry would never get logged
        if let Err(e) = self.ctx.log_repo().append(&log).await {
            if let Some(key) = &attempt_key {
                self.ctx.attempt_registry().forget(key);
            }
            return Err(e.into());
        }

        info!(
            log_id = %log.id,
            guild_id = %decision.rule.guild_id,
            user_id = %user_id,
            "Message blocked by auto-moderation"
        );

        Ok(())
    }
}
