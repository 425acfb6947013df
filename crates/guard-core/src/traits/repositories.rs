//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every operation is guild-scoped; no rule or
//! log is ever visible outside its owning guild.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ActionLog, AutoModRule, RaidConfig, TriggerKind};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Rule Repository
// ============================================================================

/// A stored rule as fetched for a guild listing
///
/// A row whose trigger or action payload no longer decodes travels as
/// `Corrupt` instead of failing the whole fetch, so one bad payload faults
/// that rule alone and the rest of the guild's rules still evaluate.
#[derive(Debug, Clone)]
pub enum RuleRecord {
    Decoded(AutoModRule),
    Corrupt { rule_id: Snowflake, detail: String },
}

impl RuleRecord {
    /// The stored row's rule ID
    #[must_use]
    pub fn rule_id(&self) -> Snowflake {
        match self {
            Self::Decoded(rule) => rule.id,
            Self::Corrupt { rule_id, .. } => *rule_id,
        }
    }
}

#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Find a rule by ID within a guild
    async fn find_by_id(&self, guild_id: Snowflake, rule_id: Snowflake)
        -> RepoResult<Option<AutoModRule>>;

    /// List a guild's rules in stable creation order
    ///
    /// With `enabled_only`, disabled rules are filtered out. Rows with
    /// undecodable payloads come back as [`RuleRecord::Corrupt`]. Mutations
    /// must be visible to the next call after they acknowledge (no stale
    /// reads within a guild).
    async fn find_by_guild(&self, guild_id: Snowflake, enabled_only: bool)
        -> RepoResult<Vec<RuleRecord>>;

    /// Count a guild's rules with the given trigger kind
    async fn count_by_trigger_kind(&self, guild_id: Snowflake, kind: TriggerKind)
        -> RepoResult<i64>;

    /// Persist a new rule
    async fn create(&self, rule: &AutoModRule) -> RepoResult<()>;

    /// Persist an updated rule; NotFound if it no longer exists in the guild
    async fn update(&self, rule: &AutoModRule) -> RepoResult<()>;

    /// Permanently delete a rule; NotFound if absent. Logs are not cascaded.
    async fn delete(&self, guild_id: Snowflake, rule_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Action Log Repository
// ============================================================================

/// Query options for action log listings
#[derive(Debug, Clone, Default)]
pub struct ActionLogQuery {
    /// Only entries with an ID below this cursor
    pub before: Option<Snowflake>,
    /// Only entries written by this rule
    pub rule_id: Option<Snowflake>,
    /// Only entries for this user
    pub user_id: Option<Snowflake>,
    /// Maximum entries to return
    pub limit: i64,
}

#[async_trait]
pub trait ActionLogRepository: Send + Sync {
    /// Append a log entry; the log is append-only
    async fn append(&self, log: &ActionLog) -> RepoResult<()>;

    /// List a guild's log entries, newest first
    async fn find_by_guild(&self, guild_id: Snowflake, query: ActionLogQuery)
        -> RepoResult<Vec<ActionLog>>;

    /// Count a guild's entries created at or after the given instant
    async fn count_since(&self, guild_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64>;
}

// ============================================================================
// Raid Config Repository
// ============================================================================

#[async_trait]
pub trait RaidConfigRepository: Send + Sync {
    /// Find a guild's raid config; None means no config has ever been stored
    async fn find(&self, guild_id: Snowflake) -> RepoResult<Option<RaidConfig>>;

    /// Insert or replace a guild's raid config
    async fn upsert(&self, config: &RaidConfig) -> RepoResult<()>;
}
