//! In-memory port implementations for service unit tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use guard_common::auth::JwtService;
use guard_common::config::ModerationConfig;
use guard_core::entities::{ActionLog, AutoModRule, RaidConfig, TriggerKind};
use guard_core::error::DomainError;
use guard_core::traits::{
    ActionLogQuery, ActionLogRepository, GuildDirectory, MessageSink, OutboundMessage,
    PersistedMessage, RaidAlert, RaidConfigRepository, RaidNotifier, RepoResult, RuleRecord,
    RuleRepository,
};
use guard_core::{Snowflake, SnowflakeGenerator};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
pub struct MemoryRuleRepository {
    pub rules: Mutex<Vec<AutoModRule>>,
    pub corrupt: Mutex<Vec<(Snowflake, String)>>,
}

impl MemoryRuleRepository {
    /// Register a stored row whose payload no longer decodes
    pub fn add_corrupt(&self, rule_id: Snowflake, detail: &str) {
        self.corrupt.lock().push((rule_id, detail.to_string()));
    }
}

#[async_trait]
impl RuleRepository for MemoryRuleRepository {
    async fn find_by_id(
        &self,
        guild_id: Snowflake,
        rule_id: Snowflake,
    ) -> RepoResult<Option<AutoModRule>> {
        Ok(self
            .rules
            .lock()
            .iter()
            .find(|r| r.guild_id == guild_id && r.id == rule_id)
            .cloned())
    }

    async fn find_by_guild(
        &self,
        guild_id: Snowflake,
        enabled_only: bool,
    ) -> RepoResult<Vec<RuleRecord>> {
        let mut records: Vec<RuleRecord> = self
            .rules
            .lock()
            .iter()
            .filter(|r| r.guild_id == guild_id && (!enabled_only || r.enabled))
            .cloned()
            .map(RuleRecord::Decoded)
            .collect();
        records.extend(self.corrupt.lock().iter().map(|(rule_id, detail)| {
            RuleRecord::Corrupt {
                rule_id: *rule_id,
                detail: detail.clone(),
            }
        }));
        records.sort_by_key(RuleRecord::rule_id);
        Ok(records)
    }

    async fn count_by_trigger_kind(
        &self,
        guild_id: Snowflake,
        kind: TriggerKind,
    ) -> RepoResult<i64> {
        Ok(self
            .rules
            .lock()
            .iter()
            .filter(|r| r.guild_id == guild_id && r.trigger_kind() == kind)
            .count() as i64)
    }

    async fn create(&self, rule: &AutoModRule) -> RepoResult<()> {
        self.rules.lock().push(rule.clone());
        Ok(())
    }

    async fn update(&self, rule: &AutoModRule) -> RepoResult<()> {
        let mut rules = self.rules.lock();
        match rules
            .iter_mut()
            .find(|r| r.guild_id == rule.guild_id && r.id == rule.id)
        {
            Some(existing) => {
                *existing = rule.clone();
                Ok(())
            }
            None => Err(DomainError::RuleNotFound(rule.id)),
        }
    }

    async fn delete(&self, guild_id: Snowflake, rule_id: Snowflake) -> RepoResult<()> {
        let mut rules = self.rules.lock();
        let before = rules.len();
        rules.retain(|r| !(r.guild_id == guild_id && r.id == rule_id));
        if rules.len() == before {
            return Err(DomainError::RuleNotFound(rule_id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryActionLogRepository {
    pub logs: Mutex<Vec<ActionLog>>,
    pub fail_append: AtomicBool,
}

impl MemoryActionLogRepository {
    /// Make the next append fail with a database error
    pub fn fail_next_append(&self) {
        self.fail_append.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ActionLogRepository for MemoryActionLogRepository {
    async fn append(&self, log: &ActionLog) -> RepoResult<()> {
        if self.fail_append.swap(false, Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("injected append failure".to_string()));
        }
        self.logs.lock().push(log.clone());
        Ok(())
    }

    async fn find_by_guild(
        &self,
        guild_id: Snowflake,
        query: ActionLogQuery,
    ) -> RepoResult<Vec<ActionLog>> {
        let mut logs: Vec<ActionLog> = self
            .logs
            .lock()
            .iter()
            .filter(|l| l.guild_id == guild_id)
            .filter(|l| query.before.is_none_or(|b| l.id < b))
            .filter(|l| query.rule_id.is_none_or(|r| l.rule_id == r))
            .filter(|l| query.user_id.is_none_or(|u| l.user_id == u))
            .cloned()
            .collect();
        logs.sort_by_key(|l| std::cmp::Reverse(l.id));
        logs.truncate(query.limit.clamp(1, 100) as usize);
        Ok(logs)
    }

    async fn count_since(&self, guild_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64> {
        Ok(self
            .logs
            .lock()
            .iter()
            .filter(|l| l.guild_id == guild_id && l.created_at >= since)
            .count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryRaidConfigRepository {
    pub configs: Mutex<HashMap<Snowflake, RaidConfig>>,
}

#[async_trait]
impl RaidConfigRepository for MemoryRaidConfigRepository {
    async fn find(&self, guild_id: Snowflake) -> RepoResult<Option<RaidConfig>> {
        Ok(self.configs.lock().get(&guild_id).cloned())
    }

    async fn upsert(&self, config: &RaidConfig) -> RepoResult<()> {
        self.configs.lock().insert(config.guild_id, config.clone());
        Ok(())
    }
}

/// Static guild/channel topology for tests
#[derive(Default)]
pub struct StaticGuildDirectory {
    pub channels: Mutex<HashMap<Snowflake, Option<Snowflake>>>,
    pub owners: Mutex<HashMap<Snowflake, Snowflake>>,
    pub members: Mutex<HashSet<(Snowflake, Snowflake)>>,
}

impl StaticGuildDirectory {
    pub fn with_guild(
        guild_id: Snowflake,
        owner_id: Snowflake,
        channel_id: Snowflake,
    ) -> Self {
        let dir = Self::default();
        dir.channels.lock().insert(channel_id, Some(guild_id));
        dir.owners.lock().insert(guild_id, owner_id);
        dir.members.lock().insert((guild_id, owner_id));
        dir
    }

    pub fn add_member(&self, guild_id: Snowflake, user_id: Snowflake) {
        self.members.lock().insert((guild_id, user_id));
    }

    pub fn add_dm_channel(&self, channel_id: Snowflake) {
        self.channels.lock().insert(channel_id, None);
    }
}

#[async_trait]
impl GuildDirectory for StaticGuildDirectory {
    async fn channel_guild(
        &self,
        channel_id: Snowflake,
    ) -> Result<Option<Snowflake>, DomainError> {
        self.channels
            .lock()
            .get(&channel_id)
            .copied()
            .ok_or(DomainError::ChannelNotFound(channel_id))
    }

    async fn is_owner(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<bool, DomainError> {
        match self.owners.lock().get(&guild_id) {
            Some(owner) => Ok(*owner == user_id),
            None => Err(DomainError::GuildNotFound(guild_id)),
        }
    }

    async fn is_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<bool, DomainError> {
        Ok(self.members.lock().contains(&(guild_id, user_id)))
    }
}

#[derive(Default)]
pub struct MemoryMessageSink {
    pub messages: Mutex<Vec<PersistedMessage>>,
}

#[async_trait]
impl MessageSink for MemoryMessageSink {
    async fn persist(&self, message: OutboundMessage) -> Result<PersistedMessage, DomainError> {
        let persisted = PersistedMessage {
            id: message.id,
            channel_id: message.channel_id,
            author_id: message.author_id,
            content: message.content,
            created_at: Utc::now(),
        };
        self.messages.lock().push(persisted.clone());
        Ok(persisted)
    }
}

#[derive(Default)]
pub struct RecordingRaidNotifier {
    pub alerts: Mutex<Vec<RaidAlert>>,
    pub resolutions: Mutex<Vec<Snowflake>>,
}

#[async_trait]
impl RaidNotifier for RecordingRaidNotifier {
    async fn raid_detected(&self, alert: RaidAlert) -> Result<(), DomainError> {
        self.alerts.lock().push(alert);
        Ok(())
    }

    async fn raid_resolved(&self, guild_id: Snowflake) -> Result<(), DomainError> {
        self.resolutions.lock().push(guild_id);
        Ok(())
    }
}

/// Bundle of fakes wired into a context, exposed for assertions
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub rules: Arc<MemoryRuleRepository>,
    pub logs: Arc<MemoryActionLogRepository>,
    pub raid_configs: Arc<MemoryRaidConfigRepository>,
    pub directory: Arc<StaticGuildDirectory>,
    pub sink: Arc<MemoryMessageSink>,
    pub notifier: Arc<RecordingRaidNotifier>,
}

pub fn harness_with_directory(directory: StaticGuildDirectory) -> TestHarness {
    let rules = Arc::new(MemoryRuleRepository::default());
    let logs = Arc::new(MemoryActionLogRepository::default());
    let raid_configs = Arc::new(MemoryRaidConfigRepository::default());
    let directory = Arc::new(directory);
    let sink = Arc::new(MemoryMessageSink::default());
    let notifier = Arc::new(RecordingRaidNotifier::default());

    let ctx = ServiceContextBuilder::new()
        .rule_repo(rules.clone())
        .log_repo(logs.clone())
        .raid_config_repo(raid_configs.clone())
        .guild_directory(directory.clone())
        .message_sink(sink.clone())
        .raid_notifier(notifier.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .moderation_config(ModerationConfig::default())
        .build()
        .unwrap();

    TestHarness {
        ctx,
        rules,
        logs,
        raid_configs,
        directory,
        sink,
        notifier,
    }
}

/// Harness with one guild, its owner, and a text channel
pub fn default_harness() -> TestHarness {
    harness_with_directory(StaticGuildDirectory::with_guild(
        GUILD,
        OWNER,
        CHANNEL,
    ))
}

pub const GUILD: Snowflake = Snowflake::new(100);
pub const OWNER: Snowflake = Snowflake::new(200);
pub const MEMBER: Snowflake = Snowflake::new(201);
pub const CHANNEL: Snowflake = Snowflake::new(300);
