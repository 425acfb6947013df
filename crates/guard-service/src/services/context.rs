//! Service context - dependency container for services
//!
//! Holds the repository and collaborator ports, shared moderation state, and
//! other dependencies needed by services.

use std::sync::Arc;
use std::time::Duration;

use guard_common::auth::JwtService;
use guard_common::config::ModerationConfig;
use guard_core::traits::{
    ActionLogRepository, GuildDirectory, MessageSink, RaidConfigRepository, RaidNotifier,
    RuleRepository,
};
use guard_core::SnowflakeGenerator;

use super::executor::AttemptRegistry;
use super::raid::RaidTracker;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repository ports (rules, action logs, raid config)
/// - Collaborator ports (guild directory, message sink, raid notifier)
/// - JWT service for token validation
/// - Snowflake generator for ID generation
/// - In-process moderation state (attempt registry, raid windows)
#[derive(Clone)]
pub struct ServiceContext {
    rule_repo: Arc<dyn RuleRepository>,
    log_repo: Arc<dyn ActionLogRepository>,
    raid_config_repo: Arc<dyn RaidConfigRepository>,

    guild_directory: Arc<dyn GuildDirectory>,
    message_sink: Arc<dyn MessageSink>,
    raid_notifier: Arc<dyn RaidNotifier>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    attempt_registry: Arc<AttemptRegistry>,
    raid_tracker: Arc<RaidTracker>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rule_repo: Arc<dyn RuleRepository>,
        log_repo: Arc<dyn ActionLogRepository>,
        raid_config_repo: Arc<dyn RaidConfigRepository>,
        guild_directory: Arc<dyn GuildDirectory>,
        message_sink: Arc<dyn MessageSink>,
        raid_notifier: Arc<dyn RaidNotifier>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        moderation: ModerationConfig,
    ) -> Self {
        let attempt_registry = Arc::new(AttemptRegistry::new(Duration::from_secs(
            moderation.attempt_ttl_seconds,
        )));
        let raid_tracker = Arc::new(RaidTracker::new());

        Self {
            rule_repo,
            log_repo,
            raid_config_repo,
            guild_directory,
            message_sink,
            raid_notifier,
            jwt_service,
            snowflake_generator,
            attempt_registry,
            raid_tracker,
        }
    }

    // === Repositories ===

    /// Get the rule repository
    pub fn rule_repo(&self) -> &dyn RuleRepository {
        self.rule_repo.as_ref()
    }

    /// Get the action log repository
    pub fn log_repo(&self) -> &dyn ActionLogRepository {
        self.log_repo.as_ref()
    }

    /// Get the raid config repository
    pub fn raid_config_repo(&self) -> &dyn RaidConfigRepository {
        self.raid_config_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the guild directory
    pub fn guild_directory(&self) -> &dyn GuildDirectory {
        self.guild_directory.as_ref()
    }

    /// Get the message sink
    pub fn message_sink(&self) -> &dyn MessageSink {
        self.message_sink.as_ref()
    }

    /// Get the raid notifier
    pub fn raid_notifier(&self) -> &dyn RaidNotifier {
        self.raid_notifier.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> guard_core::Snowflake {
        self.snowflake_generator.generate()
    }

    // === Moderation State ===

    /// Get the duplicate-send attempt registry
    pub fn attempt_registry(&self) -> &AttemptRegistry {
        self.attempt_registry.as_ref()
    }

    /// Get the per-guild raid window tracker
    pub fn raid_tracker(&self) -> &RaidTracker {
        self.raid_tracker.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("collaborators", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    rule_repo: Option<Arc<dyn RuleRepository>>,
    log_repo: Option<Arc<dyn ActionLogRepository>>,
    raid_config_repo: Option<Arc<dyn RaidConfigRepository>>,
    guild_directory: Option<Arc<dyn GuildDirectory>>,
    message_sink: Option<Arc<dyn MessageSink>>,
    raid_notifier: Option<Arc<dyn RaidNotifier>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    moderation: Option<ModerationConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule_repo(mut self, repo: Arc<dyn RuleRepository>) -> Self {
        self.rule_repo = Some(repo);
        self
    }

    pub fn log_repo(mut self, repo: Arc<dyn ActionLogRepository>) -> Self {
        self.log_repo = Some(repo);
        self
    }

    pub fn raid_config_repo(mut self, repo: Arc<dyn RaidConfigRepository>) -> Self {
        self.raid_config_repo = Some(repo);
        self
    }

    pub fn guild_directory(mut self, directory: Arc<dyn GuildDirectory>) -> Self {
        self.guild_directory = Some(directory);
        self
    }

    pub fn message_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.message_sink = Some(sink);
        self
    }

    pub fn raid_notifier(mut self, notifier: Arc<dyn RaidNotifier>) -> Self {
        self.raid_notifier = Some(notifier);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn moderation_config(mut self, config: ModerationConfig) -> Self {
        self.moderation = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.rule_repo
                .ok_or_else(|| ServiceError::validation("rule_repo is required"))?,
            self.log_repo
                .ok_or_else(|| ServiceError::validation("log_repo is required"))?,
            self.raid_config_repo
                .ok_or_else(|| ServiceError::validation("raid_config_repo is required"))?,
            self.guild_directory
                .ok_or_else(|| ServiceError::validation("guild_directory is required"))?,
            self.message_sink
                .ok_or_else(|| ServiceError::validation("message_sink is required"))?,
            self.raid_notifier
                .ok_or_else(|| ServiceError::validation("raid_notifier is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.moderation.unwrap_or_default(),
        ))
    }
}
