//! # guard-core
//!
//! Domain layer of the guild moderation subsystem: entities, value objects,
//! trigger matchers, and the ports the infrastructure layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod matchers;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActionLog, AutoModAction, AutoModRule, EventKind, RaidAction, RaidConfig, Trigger,
    TriggerKind,
};
pub use error::DomainError;
pub use matchers::{MatchOutcome, MatcherFault};
pub use traits::{
    ActionLogQuery, ActionLogRepository, GuildDirectory, MessageSink, OutboundMessage,
    PersistedMessage, RaidAlert, RaidConfigRepository, RaidNotifier, RepoResult, RuleRecord,
    RuleRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
