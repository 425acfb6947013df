//! Repository implementations
//!
//! PostgreSQL implementations of the repository and collaborator traits
//! defined in guard-core. Each repository handles database operations for a
//! specific domain concern.

mod action_log;
mod error;
mod guild_directory;
mod message_sink;
mod raid_config;
mod rule;

pub use action_log::PgActionLogRepository;
pub use guild_directory::PgGuildDirectory;
pub use message_sink::PgMessageSink;
pub use raid_config::PgRaidConfigRepository;
pub use rule::PgRuleRepository;
