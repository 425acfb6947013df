//! Ports - interfaces the infrastructure layer implements

mod collaborators;
mod repositories;

pub use collaborators::{
    GuildDirectory, MessageSink, OutboundMessage, PersistedMessage, RaidAlert, RaidNotifier,
};
pub use repositories::{
    ActionLogQuery, ActionLogRepository, RaidConfigRepository, RepoResult, RuleRecord,
    RuleRepository,
};
