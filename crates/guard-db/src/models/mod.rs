//! Database models - SQLx-compatible structs for PostgreSQL tables

mod action_log;
mod raid_config;
mod rule;

pub use action_log::ActionLogModel;
pub use raid_config::RaidConfigModel;
pub use rule::AutoModRuleModel;
