//! Entity to model mappers
//!
//! This module provides conversions between domain entities (guard-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//!   (fallible because trigger/action payloads decode from JSONB)
//! - `*Insert` structs: Prepare entity data for database operations

mod action_log;
mod raid_config;
mod rule;

pub use action_log::ActionLogInsert;
pub use raid_config::RaidConfigUpsert;
pub use rule::RuleInsert;
