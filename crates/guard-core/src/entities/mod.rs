//! Domain entities - core moderation objects

mod action_log;
mod raid;
mod rule;

pub use action_log::ActionLog;
pub use raid::{RaidAction, RaidConfig};
pub use rule::{AutoModAction, AutoModRule, EventKind, Trigger, TriggerKind};
