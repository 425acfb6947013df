//! AutoModRule entity <-> model mapper

use guard_core::entities::{AutoModAction, AutoModRule, EventKind, Trigger};
use guard_core::error::DomainError;
use guard_core::value_objects::Snowflake;

use crate::models::AutoModRuleModel;

/// Convert AutoModRuleModel to AutoModRule entity
///
/// Fallible: the trigger and action columns hold JSONB written by this
/// crate, but a row corrupted out-of-band must surface as an error rather
/// than a panic.
impl TryFrom<AutoModRuleModel> for AutoModRule {
    type Error = DomainError;

    fn try_from(model: AutoModRuleModel) -> Result<Self, Self::Error> {
        let trigger: Trigger = serde_json::from_value(model.trigger)
            .map_err(|e| DomainError::DatabaseError(format!("invalid trigger payload: {e}")))?;
        let actions: Vec<AutoModAction> = serde_json::from_value(model.actions)
            .map_err(|e| DomainError::DatabaseError(format!("invalid action payload: {e}")))?;
        let event_kind: EventKind = serde_json::from_value(serde_json::Value::String(
            model.event_kind.clone(),
        ))
        .map_err(|_| DomainError::DatabaseError(format!("invalid event kind: {}", model.event_kind)))?;

        Ok(AutoModRule {
            id: Snowflake::new(model.id),
            guild_id: Snowflake::new(model.guild_id),
            name: model.name,
            creator_id: Snowflake::new(model.creator_id),
            event_kind,
            trigger,
            actions,
            enabled: model.enabled,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert AutoModRule entity reference to values for database insertion
pub struct RuleInsert<'a> {
    pub id: i64,
    pub guild_id: i64,
    pub name: &'a str,
    pub creator_id: i64,
    pub event_kind: String,
    pub trigger_kind: &'static str,
    pub trigger: serde_json::Value,
    pub actions: serde_json::Value,
    pub enabled: bool,
}

impl<'a> RuleInsert<'a> {
    pub fn new(rule: &'a AutoModRule) -> Result<Self, DomainError> {
        let trigger = serde_json::to_value(&rule.trigger)
            .map_err(|e| DomainError::InternalError(format!("trigger encoding failed: {e}")))?;
        let actions = serde_json::to_value(&rule.actions)
            .map_err(|e| DomainError::InternalError(format!("action encoding failed: {e}")))?;
        let event_kind = match rule.event_kind {
            EventKind::MessageSend => "message_send".to_string(),
        };

        Ok(Self {
            id: rule.id.into_inner(),
            guild_id: rule.guild_id.into_inner(),
            name: &rule.name,
            creator_id: rule.creator_id.into_inner(),
            event_kind,
            trigger_kind: rule.trigger_kind().as_str(),
            trigger,
            actions,
            enabled: rule.enabled,
        })
    }
}
