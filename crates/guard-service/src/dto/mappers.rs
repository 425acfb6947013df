//! Entity to DTO mappers and wire-to-domain trigger conversion

use guard_core::entities::{ActionLog, AutoModAction, AutoModRule, RaidConfig, Trigger};
use guard_core::traits::PersistedMessage;

use super::requests::{ActionDto, TriggerMetadataDto};
use super::responses::{
    ActionLogResponse, ActionResponse, MessageResponse, RaidConfigResponse, RuleResponse,
    TriggerMetadataResponse,
};
use crate::services::error::{ServiceError, ServiceResult};

// ============================================================================
// Wire → Domain
// ============================================================================

/// Convert the wire's (triggerType, triggerMetadata) pair into a domain
/// trigger, rejecting unknown types and metadata that does not fit the type
pub fn trigger_from_wire(
    trigger_type: &str,
    metadata: &TriggerMetadataDto,
) -> ServiceResult<Trigger> {
    let trigger = match trigger_type {
        "keyword" => Trigger::Keyword {
            keywords: metadata.keyword_filter.clone().ok_or_else(|| {
                ServiceError::validation("keyword trigger requires triggerMetadata.keywordFilter")
            })?,
        },
        "keyword_preset" => Trigger::KeywordPreset {
            presets: metadata.presets.clone().ok_or_else(|| {
                ServiceError::validation("keyword_preset trigger requires triggerMetadata.presets")
            })?,
        },
        "mention_spam" => Trigger::MentionSpam {
            mention_limit: metadata.mention_total_limit.ok_or_else(|| {
                ServiceError::validation(
                    "mention_spam trigger requires triggerMetadata.mentionTotalLimit",
                )
            })?,
        },
        other => {
            return Err(ServiceError::validation(format!(
                "unknown trigger type: {other}"
            )))
        }
    };
    trigger.validate()?;
    Ok(trigger)
}

/// Convert wire action objects into domain actions
pub fn actions_from_wire(actions: &[ActionDto]) -> ServiceResult<Vec<AutoModAction>> {
    actions
        .iter()
        .map(|a| match a.kind.as_str() {
            "block_message" => Ok(AutoModAction::BlockMessage),
            other => Err(ServiceError::validation(format!(
                "unknown action type: {other}"
            ))),
        })
        .collect()
}

// ============================================================================
// Domain → Wire
// ============================================================================

impl From<&Trigger> for TriggerMetadataResponse {
    fn from(trigger: &Trigger) -> Self {
        match trigger {
            Trigger::Keyword { keywords } => Self {
                keyword_filter: Some(keywords.clone()),
                presets: None,
                mention_total_limit: None,
            },
            Trigger::KeywordPreset { presets } => Self {
                keyword_filter: None,
                presets: Some(presets.clone()),
                mention_total_limit: None,
            },
            Trigger::MentionSpam { mention_limit } => Self {
                keyword_filter: None,
                presets: None,
                mention_total_limit: Some(*mention_limit),
            },
        }
    }
}

impl From<&AutoModAction> for ActionResponse {
    fn from(action: &AutoModAction) -> Self {
        let kind = match action {
            AutoModAction::BlockMessage => "block_message",
        };
        Self {
            kind: kind.to_string(),
        }
    }
}

impl From<&AutoModRule> for RuleResponse {
    fn from(rule: &AutoModRule) -> Self {
        Self {
            id: rule.id.to_string(),
            guild_id: rule.guild_id.to_string(),
            name: rule.name.clone(),
            creator_id: rule.creator_id.to_string(),
            event_type: "message_send".to_string(),
            trigger_type: rule.trigger_kind().as_str().to_string(),
            trigger_metadata: TriggerMetadataResponse::from(&rule.trigger),
            actions: rule.actions.iter().map(ActionResponse::from).collect(),
            enabled: rule.enabled,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}

impl From<AutoModRule> for RuleResponse {
    fn from(rule: AutoModRule) -> Self {
        Self::from(&rule)
    }
}

impl From<&ActionLog> for ActionLogResponse {
    fn from(log: &ActionLog) -> Self {
        Self {
            id: log.id.to_string(),
            rule_id: log.rule_id.to_string(),
            guild_id: log.guild_id.to_string(),
            channel_id: log.channel_id.to_string(),
            user_id: log.user_id.to_string(),
            matched_keyword: log.matched_keyword.clone(),
            content: log.content.clone(),
            created_at: log.created_at,
        }
    }
}

impl From<ActionLog> for ActionLogResponse {
    fn from(log: ActionLog) -> Self {
        Self::from(&log)
    }
}

impl From<&RaidConfig> for RaidConfigResponse {
    fn from(config: &RaidConfig) -> Self {
        Self {
            guild_id: config.guild_id.to_string(),
            enabled: config.enabled,
            join_threshold: config.join_threshold,
            join_window_seconds: config.join_window_seconds,
            action: config.action.as_str().to_string(),
            updated_at: config.updated_at,
        }
    }
}

impl From<PersistedMessage> for MessageResponse {
    fn from(message: PersistedMessage) -> Self {
        Self {
            id: message.id.to_string(),
            channel_id: message.channel_id.to_string(),
            author_id: message.author_id.to_string(),
            content: message.content,
            created_at: message.created_at,
        }
    }
}
