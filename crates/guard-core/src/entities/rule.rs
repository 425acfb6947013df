//! Auto-moderation rule entity
//!
//! A rule pairs a trigger condition with an ordered list of actions, scoped
//! to a single guild. Trigger payloads are a closed tagged enum so a payload
//! that does not match its trigger kind is unrepresentable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::matchers::preset::known_preset;
use crate::value_objects::Snowflake;

/// Event a rule is evaluated against. Only message sends today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    MessageSend,
}

/// Category of condition a rule checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Keyword,
    KeywordPreset,
    MentionSpam,
}

impl TriggerKind {
    /// Stable string form, used in API payloads and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::KeywordPreset => "keyword_preset",
            Self::MentionSpam => "mention_spam",
        }
    }
}

/// Trigger condition with its kind-specific payload
///
/// The discriminant doubles as the trigger kind; constructing a payload of
/// the wrong shape for a kind is impossible by design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Case-insensitive containment of any configured keyword
    Keyword { keywords: Vec<String> },
    /// Containment against platform-maintained preset word lists
    KeywordPreset { presets: Vec<String> },
    /// More than `mention_limit` user mentions in one message
    MentionSpam { mention_limit: u32 },
}

impl Trigger {
    /// The kind this payload belongs to
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::Keyword { .. } => TriggerKind::Keyword,
            Self::KeywordPreset { .. } => TriggerKind::KeywordPreset,
            Self::MentionSpam { .. } => TriggerKind::MentionSpam,
        }
    }

    /// Validate payload contents at construction/update time
    ///
    /// Shape mismatches are unrepresentable; this checks the values inside
    /// the shape: non-empty keyword lists, known preset names, positive
    /// mention limits.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Keyword { keywords } => {
                if keywords.is_empty() {
                    return Err(DomainError::InvalidTrigger(
                        "keyword trigger requires at least one keyword".to_string(),
                    ));
                }
                if keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(DomainError::InvalidTrigger(
                        "keywords must not be empty or whitespace".to_string(),
                    ));
                }
            }
            Self::KeywordPreset { presets } => {
                if presets.is_empty() {
                    return Err(DomainError::InvalidTrigger(
                        "keyword_preset trigger requires at least one preset".to_string(),
                    ));
                }
                if let Some(unknown) = presets.iter().find(|p| known_preset(p).is_none()) {
                    return Err(DomainError::UnknownPreset(unknown.clone()));
                }
            }
            Self::MentionSpam { mention_limit } => {
                if *mention_limit == 0 {
                    return Err(DomainError::InvalidTrigger(
                        "mention_limit must be at least 1".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Action executed when a rule matches
///
/// Closed set, extensible by adding variants. Only blocking exists today;
/// the list stays ordered so future variants compose deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AutoModAction {
    BlockMessage,
}

impl AutoModAction {
    /// Whether this action blocks the message from being persisted
    #[inline]
    pub fn blocks(&self) -> bool {
        matches!(self, Self::BlockMessage)
    }
}

/// Auto-moderation rule entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoModRule {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    pub creator_id: Snowflake,
    pub event_kind: EventKind,
    pub trigger: Trigger,
    pub actions: Vec<AutoModAction>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AutoModRule {
    /// Create a new enabled rule
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        name: String,
        creator_id: Snowflake,
        trigger: Trigger,
        actions: Vec<AutoModAction>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            guild_id,
            name,
            creator_id,
            event_kind: EventKind::MessageSend,
            trigger,
            actions,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The kind of this rule's trigger
    #[inline]
    pub fn trigger_kind(&self) -> TriggerKind {
        self.trigger.kind()
    }

    /// Whether any configured action blocks the message
    pub fn blocks_message(&self) -> bool {
        self.actions.iter().any(AutoModAction::blocks)
    }

    /// Enable or disable the rule
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.updated_at = Utc::now();
    }

    /// Replace the trigger, re-validating the new payload
    pub fn set_trigger(&mut self, trigger: Trigger) -> Result<(), DomainError> {
        trigger.validate()?;
        self.trigger = trigger;
        self.updated_at = Utc::now();
        Ok(())
    }
}
