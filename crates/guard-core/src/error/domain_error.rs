//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Auto-moderation rule not found: {0}")]
    RuleNotFound(Snowflake),

    #[error("Guild not found: {0}")]
    GuildNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Member not found in guild")]
    MemberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid trigger payload: {0}")]
    InvalidTrigger(String),

    #[error("Unknown keyword preset: {0}")]
    UnknownPreset(String),

    #[error("Rule limit reached: at most {max} rules per trigger kind")]
    RuleLimitReached { max: usize },

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not guild owner")]
    NotGuildOwner,

    #[error("Not a member of this guild")]
    NotGuildMember,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Notifier error: {0}")]
    NotifierError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::RuleNotFound(_) => "UNKNOWN_RULE",
            Self::GuildNotFound(_) => "UNKNOWN_GUILD",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MemberNotFound => "UNKNOWN_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTrigger(_) => "INVALID_TRIGGER_PAYLOAD",
            Self::UnknownPreset(_) => "UNKNOWN_PRESET",
            Self::RuleLimitReached { .. } => "MAX_RULES_PER_TRIGGER_TYPE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotGuildOwner => "NOT_GUILD_OWNER",
            Self::NotGuildMember => "NOT_GUILD_MEMBER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::NotifierError(_) => "NOTIFIER_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a not-found error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RuleNotFound(_)
                | Self::GuildNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MemberNotFound
        )
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidTrigger(_)
                | Self::UnknownPreset(_)
                | Self::RuleLimitReached { .. }
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotGuildOwner | Self::NotGuildMember)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(DomainError::RuleNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::RuleNotFound(Snowflake::new(1)).is_validation());
    }

    #[test]
    fn test_validation_classification() {
        assert!(DomainError::InvalidTrigger("bad".to_string()).is_validation());
        assert!(DomainError::RuleLimitReached { max: 6 }.is_validation());
        assert!(DomainError::UnknownPreset("x".to_string()).is_validation());
    }

    #[test]
    fn test_authorization_classification() {
        assert!(DomainError::NotGuildOwner.is_authorization());
        assert!(!DomainError::NotGuildOwner.is_validation());
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            DomainError::RuleLimitReached { max: 6 }.code(),
            "MAX_RULES_PER_TRIGGER_TYPE"
        );
        assert_eq!(
            DomainError::RuleNotFound(Snowflake::new(1)).code(),
            "UNKNOWN_RULE"
        );
    }
}
