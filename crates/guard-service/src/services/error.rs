//! Service layer error types
//!
//! Provides a unified error type for all service operations. The blocked-send
//! outcome is a first-class variant rather than a generic error: handlers
//! surface it as 403 with the fixed `AUTO_MODERATION_BLOCKED` code and the
//! blocking rule's identity.

use guard_common::AppError;
use guard_core::{DomainError, Snowflake};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, validation, etc.)
    App(AppError),

    /// A moderation rule blocked the message
    AutoModerationBlocked {
        rule_id: Snowflake,
        rule_name: String,
    },

    /// Every enabled rule faulted during evaluation
    EvaluationFailed,

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::AutoModerationBlocked { rule_name, .. } => {
                write!(f, "Message blocked by auto-moderation rule: {rule_name}")
            }
            Self::EvaluationFailed => write!(f, "Auto-moderation evaluation failed"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::AutoModerationBlocked { .. } => 403,
            Self::EvaluationFailed => 500,
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::AutoModerationBlocked { .. } => "AUTO_MODERATION_BLOCKED",
            Self::EvaluationFailed => "EVALUATION_FAILED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Rule", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Rule not found: 123"));
    }

    #[test]
    fn test_blocked_error() {
        let err = ServiceError::AutoModerationBlocked {
            rule_id: Snowflake::new(42),
            rule_name: "No Cursing".to_string(),
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "AUTO_MODERATION_BLOCKED");
    }

    #[test]
    fn test_evaluation_failed() {
        let err = ServiceError::EvaluationFailed;
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "EVALUATION_FAILED");
    }

    #[test]
    fn test_domain_error_mapping() {
        let err = ServiceError::from(DomainError::RuleLimitReached { max: 6 });
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "MAX_RULES_PER_TRIGGER_TYPE");

        let err = ServiceError::from(DomainError::NotGuildOwner);
        assert_eq!(err.status_code(), 403);
    }
}
