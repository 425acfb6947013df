//! Error handling utilities for repositories

use guard_core::error::DomainError;
use guard_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "rule not found" error
pub fn rule_not_found(id: Snowflake) -> DomainError {
    DomainError::RuleNotFound(id)
}
