//! # guard-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository and
//! collaborator traits defined in `guard-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers (trigger and action payloads stored as JSONB)
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guard_db::pool::{create_pool, PoolSettings};
//! use guard_db::repositories::PgRuleRepository;
//! use guard_core::traits::RuleRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = PoolSettings::new(std::env::var("DATABASE_URL")?);
//!     let pool = create_pool(&settings).await?;
//!     let rule_repo = PgRuleRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, PgPool, PoolSettings};
pub use repositories::{
    PgActionLogRepository, PgGuildDirectory, PgMessageSink, PgRaidConfigRepository,
    PgRuleRepository,
};
