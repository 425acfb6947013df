//! # guard-common
//!
//! Shared utilities for the moderation subsystem: configuration, error types,
//! token validation, and telemetry setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    ModerationConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
