//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use guard_common::{AppConfig, AppError, JwtService};
use guard_core::SnowflakeGenerator;
use guard_db::{
    create_pool, PgActionLogRepository, PgGuildDirectory, PgMessageSink, PgRaidConfigRepository,
    PgRuleRepository, PoolSettings,
};
use guard_service::{ServiceContextBuilder, TracingRaidNotifier};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged outside the rate-limited stack so probes
/// never get throttled.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let router = router.merge(health_routes());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let settings = PoolSettings::new(config.database.url.clone())
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections);
    let pool = create_pool(&settings)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories and platform adapters
    let rule_repo = Arc::new(PgRuleRepository::new(pool.clone()));
    let log_repo = Arc::new(PgActionLogRepository::new(pool.clone()));
    let raid_config_repo = Arc::new(PgRaidConfigRepository::new(pool.clone()));
    let guild_directory = Arc::new(PgGuildDirectory::new(pool.clone()));
    let message_sink = Arc::new(PgMessageSink::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .rule_repo(rule_repo)
        .log_repo(log_repo)
        .raid_config_repo(raid_config_repo)
        .guild_directory(guild_directory)
        .message_sink(message_sink)
        .raid_notifier(Arc::new(TracingRaidNotifier::new()))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .moderation_config(config.moderation.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server on the given address
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
