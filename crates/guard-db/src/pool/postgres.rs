//! PostgreSQL connection pool setup
//!
//! Every moderation query is a short single-statement round trip, so the
//! pool stays small and recycles connections aggressively rather than
//! holding a large warm set.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Pool sizing for the moderation database
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// PostgreSQL connection URL
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Connections kept warm between bursts
    pub min_connections: u32,
}

impl PoolSettings {
    /// Settings with the sizing the evaluation path is tuned for
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }

    #[must_use]
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    #[must_use]
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }
}

/// Open a connection pool against the moderation database
///
/// Connections identify themselves as `guard-server` so blocked or slow
/// moderation queries are attributable in `pg_stat_activity`.
pub async fn create_pool(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&settings.url)?.application_name("guard-server");

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect_with(options)
        .await
}
