//! PostgreSQL connection management

use std::time::Duration;

use nexus_common::{RetryConfig, is_retryable_error, with_conditional_retry};
use nexus_errors::{AppError, AppResult};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Pool settings
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self.min_connections = self.min_connections.min(max);
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: u32,
    pub active: u32,
}

impl PoolStatus {
    pub fn of(pool: &PgPool) -> Self {
        let size = pool.size();
        let idle = pool.num_idle() as u32;
        Self {
            size,
            idle,
            active: size.saturating_sub(idle),
        }
    }

    /// Percentage of connections in use
    pub fn utilization(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        f64::from(self.active) / f64::from(self.size) * 100.0
    }
}

pub async fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))
}

/// [`create_pool`] with backoff on transient connection errors
pub async fn create_pool_with_retry(
    config: &PostgresConfig,
    retry: &RetryConfig,
) -> AppResult<PgPool> {
    let pool = with_conditional_retry(
        retry,
        "PostgreSQL connection",
        || create_pool(config),
        |e| is_retryable_error(&e.to_string()),
    )
    .await?;

    info!(
        max_connections = config.max_connections,
        "PostgreSQL connection pool created"
    );
    Ok(pool)
}

pub async fn check_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}
