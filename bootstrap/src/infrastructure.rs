//! Backing resources shared by a service

use nexus_adapter_postgres::{PoolStatus, PostgresConfig, create_pool_with_retry};
use nexus_common::RetryConfig;
use nexus_config::AppConfig;
use nexus_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// Resources created once at startup and handed to the service builder.
///
/// Cloning is cheap: the pool is reference counted.
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: Option<PgPool>,
}

impl Infrastructure {
    /// Connect to everything the configuration names
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let postgres_pool = match &config.database {
            Some(database) => {
                let pg_config = PostgresConfig::new(database.url.expose_secret())
                    .with_max_connections(database.max_connections);
                Some(create_pool_with_retry(&pg_config, &RetryConfig::default()).await?)
            }
            None => {
                info!("No database configured, services will use in-memory storage");
                None
            }
        };

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    /// Infrastructure with no external connections
    pub fn without_database(config: AppConfig) -> Self {
        Self {
            config,
            postgres_pool: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> Option<PgPool> {
        self.postgres_pool.clone()
    }

    pub fn postgres_pool_status(&self) -> Option<PoolStatus> {
        self.postgres_pool.as_ref().map(PoolStatus::of)
    }
}
