//! nexus-config - configuration loading
//!
//! Layers, lowest priority first:
//! 1. `{dir}/default.toml`
//! 2. `{dir}/{APP_ENV}.toml`
//! 3. `APP_`-prefixed environment variables, `__` separating nested keys
//!    (`APP_SERVER__PORT=9000`, `APP_DATABASE__URL=postgres://...`)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// gRPC listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// HTTP port for `/health`, `/ready` and `/metrics`; defaults to `port + 1000`
    pub health_port: Option<u16>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    50051
}

impl ServerConfig {
    pub fn health_port(&self) -> u16 {
        self.health_port
            .unwrap_or_else(|| self.port.saturating_add(1000))
    }
}

/// PostgreSQL settings. When the section is absent the service keeps
/// products in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_run_migrations() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines; always on in production
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub server: ServerConfig,
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load using the environment named by `APP_ENV` (default `development`)
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        Self::load_for_env(config_dir, &env)
    }

    pub fn load_for_env(config_dir: &str, env: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::default("app_env", env))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()?;

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// JSON logging is forced in production
    pub fn json_logs(&self) -> bool {
        self.telemetry.json || self.is_production()
    }
}
