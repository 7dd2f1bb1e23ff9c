use serde::Deserialize;

use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests running longer than this are answered with 408
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Document store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let pool = PostgresConfig::default();

        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: pool.max_connections,
            min_connections: pool.min_connections,
            connect_timeout_secs: pool.connect_timeout_secs,
            idle_timeout_secs: pool.idle_timeout_secs,
        }
    }
}

impl StorageSettings {
    /// Resolves the settings into a concrete backend configuration
    ///
    /// The `DATABASE_URL` environment variable is used when no URL is
    /// configured.
    pub fn to_storage_config(&self) -> Result<StorageConfig, config::ConfigError> {
        let backend = StorageType::from_str(&self.backend).ok_or_else(|| {
            config::ConfigError::Message(format!(
                "Unknown storage backend '{}' (expected memory or postgres)",
                self.backend
            ))
        })?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        config::ConfigError::Message(
                            "storage.database_url or DATABASE_URL is required for postgres"
                                .to_string(),
                        )
                    })?;

                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(self.max_connections)
                        .with_min_connections(self.min_connections)
                        .with_connect_timeout(self.connect_timeout_secs)
                        .with_idle_timeout(self.idle_timeout_secs),
                ))
            }
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
