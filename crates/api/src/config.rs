//! API configuration
//!
//! Layered with the `config` crate: struct defaults, then an optional
//! config file, then `CLIMATE_API_*` environment variables
//! (`CLIMATE_API_DATABASE__URL`, `CLIMATE_API_SERVER__PORT`, ...).

use climate_storage::StoreConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CLIMATE_API";

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "CLIMATE_API_CONFIG";

/// Config file basename looked up when `CLIMATE_API_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "climate-api";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Data-store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite URL of the pre-populated store
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            url: store.url,
            max_connections: store.max_connections,
            acquire_timeout_secs: store.acquire_timeout.as_secs(),
        }
    }
}

impl DatabaseConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.url.clone(),
            max_connections: self.max_connections.max(1),
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ApiConfig {
    /// Load from the file named by `CLIMATE_API_CONFIG` (if any) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_PATH_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&file, ENV_PREFIX)
    }

    /// Load from an optional file and environment variables under `env_prefix`
    pub fn load_from(file: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
