use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::auth::TokenGrant;
use crate::infrastructure::storage::DatabaseConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseSettings,
    pub admin: AdminConfig,
    pub notices: NoticeConfig,
    pub h4a: H4aConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub table_prefix: String,
}

/// Who may use the settings page and where it lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub capability: String,
    pub page_path: String,
    pub grants: Vec<TokenGrant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    pub ttl_secs: u64,
    pub session_cookie: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct H4aConfig {
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
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

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://h4ac.db".to_string(),
            max_connections: 5,
            table_prefix: "h4ac_".to_string(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            capability: "manage_h4ac".to_string(),
            page_path: "/admin/h4a-client".to_string(),
            grants: Vec::new(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
            session_cookie: "h4ac_session".to_string(),
        }
    }
}

impl Default for H4aConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl DatabaseSettings {
    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.url)
            .with_max_connections(self.max_connections)
            .with_table_prefix(&self.table_prefix)
    }
}

impl NoticeConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl H4aConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
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

    /// Configuration for tests: in-memory database, quiet logging
    pub fn for_tests() -> Self {
        Self {
            database: DatabaseSettings {
                url: "sqlite::memory:".to_string(),
                ..DatabaseSettings::default()
            },
            ..Self::default()
        }
    }
}
