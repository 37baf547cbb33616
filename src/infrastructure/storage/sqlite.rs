//! SQLite connection pool setup

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::domain::DomainError;

/// SQLite database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL, e.g. `sqlite://h4ac.db` or `sqlite::memory:`
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Prefix prepended to every table name
    pub table_prefix: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://h4ac.db".to_string(),
            max_connections: 5,
            connect_timeout_secs: 30,
            table_prefix: "h4ac_".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// In-memory databases live and die with their single connection
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Open a connection pool with foreign key enforcement switched on
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            DomainError::configuration(format!("Invalid database URL '{}': {}", config.url, e))
        })?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

    pool_options = if config.is_in_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to SQLite: {}", e)))?;

    info!(url = %config.url, "Database connection established");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();

        assert_eq!(config.url, "sqlite://h4ac.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.table_prefix, "h4ac_");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_database_config_builder() {
        let config = DatabaseConfig::new("sqlite://club.db")
            .with_max_connections(2)
            .with_connect_timeout(5)
            .with_table_prefix("tsv_");

        assert_eq!(config.url, "sqlite://club.db");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.table_prefix, "tsv_");
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(DatabaseConfig::new("sqlite:file:club?mode=memory").is_in_memory());
    }

    #[tokio::test]
    async fn test_connect_enables_foreign_keys() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(enabled, 1);
    }
}
