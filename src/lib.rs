//! H4A Admin
//!
//! Club team administration for Handball4All league data:
//! - SQLite schema for teams, league metadata, games and standings
//! - A settings page with post-redirect-get and one-time flash notices
//! - Capability checks against hashed admin tokens
//! - League snapshot sync from Handball4All

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

use api::state::AppState;
use domain::TeamRepository;
use infrastructure::{
    auth::TokenAuthorizer,
    h4a::{H4aClient, LeagueSyncService},
    notice::{InMemoryNoticeStore, NoticeManager, NoticeStoreConfig},
    storage::{connect, SqliteSchemaManager, TableNames},
    team::SqliteTeamRepository,
};

/// Open database connection and table names
#[derive(Debug, Clone)]
pub struct Storage {
    pub pool: SqlitePool,
    pub tables: TableNames,
}

impl Storage {
    pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let database = config.database.to_database_config();
        let tables = TableNames::new(&database.table_prefix)?;
        let pool = connect(&database)
            .await
            .with_context(|| format!("Failed to open database '{}'", database.url))?;

        Ok(Self { pool, tables })
    }

    pub fn schema_manager(&self) -> SqliteSchemaManager {
        SqliteSchemaManager::new(self.pool.clone(), self.tables.clone())
    }

    pub fn team_repository(&self) -> Arc<SqliteTeamRepository> {
        Arc::new(SqliteTeamRepository::new(
            self.pool.clone(),
            self.tables.clone(),
        ))
    }
}

/// Create the application state with all services wired to `storage`
pub fn create_app_state(config: &AppConfig, storage: &Storage) -> anyhow::Result<AppState> {
    let page_path = &config.admin.page_path;
    if !page_path.starts_with('/') {
        anyhow::bail!("admin.page_path must start with '/', got '{}'", page_path);
    }

    let notice_store = InMemoryNoticeStore::with_config(
        NoticeStoreConfig::default().with_ttl(config.notices.ttl()),
    );
    let authorizer = TokenAuthorizer::new(&config.admin.capability, config.admin.grants.clone());

    info!(
        capability = %config.admin.capability,
        grants = config.admin.grants.len(),
        page_path = %page_path,
        "Settings page configured"
    );

    Ok(AppState::new(
        storage.team_repository(),
        NoticeManager::new(Arc::new(notice_store)),
        Arc::new(authorizer),
        page_path.clone(),
        config.notices.session_cookie.clone(),
    ))
}

/// Create the league sync service for `storage`
pub fn create_sync_service(
    config: &AppConfig,
    storage: &Storage,
) -> anyhow::Result<LeagueSyncService> {
    let repository: Arc<dyn TeamRepository> = storage.team_repository();
    let client = H4aClient::new(config.h4a.timeout())?;

    Ok(LeagueSyncService::new(repository, Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SchemaManager;

    #[tokio::test]
    async fn test_create_app_state() {
        let config = AppConfig::for_tests();
        let storage = Storage::open(&config).await.unwrap();
        storage.schema_manager().create_tables().await.unwrap();

        let state = create_app_state(&config, &storage).unwrap();

        assert_eq!(state.page_path, "/admin/h4a-client");
        assert_eq!(state.session_cookie, "h4ac_session");
        assert!(state.teams.get_teams().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_relative_page_path_is_rejected() {
        let mut config = AppConfig::for_tests();
        config.admin.page_path = "admin".to_string();
        let storage = Storage::open(&config).await.unwrap();

        assert!(create_app_state(&config, &storage).is_err());
    }

    #[tokio::test]
    async fn test_bad_table_prefix_is_rejected() {
        let mut config = AppConfig::for_tests();
        config.database.table_prefix = "h4ac; DROP".to_string();

        assert!(Storage::open(&config).await.is_err());
    }
}
