//! SQLite schema manager

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info, warn};

use super::tables::TableNames;
use crate::domain::{DomainError, SchemaManager};

/// Creates and drops the team and league tables
#[derive(Debug, Clone)]
pub struct SqliteSchemaManager {
    pool: SqlitePool,
    tables: TableNames,
}

impl SqliteSchemaManager {
    pub fn new(pool: SqlitePool, tables: TableNames) -> Self {
        Self { pool, tables }
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    /// Check whether a table of the given name exists
    pub async fn table_exists(&self, name: &str) -> Result<bool, DomainError> {
        let found: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    /// Single CREATE statements in dependency order, each paired with its table name
    fn create_statements(&self) -> Vec<(String, String)> {
        let t = &self.tables;

        vec![
            (
                t.teams.clone(),
                format!(
                    r#"
                    CREATE TABLE IF NOT EXISTS {teams} (
                        id             INTEGER PRIMARY KEY AUTOINCREMENT,
                        internal_name  TEXT NOT NULL,
                        identificators TEXT NULL,
                        league_url     TEXT NULL,
                        cup_url        TEXT NULL
                    )
                    "#,
                    teams = t.teams
                ),
            ),
            (
                t.league_metadata.clone(),
                format!(
                    r#"
                    CREATE TABLE IF NOT EXISTS {metadata} (
                        id                   INTEGER PRIMARY KEY AUTOINCREMENT,
                        team_id              INTEGER NOT NULL UNIQUE,
                        name                 TEXT NOT NULL,
                        sname                TEXT NOT NULL,
                        headline1            TEXT NOT NULL,
                        headline2            TEXT NOT NULL,
                        actualized           TEXT NOT NULL,
                        rep_url              TEXT NOT NULL,
                        score_shown_per_game INTEGER NOT NULL,
                        CONSTRAINT fk_{metadata}_team
                            FOREIGN KEY (team_id) REFERENCES {teams}(id)
                            ON UPDATE CASCADE ON DELETE CASCADE
                    )
                    "#,
                    metadata = t.league_metadata,
                    teams = t.teams
                ),
            ),
            (
                t.games.clone(),
                format!(
                    r#"
                    CREATE TABLE IF NOT EXISTS {games} (
                        id               INTEGER PRIMARY KEY AUTOINCREMENT,
                        metadata_id      INTEGER NOT NULL,
                        g_id             TEXT NOT NULL,
                        s_gid            TEXT NULL DEFAULT NULL,
                        g_no             TEXT NOT NULL,
                        live             INTEGER NOT NULL,
                        g_token          TEXT NULL DEFAULT NULL,
                        g_appid          TEXT NOT NULL,
                        g_date           TEXT NOT NULL,
                        g_wday           TEXT NOT NULL,
                        g_time           TEXT NOT NULL,
                        gymnasium_id     TEXT NOT NULL,
                        gymnasium_no     TEXT NOT NULL,
                        gymnasium_name   TEXT NOT NULL,
                        gymnasium_postal TEXT NOT NULL,
                        gymnasium_town   TEXT NOT NULL,
                        gymnasium_street TEXT NOT NULL,
                        home_team        TEXT NOT NULL,
                        guest_team       TEXT NOT NULL,
                        home_goals       INTEGER NULL DEFAULT NULL,
                        guest_goals      INTEGER NULL DEFAULT NULL,
                        home_goals_1     INTEGER NULL DEFAULT NULL,
                        guest_goals_1    INTEGER NULL DEFAULT NULL,
                        home_points      INTEGER NULL DEFAULT NULL,
                        guest_points     INTEGER NULL DEFAULT NULL,
                        comment          TEXT NOT NULL,
                        groupsort_txt    TEXT NOT NULL,
                        referee          TEXT NOT NULL,
                        robotext_state   TEXT NOT NULL,
                        CONSTRAINT fk_{games}_metadata
                            FOREIGN KEY (metadata_id) REFERENCES {metadata}(id)
                            ON UPDATE CASCADE ON DELETE CASCADE
                    )
                    "#,
                    games = t.games,
                    metadata = t.league_metadata
                ),
            ),
            (
                t.games.clone(),
                format!(
                    "CREATE INDEX IF NOT EXISTS idx_{games}_metadata ON {games}(metadata_id)",
                    games = t.games
                ),
            ),
            (
                t.tab_scores.clone(),
                format!(
                    r#"
                    CREATE TABLE IF NOT EXISTS {scores} (
                        id                      INTEGER PRIMARY KEY AUTOINCREMENT,
                        metadata_id             INTEGER NOT NULL,
                        tab_score               INTEGER NOT NULL,
                        tab_team_id             TEXT NOT NULL,
                        tab_teamname            TEXT NOT NULL,
                        live_team               INTEGER NOT NULL,
                        num_played_games        INTEGER NOT NULL,
                        num_won_games           INTEGER NOT NULL,
                        num_equal_games         INTEGER NOT NULL,
                        num_lost_games          INTEGER NOT NULL,
                        num_goals_shot          INTEGER NOT NULL,
                        num_goals_got           INTEGER NOT NULL,
                        points_plus             INTEGER NOT NULL,
                        points_minus            INTEGER NOT NULL,
                        points_per_game10       TEXT NOT NULL,
                        num_goals_diff_per_game TEXT NOT NULL,
                        num_goals_shot_per_game TEXT NOT NULL,
                        pos_criterion           TEXT NOT NULL,
                        CONSTRAINT fk_{scores}_metadata
                            FOREIGN KEY (metadata_id) REFERENCES {metadata}(id)
                            ON UPDATE CASCADE ON DELETE CASCADE
                    )
                    "#,
                    scores = t.tab_scores,
                    metadata = t.league_metadata
                ),
            ),
            (
                t.tab_scores.clone(),
                format!(
                    "CREATE INDEX IF NOT EXISTS idx_{scores}_metadata ON {scores}(metadata_id)",
                    scores = t.tab_scores
                ),
            ),
        ]
    }
}

#[async_trait]
impl SchemaManager for SqliteSchemaManager {
    async fn create_tables(&self) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::schema(format!("Failed to start transaction: {}", e)))?;

        let statements = self.create_statements();

        for (table, statement) in statements {
            debug!(table = %table, "Creating table");

            if let Err(e) = sqlx::query(&statement).execute(&mut *tx).await {
                let message = format!("Failed to create table '{}': {}", table, e);

                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Rollback after failed table creation failed");
                }

                return Err(DomainError::schema(message));
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::schema(format!("Failed to commit schema: {}", e)))?;

        info!(tables = ?self.tables.creation_order(), "Tables created");
        Ok(())
    }

    async fn drop_tables(&self) -> Result<(), DomainError> {
        let mut failures = Vec::new();

        for table in self.tables.drop_order() {
            let statement = format!("DROP TABLE IF EXISTS {}", table);

            match sqlx::query(&statement).execute(&self.pool).await {
                Ok(_) => debug!(table = %table, "Dropped table"),
                Err(e) => {
                    warn!(table = %table, error = %e, "Failed to drop table");
                    failures.push(format!("{}: {}", table, e));
                }
            }
        }

        if failures.is_empty() {
            info!("Tables dropped");
            Ok(())
        } else {
            Err(DomainError::schema(format!(
                "Failed to drop {} table(s): {}",
                failures.len(),
                failures.join("; ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{connect, DatabaseConfig};

    async fn create_manager() -> SqliteSchemaManager {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        SqliteSchemaManager::new(pool, TableNames::new("h4ac_").unwrap())
    }

    async fn existing_tables(manager: &SqliteSchemaManager) -> Vec<bool> {
        let mut result = Vec::new();

        for table in manager.tables().creation_order() {
            result.push(manager.table_exists(table).await.unwrap());
        }

        result
    }

    #[tokio::test]
    async fn test_create_tables() {
        let manager = create_manager().await;

        manager.create_tables().await.unwrap();

        assert_eq!(existing_tables(&manager).await, vec![true; 4]);
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() {
        let manager = create_manager().await;

        manager.create_tables().await.unwrap();
        manager.create_tables().await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name LIKE 'h4ac_%'",
        )
        .fetch_one(&manager.pool)
        .await
        .unwrap();

        assert_eq!(count, 4);
    }

    #[tokio::test]
    async fn test_create_tables_adds_metadata_indexes() {
        let manager = create_manager().await;

        manager.create_tables().await.unwrap();

        let indexes: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_h4ac_%' ORDER BY name",
        )
        .fetch_all(&manager.pool)
        .await
        .unwrap();

        assert_eq!(
            indexes,
            vec!["idx_h4ac_games_metadata", "idx_h4ac_tabscores_metadata"]
        );
    }

    #[tokio::test]
    async fn test_create_tables_rolls_back_on_failure() {
        let manager = create_manager().await;

        // An index already owning the games table name makes that CREATE fail
        sqlx::raw_sql("CREATE TABLE blocker (x INTEGER); CREATE INDEX h4ac_games ON blocker(x);")
            .execute(&manager.pool)
            .await
            .unwrap();

        let result = manager.create_tables().await;

        assert!(matches!(result, Err(DomainError::Schema { .. })));
        assert_eq!(existing_tables(&manager).await, vec![false; 4]);
    }

    #[tokio::test]
    async fn test_drop_tables() {
        let manager = create_manager().await;
        manager.create_tables().await.unwrap();

        manager.drop_tables().await.unwrap();

        assert_eq!(existing_tables(&manager).await, vec![false; 4]);
    }

    #[tokio::test]
    async fn test_drop_tables_without_schema_succeeds() {
        let manager = create_manager().await;

        assert!(manager.drop_tables().await.is_ok());
    }

    #[tokio::test]
    async fn test_drop_tables_reports_every_failure() {
        let manager = create_manager().await;
        manager.create_tables().await.unwrap();
        manager.pool.close().await;

        let err = manager.drop_tables().await.unwrap_err();
        let message = err.to_string();

        assert!(message.contains("Failed to drop 4 table(s)"));
        for table in manager.tables().drop_order() {
            assert!(message.contains(table));
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_reference_parent_tables() {
        let manager = create_manager().await;
        manager.create_tables().await.unwrap();

        let parent: String = sqlx::query_scalar(
            "SELECT \"table\" FROM pragma_foreign_key_list('h4ac_leaguemetadata')",
        )
        .fetch_one(&manager.pool)
        .await
        .unwrap();

        assert_eq!(parent, "h4ac_teams");
    }
}
