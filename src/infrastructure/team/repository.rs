//! SQLite-backed team repository implementation

use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use super::league;
use crate::domain::team::{parse_identificators, Team, TeamId, TeamRepository};
use crate::domain::{DomainError, LeagueData};
use crate::infrastructure::storage::TableNames;

/// SQLite implementation of TeamRepository
#[derive(Debug)]
pub struct SqliteTeamRepository {
    pool: SqlitePool,
    tables: TableNames,
    last_error: RwLock<Option<String>>,
}

impl SqliteTeamRepository {
    pub fn new(pool: SqlitePool, tables: TableNames) -> Self {
        Self {
            pool,
            tables,
            last_error: RwLock::new(None),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Remember the outcome of a storage call for `last_error`
    fn record<T>(&self, result: Result<T, DomainError>) -> Result<T, DomainError> {
        if let Ok(mut last_error) = self.last_error.write() {
            *last_error = result.as_ref().err().map(DomainError::detail);
        }

        result
    }

    async fn insert_team(&self, team: Team) -> Result<Team, DomainError> {
        let query = format!(
            "INSERT INTO {} (internal_name, identificators, league_url, cup_url)
             VALUES (?1, ?2, ?3, ?4)",
            self.tables.teams
        );

        let result = sqlx::query(&query)
            .bind(team.internal_name())
            .bind(identificators_column(&team))
            .bind(team.league_url())
            .bind(team.cup_url())
            .execute(&self.pool)
            .await?;

        let id = TeamId::new(result.last_insert_rowid())
            .map_err(|e| DomainError::internal(e.to_string()))?;

        info!(id = %id, internal_name = %team.internal_name(), "Team created");
        Ok(team.with_id(id))
    }

    async fn update_team(&self, id: TeamId, team: Team) -> Result<Team, DomainError> {
        let query = format!(
            "UPDATE {}
             SET internal_name = ?2, identificators = ?3, league_url = ?4, cup_url = ?5
             WHERE id = ?1",
            self.tables.teams
        );

        let result = sqlx::query(&query)
            .bind(id.value())
            .bind(team.internal_name())
            .bind(identificators_column(&team))
            .bind(team.league_url())
            .bind(team.cup_url())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Team '{}' not found", id)));
        }

        info!(id = %id, internal_name = %team.internal_name(), "Team updated");
        Ok(team)
    }

    async fn replace_league_data_tx(
        &self,
        team_id: TeamId,
        data: &LeagueData,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await?;

        let exists_query = format!("SELECT 1 FROM {} WHERE id = ?1", self.tables.teams);
        let exists: Option<i64> = sqlx::query_scalar(&exists_query)
            .bind(team_id.value())
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team_id
            )));
        }

        let removed = league::delete_for_team(&mut *tx, &self.tables, team_id).await?;
        league::insert_for_team(&mut *tx, &self.tables, team_id, data).await?;

        tx.commit().await?;

        info!(
            team_id = %team_id,
            replaced = removed > 0,
            games = data.games.len(),
            scores = data.scores.len(),
            "League data replaced"
        );
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn get_teams(&self) -> Result<Vec<Team>, DomainError> {
        let query = format!(
            "SELECT id, internal_name, identificators, league_url, cup_url FROM {} ORDER BY id",
            self.tables.teams
        );

        let result = async {
            let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
            rows.iter().map(team_from_row).collect::<Result<Vec<_>, _>>()
        }
        .await;

        self.record(result)
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let query = format!(
            "SELECT id, internal_name, identificators, league_url, cup_url FROM {} WHERE id = ?1",
            self.tables.teams
        );

        let result = async {
            let row = sqlx::query(&query)
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await?;
            row.as_ref().map(team_from_row).transpose()
        }
        .await;

        self.record(result)
    }

    async fn save_team(&self, team: Team) -> Result<Team, DomainError> {
        let result = match team.id() {
            None => self.insert_team(team).await,
            Some(id) => self.update_team(id, team).await,
        };

        self.record(result)
    }

    async fn delete_team(&self, id: TeamId) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE id = ?1", self.tables.teams);

        let result = sqlx::query(&query)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(DomainError::from);

        if let Ok(deleted) = result {
            debug!(id = %id, deleted, "Team delete executed");
        }

        self.record(result)
    }

    async fn replace_league_data(
        &self,
        team_id: TeamId,
        data: LeagueData,
    ) -> Result<(), DomainError> {
        let result = self.replace_league_data_tx(team_id, &data).await;
        self.record(result)
    }

    async fn get_league_data(&self, team_id: TeamId) -> Result<Option<LeagueData>, DomainError> {
        let result = async {
            let mut conn = self.pool.acquire().await?;
            league::load_for_team(&mut *conn, &self.tables, team_id).await
        }
        .await;

        self.record(result)
    }

    fn last_error(&self) -> Option<String> {
        self.last_error.read().ok().and_then(|e| e.clone())
    }
}

fn identificators_column(team: &Team) -> Option<String> {
    if team.identificators().is_empty() {
        None
    } else {
        Some(team.identificators_str())
    }
}

fn team_from_row(row: &SqliteRow) -> Result<Team, DomainError> {
    let id: i64 = row.try_get("id")?;
    let internal_name: String = row.try_get("internal_name")?;
    let identificators: Option<String> = row.try_get("identificators")?;
    let league_url: Option<String> = row.try_get("league_url")?;
    let cup_url: Option<String> = row.try_get("cup_url")?;

    let id = TeamId::new(id).map_err(|e| DomainError::storage(e.to_string()))?;

    let team = Team::new(internal_name)
        .map_err(|e| DomainError::storage(format!("Invalid team row {}: {}", id, e)))?;

    Ok(team
        .with_id(id)
        .with_identificators(
            identificators
                .as_deref()
                .map(parse_identificators)
                .unwrap_or_default(),
        )
        .with_league_url(league_url)
        .with_cup_url(cup_url))
}
