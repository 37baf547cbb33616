//! League synchronisation - fetch snapshots and store them per team

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainError, LeagueSource, Team, TeamId, TeamRepository};

/// Result of syncing one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced { games: usize, scores: usize },
    /// The team has no league URL
    Skipped,
    Failed(String),
}

/// Outcome for one team within a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    pub team_id: Option<TeamId>,
    pub internal_name: String,
    pub outcome: SyncOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub entries: Vec<SyncEntry>,
}

impl SyncReport {
    pub fn synced(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Synced { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, predicate: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.outcome)).count()
    }
}

/// Applies freshly fetched league snapshots through the team repository
pub struct LeagueSyncService {
    repository: Arc<dyn TeamRepository>,
    source: Arc<dyn LeagueSource>,
}

impl LeagueSyncService {
    pub fn new(repository: Arc<dyn TeamRepository>, source: Arc<dyn LeagueSource>) -> Self {
        Self { repository, source }
    }

    /// Sync a single team
    ///
    /// The fetch happens before any write, so a failed fetch leaves the stored
    /// snapshot untouched.
    pub async fn sync_team(&self, team: &Team) -> Result<SyncOutcome, DomainError> {
        let Some(url) = team.league_url() else {
            return Ok(SyncOutcome::Skipped);
        };

        let id = team.id().ok_or_else(|| {
            DomainError::invalid_id(format!("Team '{}' has not been saved", team.internal_name()))
        })?;

        let data = self.source.fetch_league(url).await?;
        let games = data.games.len();
        let scores = data.scores.len();

        self.repository.replace_league_data(id, data).await?;

        info!(team_id = %id, games, scores, "Team synced");
        Ok(SyncOutcome::Synced { games, scores })
    }

    /// Sync the team with the given id
    pub async fn sync_team_by_id(&self, id: TeamId) -> Result<SyncOutcome, DomainError> {
        let team = self
            .repository
            .get_team(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        self.sync_team(&team).await
    }

    /// Sync every team, continuing past individual failures
    pub async fn sync_all(&self) -> Result<SyncReport, DomainError> {
        let teams = self.repository.get_teams().await?;
        let mut report = SyncReport::default();

        for team in &teams {
            let outcome = match self.sync_team(team).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(team = %team.internal_name(), error = %e, "Team sync failed");
                    SyncOutcome::Failed(e.detail())
                }
            };

            report.entries.push(SyncEntry {
                team_id: team.id(),
                internal_name: team.internal_name().to_string(),
                outcome,
            });
        }

        info!(
            synced = report.synced(),
            skipped = report.skipped(),
            failed = report.failed(),
            "League sync finished"
        );
        Ok(report)
    }
}
