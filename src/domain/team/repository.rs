//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::league::LeagueData;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for teams and the league snapshots that hang off them
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// List all teams, ordered by id
    async fn get_teams(&self) -> Result<Vec<Team>, DomainError>;

    /// Get a team by ID
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Insert the team when it has no id, update the row with its id otherwise
    ///
    /// Returns the stored team, carrying the assigned id for inserts.
    async fn save_team(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID; dependent league data goes with it
    ///
    /// Returns false when no team with that id existed.
    async fn delete_team(&self, id: TeamId) -> Result<bool, DomainError>;

    /// Atomically replace the league snapshot of a team
    async fn replace_league_data(
        &self,
        team_id: TeamId,
        data: LeagueData,
    ) -> Result<(), DomainError>;

    /// Get the current league snapshot of a team, if any
    async fn get_league_data(&self, team_id: TeamId) -> Result<Option<LeagueData>, DomainError>;

    /// Message of the most recent storage failure
    fn last_error(&self) -> Option<String>;
}
