//! League data source trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::LeagueData;
use crate::domain::DomainError;

/// Where fresh league snapshots come from
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LeagueSource: Send + Sync {
    /// Fetch and parse the league document behind `url`
    async fn fetch_league(&self, url: &str) -> Result<LeagueData, DomainError>;
}
