//! Table names derived from the configured prefix

use crate::domain::DomainError;

/// Names of the four tables, all sharing one prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub teams: String,
    pub league_metadata: String,
    pub games: String,
    pub tab_scores: String,
}

impl TableNames {
    /// Build table names; the prefix ends up in SQL text so only `[A-Za-z0-9_]` is allowed
    pub fn new(prefix: &str) -> Result<Self, DomainError> {
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::configuration(format!(
                "Table prefix '{}' may only contain letters, digits and underscores",
                prefix
            )));
        }

        Ok(Self {
            teams: format!("{}teams", prefix),
            league_metadata: format!("{}leaguemetadata", prefix),
            games: format!("{}games", prefix),
            tab_scores: format!("{}tabscores", prefix),
        })
    }

    /// Parents before children
    pub fn creation_order(&self) -> [&str; 4] {
        [
            &self.teams,
            &self.league_metadata,
            &self.games,
            &self.tab_scores,
        ]
    }

    /// Children before parents
    pub fn drop_order(&self) -> [&str; 4] {
        [
            &self.tab_scores,
            &self.games,
            &self.league_metadata,
            &self.teams,
        ]
    }
}
