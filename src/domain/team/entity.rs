//! Team entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_internal_name, validate_team_id, TeamValidationError};

/// Team identifier - server-generated, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TeamId(i64);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: i64) -> Result<Self, TeamValidationError> {
        validate_team_id(id)?;
        Ok(Self(id))
    }

    /// Parse a TeamId from its textual form
    pub fn parse(value: &str) -> Result<Self, TeamValidationError> {
        let id = value
            .trim()
            .parse::<i64>()
            .map_err(|_| TeamValidationError::InvalidId(value.to_string()))?;

        Self::new(id)
    }

    /// Get the inner value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for i64 {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split a comma-delimited identificator string into its parts
///
/// Blank entries are dropped and surrounding whitespace is trimmed.
pub fn parse_identificators(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Team entity
///
/// A team without an id has not been persisted yet; saving it creates a new row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<TeamId>,
    /// Club-internal display name
    internal_name: String,
    /// Names the team is listed under on Handball4All
    #[serde(default)]
    identificators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    league_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cup_url: Option<String>,
}

impl Team {
    /// Create a new, unsaved team
    pub fn new(internal_name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let internal_name = internal_name.into();
        validate_internal_name(&internal_name)?;

        Ok(Self {
            id: None,
            internal_name,
            identificators: Vec::new(),
            league_url: None,
            cup_url: None,
        })
    }

    pub fn with_id(mut self, id: TeamId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_identificators(mut self, identificators: Vec<String>) -> Self {
        self.identificators = identificators;
        self
    }

    pub fn with_league_url(mut self, url: Option<String>) -> Self {
        self.league_url = url;
        self
    }

    pub fn with_cup_url(mut self, url: Option<String>) -> Self {
        self.cup_url = url;
        self
    }

    // Getters

    pub fn id(&self) -> Option<TeamId> {
        self.id
    }

    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    pub fn identificators(&self) -> &[String] {
        &self.identificators
    }

    /// Identificators joined with a bare comma, the stored form
    ///
    /// Whitespace around entries is not kept: "H1, TSV Herren 1" comes back
    /// as "H1,TSV Herren 1".
    pub fn identificators_str(&self) -> String {
        self.identificators.join(",")
    }

    pub fn league_url(&self) -> Option<&str> {
        self.league_url.as_deref()
    }

    pub fn cup_url(&self) -> Option<&str> {
        self.cup_url.as_deref()
    }

    /// Whether the team has been persisted
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
