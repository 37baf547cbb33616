//! League document layout as served by Handball4All

use serde::Deserialize;

use crate::domain::{DomainError, Game, LeagueData, LeagueMetadata, TabScore};

/// First element of the league document array
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueDocument {
    pub head: LeagueMetadata,
    #[serde(default)]
    pub content: LeagueContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueContent {
    #[serde(default)]
    pub score: Vec<TabScore>,
    #[serde(rename = "futureGames", default)]
    pub future_games: GameList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameList {
    #[serde(default)]
    pub games: Vec<Game>,
}

impl From<LeagueDocument> for LeagueData {
    fn from(document: LeagueDocument) -> Self {
        LeagueData::new(document.head)
            .with_games(document.content.future_games.games)
            .with_scores(document.content.score)
    }
}

/// Turn the raw document array into a league snapshot
pub fn parse_league_document(url: &str, documents: Vec<LeagueDocument>) -> Result<LeagueData, DomainError> {
    documents
        .into_iter()
        .next()
        .map(LeagueData::from)
        .ok_or_else(|| DomainError::fetch(url, "League document is empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_to_league_data() {
        let documents: Vec<LeagueDocument> = serde_json::from_value(json!([{
            "head": {
                "name": "Landesliga Nord",
                "sname": "LL-N",
                "headline1": "Landesliga Nord Männer",
                "headline2": "Saison 2026/27",
                "actualized": "18.10.2026 09:12",
                "repURL": "https://h4a.test/report",
                "scoreShownPerGame": 0
            },
            "content": {
                "score": [
                    { "tabScore": 1, "tabTeamname": "TSV Musterstadt", "numPlayedGames": 4 }
                ],
                "futureGames": {
                    "games": [
                        { "gID": "1001", "gHomeTeam": "TSV Musterstadt", "gGuestTeam": "HC Beispiel" },
                        { "gID": "1002", "gHomeTeam": "HC Beispiel", "gGuestTeam": "SG Nord" }
                    ]
                }
            }
        }]))
        .unwrap();

        let data = parse_league_document("http://h4a.test/league", documents).unwrap();

        assert_eq!(data.metadata.sname, "LL-N");
        assert!(!data.metadata.score_shown_per_game);
        assert_eq!(data.scores.len(), 1);
        assert_eq!(data.scores[0].num_played_games, 4);
        assert_eq!(data.games.len(), 2);
        assert_eq!(data.games[1].home_team, "HC Beispiel");
    }

    #[test]
    fn test_document_without_content() {
        let documents: Vec<LeagueDocument> = serde_json::from_value(json!([{
            "head": { "name": "Kreisliga", "sname": "KL" }
        }]))
        .unwrap();

        let data = parse_league_document("http://h4a.test/league", documents).unwrap();

        assert_eq!(data.metadata.name, "Kreisliga");
        assert!(data.games.is_empty());
        assert!(data.scores.is_empty());
    }

    #[test]
    fn test_empty_document_is_fetch_error() {
        let result = parse_league_document("http://h4a.test/league", Vec::new());

        match result {
            Err(DomainError::Fetch { url, .. }) => assert_eq!(url, "http://h4a.test/league"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
