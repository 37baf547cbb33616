//! League snapshot entities
//!
//! Field names on the wire follow the Handball4All JSON documents.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Header information of a league table as published by Handball4All
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueMetadata {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub sname: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub headline1: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub headline2: String,
    /// Last update of the upstream data, kept verbatim
    #[serde(default, deserialize_with = "lenient::text")]
    pub actualized: String,
    #[serde(rename = "repURL", default, deserialize_with = "lenient::text")]
    pub rep_url: String,
    /// Whether games show the secondary score pair as well
    #[serde(rename = "scoreShownPerGame", default, deserialize_with = "lenient::flag")]
    pub score_shown_per_game: bool,
}

/// A single scheduled or played game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "gID", deserialize_with = "lenient::text")]
    pub g_id: String,
    #[serde(rename = "sGID", default, deserialize_with = "lenient::optional_text")]
    pub s_gid: Option<String>,
    #[serde(rename = "gNo", default, deserialize_with = "lenient::text")]
    pub g_no: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub live: bool,
    #[serde(rename = "gToken", default, deserialize_with = "lenient::optional_text")]
    pub g_token: Option<String>,
    #[serde(rename = "gAppid", default, deserialize_with = "lenient::text")]
    pub g_appid: String,
    #[serde(rename = "gDate", default, deserialize_with = "lenient::text")]
    pub g_date: String,
    #[serde(rename = "gWDay", default, deserialize_with = "lenient::text")]
    pub g_wday: String,
    #[serde(rename = "gTime", default, deserialize_with = "lenient::text")]
    pub g_time: String,
    #[serde(rename = "gGymnasiumID", default, deserialize_with = "lenient::text")]
    pub gymnasium_id: String,
    #[serde(rename = "gGymnasiumNo", default, deserialize_with = "lenient::text")]
    pub gymnasium_no: String,
    #[serde(rename = "gGymnasiumName", default, deserialize_with = "lenient::text")]
    pub gymnasium_name: String,
    #[serde(rename = "gGymnasiumPostal", default, deserialize_with = "lenient::text")]
    pub gymnasium_postal: String,
    #[serde(rename = "gGymnasiumTown", default, deserialize_with = "lenient::text")]
    pub gymnasium_town: String,
    #[serde(rename = "gGymnasiumStreet", default, deserialize_with = "lenient::text")]
    pub gymnasium_street: String,
    #[serde(rename = "gHomeTeam", deserialize_with = "lenient::text")]
    pub home_team: String,
    #[serde(rename = "gGuestTeam", deserialize_with = "lenient::text")]
    pub guest_team: String,
    #[serde(rename = "gHomeGoals", default, deserialize_with = "lenient::optional_int")]
    pub home_goals: Option<i64>,
    #[serde(rename = "gGuestGoals", default, deserialize_with = "lenient::optional_int")]
    pub guest_goals: Option<i64>,
    #[serde(rename = "gHomeGoals_1", default, deserialize_with = "lenient::optional_int")]
    pub home_goals_1: Option<i64>,
    #[serde(rename = "gGuestGoals_1", default, deserialize_with = "lenient::optional_int")]
    pub guest_goals_1: Option<i64>,
    #[serde(rename = "gHomePoints", default, deserialize_with = "lenient::optional_int")]
    pub home_points: Option<i64>,
    #[serde(rename = "gGuestPoints", default, deserialize_with = "lenient::optional_int")]
    pub guest_points: Option<i64>,
    #[serde(rename = "gComment", default, deserialize_with = "lenient::text")]
    pub comment: String,
    #[serde(rename = "gGroupsortTxt", default, deserialize_with = "lenient::text")]
    pub groupsort_txt: String,
    #[serde(rename = "gReferee", default, deserialize_with = "lenient::text")]
    pub referee: String,
    #[serde(rename = "robotextstate", default, deserialize_with = "lenient::text")]
    pub robotext_state: String,
}

impl Game {
    /// A game has a result once both primary scores are known
    pub fn has_result(&self) -> bool {
        self.home_goals.is_some() && self.guest_goals.is_some()
    }
}

/// One row of the league standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabScore {
    /// Table position
    #[serde(rename = "tabScore", deserialize_with = "lenient::int")]
    pub tab_score: i64,
    #[serde(rename = "tabTeamID", default, deserialize_with = "lenient::text")]
    pub tab_team_id: String,
    #[serde(rename = "tabTeamname", deserialize_with = "lenient::text")]
    pub tab_teamname: String,
    #[serde(rename = "liveTeam", default, deserialize_with = "lenient::flag")]
    pub live_team: bool,
    #[serde(rename = "numPlayedGames", default, deserialize_with = "lenient::int")]
    pub num_played_games: i64,
    #[serde(rename = "numWonGames", default, deserialize_with = "lenient::int")]
    pub num_won_games: i64,
    #[serde(rename = "numEqualGames", default, deserialize_with = "lenient::int")]
    pub num_equal_games: i64,
    #[serde(rename = "numLostGames", default, deserialize_with = "lenient::int")]
    pub num_lost_games: i64,
    #[serde(rename = "numGoalsShot", default, deserialize_with = "lenient::int")]
    pub num_goals_shot: i64,
    #[serde(rename = "numGoalsGot", default, deserialize_with = "lenient::int")]
    pub num_goals_got: i64,
    #[serde(rename = "pointsPlus", default, deserialize_with = "lenient::int")]
    pub points_plus: i64,
    #[serde(rename = "pointsMinus", default, deserialize_with = "lenient::int")]
    pub points_minus: i64,
    #[serde(rename = "pointsPerGame10", default, deserialize_with = "lenient::text")]
    pub points_per_game10: String,
    #[serde(rename = "numGoalsDiffperGame", default, deserialize_with = "lenient::text")]
    pub num_goals_diff_per_game: String,
    #[serde(rename = "numGoalsShotperGame", default, deserialize_with = "lenient::text")]
    pub num_goals_shot_per_game: String,
    #[serde(rename = "posCriterion", default, deserialize_with = "lenient::text")]
    pub pos_criterion: String,
}

/// A complete league snapshot for one team: metadata, schedule and standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueData {
    pub metadata: LeagueMetadata,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub scores: Vec<TabScore>,
}

impl LeagueData {
    pub fn new(metadata: LeagueMetadata) -> Self {
        Self {
            metadata,
            games: Vec::new(),
            scores: Vec::new(),
        }
    }

    pub fn with_games(mut self, games: Vec<Game>) -> Self {
        self.games = games;
        self
    }

    pub fn with_scores(mut self, scores: Vec<TabScore>) -> Self {
        self.scores = scores;
        self
    }
}
