//! League snapshot rows

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

use crate::domain::{DomainError, Game, LeagueData, LeagueMetadata, TabScore, TeamId};
use crate::infrastructure::storage::TableNames;

/// Remove the snapshot of a team; games and standings follow through the cascade
pub(super) async fn delete_for_team(
    conn: &mut SqliteConnection,
    tables: &TableNames,
    team_id: TeamId,
) -> Result<u64, DomainError> {
    let query = format!("DELETE FROM {} WHERE team_id = ?1", tables.league_metadata);

    let result = sqlx::query(&query)
        .bind(team_id.value())
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Insert a complete snapshot for a team that currently has none
pub(super) async fn insert_for_team(
    conn: &mut SqliteConnection,
    tables: &TableNames,
    team_id: TeamId,
    data: &LeagueData,
) -> Result<i64, DomainError> {
    let metadata_id = insert_metadata(conn, tables, team_id, &data.metadata).await?;

    for game in &data.games {
        insert_game(conn, tables, metadata_id, game).await?;
    }

    for score in &data.scores {
        insert_score(conn, tables, metadata_id, score).await?;
    }

    Ok(metadata_id)
}

/// Load the snapshot of a team
pub(super) async fn load_for_team(
    conn: &mut SqliteConnection,
    tables: &TableNames,
    team_id: TeamId,
) -> Result<Option<LeagueData>, DomainError> {
    let query = format!(
        "SELECT id, name, sname, headline1, headline2, actualized, rep_url, score_shown_per_game
         FROM {} WHERE team_id = ?1",
        tables.league_metadata
    );

    let Some(row) = sqlx::query(&query)
        .bind(team_id.value())
        .fetch_optional(&mut *conn)
        .await?
    else {
        return Ok(None);
    };

    let metadata_id: i64 = row.try_get("id")?;
    let metadata = metadata_from_row(&row)?;

    let query = format!("SELECT * FROM {} WHERE metadata_id = ?1 ORDER BY id", tables.games);
    let games = sqlx::query(&query)
        .bind(metadata_id)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(game_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    let query = format!(
        "SELECT * FROM {} WHERE metadata_id = ?1 ORDER BY tab_score, id",
        tables.tab_scores
    );
    let scores = sqlx::query(&query)
        .bind(metadata_id)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(score_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(
        LeagueData::new(metadata)
            .with_games(games)
            .with_scores(scores),
    ))
}

async fn insert_metadata(
    conn: &mut SqliteConnection,
    tables: &TableNames,
    team_id: TeamId,
    metadata: &LeagueMetadata,
) -> Result<i64, DomainError> {
    let query = format!(
        "INSERT INTO {} (team_id, name, sname, headline1, headline2, actualized, rep_url,
                         score_shown_per_game)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        tables.league_metadata
    );

    let result = sqlx::query(&query)
        .bind(team_id.value())
        .bind(&metadata.name)
        .bind(&metadata.sname)
        .bind(&metadata.headline1)
        .bind(&metadata.headline2)
        .bind(&metadata.actualized)
        .bind(&metadata.rep_url)
        .bind(metadata.score_shown_per_game)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}

async fn insert_game(
    conn: &mut SqliteConnection,
    tables: &TableNames,
    metadata_id: i64,
    game: &Game,
) -> Result<(), DomainError> {
    let query = format!(
        "INSERT INTO {} (metadata_id, g_id, s_gid, g_no, live, g_token, g_appid, g_date, g_wday,
                         g_time, gymnasium_id, gymnasium_no, gymnasium_name, gymnasium_postal,
                         gymnasium_town, gymnasium_street, home_team, guest_team, home_goals,
                         guest_goals, home_goals_1, guest_goals_1, home_points, guest_points,
                         comment, groupsort_txt, referee, robotext_state)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                 ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28)",
        tables.games
    );

    sqlx::query(&query)
        .bind(metadata_id)
        .bind(&game.g_id)
        .bind(&game.s_gid)
        .bind(&game.g_no)
        .bind(game.live)
        .bind(&game.g_token)
        .bind(&game.g_appid)
        .bind(&game.g_date)
        .bind(&game.g_wday)
        .bind(&game.g_time)
        .bind(&game.gymnasium_id)
        .bind(&game.gymnasium_no)
        .bind(&game.gymnasium_name)
        .bind(&game.gymnasium_postal)
        .bind(&game.gymnasium_town)
        .bind(&game.gymnasium_street)
        .bind(&game.home_team)
        .bind(&game.guest_team)
        .bind(game.home_goals)
        .bind(game.guest_goals)
        .bind(game.home_goals_1)
        .bind(game.guest_goals_1)
        .bind(game.home_points)
        .bind(game.guest_points)
        .bind(&game.comment)
        .bind(&game.groupsort_txt)
        .bind(&game.referee)
        .bind(&game.robotext_state)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

async fn insert_score(
    conn: &mut SqliteConnection,
    tables: &TableNames,
    metadata_id: i64,
    score: &TabScore,
) -> Result<(), DomainError> {
    let query = format!(
        "INSERT INTO {} (metadata_id, tab_score, tab_team_id, tab_teamname, live_team,
                         num_played_games, num_won_games, num_equal_games, num_lost_games,
                         num_goals_shot, num_goals_got, points_plus, points_minus,
                         points_per_game10, num_goals_diff_per_game, num_goals_shot_per_game,
                         pos_criterion)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        tables.tab_scores
    );

    sqlx::query(&query)
        .bind(metadata_id)
        .bind(score.tab_score)
        .bind(&score.tab_team_id)
        .bind(&score.tab_teamname)
        .bind(score.live_team)
        .bind(score.num_played_games)
        .bind(score.num_won_games)
        .bind(score.num_equal_games)
        .bind(score.num_lost_games)
        .bind(score.num_goals_shot)
        .bind(score.num_goals_got)
        .bind(score.points_plus)
        .bind(score.points_minus)
        .bind(&score.points_per_game10)
        .bind(&score.num_goals_diff_per_game)
        .bind(&score.num_goals_shot_per_game)
        .bind(&score.pos_criterion)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

fn metadata_from_row(row: &SqliteRow) -> Result<LeagueMetadata, sqlx::Error> {
    Ok(LeagueMetadata {
        name: row.try_get("name")?,
        sname: row.try_get("sname")?,
        headline1: row.try_get("headline1")?,
        headline2: row.try_get("headline2")?,
        actualized: row.try_get("actualized")?,
        rep_url: row.try_get("rep_url")?,
        score_shown_per_game: row.try_get("score_shown_per_game")?,
    })
}

fn game_from_row(row: &SqliteRow) -> Result<Game, sqlx::Error> {
    Ok(Game {
        g_id: row.try_get("g_id")?,
        s_gid: row.try_get("s_gid")?,
        g_no: row.try_get("g_no")?,
        live: row.try_get("live")?,
        g_token: row.try_get("g_token")?,
        g_appid: row.try_get("g_appid")?,
        g_date: row.try_get("g_date")?,
        g_wday: row.try_get("g_wday")?,
        g_time: row.try_get("g_time")?,
        gymnasium_id: row.try_get("gymnasium_id")?,
        gymnasium_no: row.try_get("gymnasium_no")?,
        gymnasium_name: row.try_get("gymnasium_name")?,
        gymnasium_postal: row.try_get("gymnasium_postal")?,
        gymnasium_town: row.try_get("gymnasium_town")?,
        gymnasium_street: row.try_get("gymnasium_street")?,
        home_team: row.try_get("home_team")?,
        guest_team: row.try_get("guest_team")?,
        home_goals: row.try_get("home_goals")?,
        guest_goals: row.try_get("guest_goals")?,
        home_goals_1: row.try_get("home_goals_1")?,
        guest_goals_1: row.try_get("guest_goals_1")?,
        home_points: row.try_get("home_points")?,
        guest_points: row.try_get("guest_points")?,
        comment: row.try_get("comment")?,
        groupsort_txt: row.try_get("groupsort_txt")?,
        referee: row.try_get("referee")?,
        robotext_state: row.try_get("robotext_state")?,
    })
}

fn score_from_row(row: &SqliteRow) -> Result<TabScore, sqlx::Error> {
    Ok(TabScore {
        tab_score: row.try_get("tab_score")?,
        tab_team_id: row.try_get("tab_team_id")?,
        tab_teamname: row.try_get("tab_teamname")?,
        live_team: row.try_get("live_team")?,
        num_played_games: row.try_get("num_played_games")?,
        num_won_games: row.try_get("num_won_games")?,
        num_equal_games: row.try_get("num_equal_games")?,
        num_lost_games: row.try_get("num_lost_games")?,
        num_goals_shot: row.try_get("num_goals_shot")?,
        num_goals_got: row.try_get("num_goals_got")?,
        points_plus: row.try_get("points_plus")?,
        points_minus: row.try_get("points_minus")?,
        points_per_game10: row.try_get("points_per_game10")?,
        num_goals_diff_per_game: row.try_get("num_goals_diff_per_game")?,
        num_goals_shot_per_game: row.try_get("num_goals_shot_per_game")?,
        pos_criterion: row.try_get("pos_criterion")?,
    })
}
