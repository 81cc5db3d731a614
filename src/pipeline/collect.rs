//! Team filter and season loop: pulls the seven dataset kinds per season,
//! applies the top-division filter and tags each surviving row with its
//! season before pooling.

use std::collections::HashSet;
use tracing::{info, warn};

use crate::constants::FBS_CLASSIFICATION;
use crate::data_fetcher::CfbdClient;
use crate::data_fetcher::models::{
    BettingLine, EloRating, Game, GameMedia, PregameWinProbability, RankingWeek, SpRating,
};
use crate::error::AppError;

/// All rows collected over the season loop, one vector per dataset kind.
/// Rows are in season order; within a season they keep API response order.
#[derive(Debug, Default, Clone)]
pub struct CollectedData {
    pub games: Vec<Game>,
    pub sp: Vec<SpRating>,
    pub elo: Vec<EloRating>,
    pub wp: Vec<PregameWinProbability>,
    pub lines: Vec<BettingLine>,
    pub rankings: Vec<RankingWeek>,
    pub media: Vec<GameMedia>,
}

/// Fetches the roster and returns the set of top-division (FBS) school
/// names. Computed once per run and reused for all season filtering.
pub async fn fetch_fbs_teams(client: &CfbdClient) -> Result<HashSet<String>, AppError> {
    let teams = client.fetch_teams().await?;
    let fbs: HashSet<String> = teams
        .into_iter()
        .filter(|t| t.classification.as_deref() == Some(FBS_CLASSIFICATION))
        .map(|t| t.school)
        .collect();
    info!("Top-division filter holds {} teams", fbs.len());
    Ok(fbs)
}

/// Runs the season loop over the inclusive year range, accumulating filtered
/// and season-tagged rows per dataset kind.
///
/// A failed fetch contributes zero rows for that kind and season; the reason
/// is logged and the loop continues.
pub async fn collect_seasons(
    client: &CfbdClient,
    fbs_teams: &HashSet<String>,
    start_year: i32,
    end_year: i32,
) -> CollectedData {
    let mut data = CollectedData::default();

    for year in start_year..=end_year {
        info!("Pulling data for {year}...");

        let mut games = or_empty(client.fetch_games(year).await, "games", year);
        filter_games(&mut games);
        tag_season(&mut games, year, |g, s| g.season = s);
        data.games.extend(games);

        let mut sp = or_empty(client.fetch_sp_ratings(year).await, "sp", year);
        sp.retain(|r| fbs_teams.contains(&r.team));
        tag_season(&mut sp, year, |r, s| r.season = s);
        data.sp.extend(sp);

        let mut elo = or_empty(client.fetch_elo_ratings(year).await, "elo", year);
        elo.retain(|r| fbs_teams.contains(&r.team));
        tag_season(&mut elo, year, |r, s| r.season = s);
        data.elo.extend(elo);

        let mut wp = or_empty(client.fetch_win_probabilities(year).await, "wp", year);
        filter_win_probabilities(&mut wp, fbs_teams);
        tag_season(&mut wp, year, |r, s| r.season = s);
        data.wp.extend(wp);

        let mut lines = or_empty(client.fetch_lines(year).await, "lines", year);
        lines.retain(|l| fbs_teams.contains(&l.home_team) || fbs_teams.contains(&l.away_team));
        tag_season(&mut lines, year, |l, s| l.season = s);
        data.lines.extend(lines);

        // Rankings stay nested and unfiltered; the flattener handles them.
        let mut rankings = or_empty(client.fetch_rankings(year).await, "rankings", year);
        tag_season(&mut rankings, year, |r, s| r.season = s);
        data.rankings.extend(rankings);

        let mut media = or_empty(client.fetch_media(year).await, "media", year);
        media.retain(|m| fbs_teams.contains(&m.home_team) || fbs_teams.contains(&m.away_team));
        tag_season(&mut media, year, |m, s| m.season = s);
        data.media.extend(media);
    }

    data
}

/// Collapses a failed fetch to an empty vector, keeping the reason visible
/// in the log. An empty vector from a 200 response passes through untouched.
fn or_empty<T>(result: Result<Vec<T>, AppError>, kind: &str, year: i32) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Fetch failed for {kind} {year}, continuing with no rows: {e}");
            Vec::new()
        }
    }
}

/// Keeps games where the home or away side is classified top-division.
/// An absent classification never matches.
fn filter_games(games: &mut Vec<Game>) {
    games.retain(|g| {
        g.home_classification.as_deref() == Some(FBS_CLASSIFICATION)
            || g.away_classification.as_deref() == Some(FBS_CLASSIFICATION)
    });
}

/// Filters win-probability rows by the top-division set only when the row
/// carries a team column; rows without one pass through unfiltered.
fn filter_win_probabilities(wp: &mut Vec<PregameWinProbability>, fbs_teams: &HashSet<String>) {
    wp.retain(|row| match &row.team {
        Some(team) => fbs_teams.contains(team),
        None => true,
    });
}

/// Sets the season tag on every row. Runs after filtering and before the
/// rows are pooled into the cross-season accumulator.
fn tag_season<T>(rows: &mut [T], year: i32, set: impl Fn(&mut T, i32)) {
    for row in rows {
        set(row, year);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(home: &str, home_class: Option<&str>, away: &str, away_class: Option<&str>) -> Game {
        Game {
            id: 1,
            season: 0,
            week: 1,
            season_type: "regular".to_string(),
            start_date: None,
            neutral_site: None,
            conference_game: None,
            home_team: home.to_string(),
            home_classification: home_class.map(str::to_string),
            home_conference: None,
            home_points: None,
            away_team: away.to_string(),
            away_classification: away_class.map(str::to_string),
            away_conference: None,
            away_points: None,
        }
    }

    fn wp_row(home: &str, away: &str, team: Option<&str>) -> PregameWinProbability {
        PregameWinProbability {
            game_id: None,
            season: 0,
            week: 1,
            season_type: "regular".to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            team: team.map(str::to_string),
            spread: None,
            home_win_probability: Some(0.5),
        }
    }

    #[test]
    fn test_filter_games_keeps_either_side_fbs() {
        let mut games = vec![
            game("A", Some("fbs"), "B", Some("fcs")),
            game("C", Some("fcs"), "D", Some("fbs")),
            game("E", Some("fcs"), "F", Some("fcs")),
            game("G", None, "H", None),
        ];
        filter_games(&mut games);
        let homes: Vec<&str> = games.iter().map(|g| g.home_team.as_str()).collect();
        assert_eq!(homes, vec!["A", "C"]);
    }

    #[test]
    fn test_filter_win_probabilities_passes_rows_without_team_column() {
        let fbs: HashSet<String> = ["A".to_string()].into_iter().collect();
        let mut wp = vec![
            wp_row("A", "B", Some("A")),
            wp_row("C", "D", Some("C")),
            wp_row("E", "F", None),
        ];
        filter_win_probabilities(&mut wp, &fbs);
        assert_eq!(wp.len(), 2);
        assert_eq!(wp[0].team.as_deref(), Some("A"));
        assert!(wp[1].team.is_none());
    }

    #[test]
    fn test_tag_season_overwrites_source_value() {
        let mut games = vec![game("A", Some("fbs"), "B", Some("fbs"))];
        games[0].season = 1999;
        tag_season(&mut games, 2020, |g, s| g.season = s);
        assert_eq!(games[0].season, 2020);
    }

    #[test]
    fn test_or_empty_collapses_error_to_zero_rows() {
        let failed: Result<Vec<Game>, AppError> =
            Err(AppError::api_server_error(500, "boom", "url"));
        assert!(or_empty(failed, "games", 2020).is_empty());

        let ok: Result<Vec<Game>, AppError> = Ok(vec![game("A", Some("fbs"), "B", None)]);
        assert_eq!(or_empty(ok, "games", 2020).len(), 1);
    }
}
