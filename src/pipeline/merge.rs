//! Merger: left-joins games with media, betting lines, win probability and
//! AP poll rankings on the natural key (season, week, seasonType, homeTeam,
//! awayTeam), then derives the matchup ranking flags.
//!
//! Enrichment tables are deduplicated keep-first on their join key before
//! the join, so every game produces exactly one merged row; nothing fans
//! out and nothing is dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::data_fetcher::models::{Game, GameMedia, PregameWinProbability};
use crate::pipeline::rankings::FlatRanking;
use crate::pipeline::store::LineRecord;

/// The natural composite key identifying one game across all datasets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameKey {
    pub season: i32,
    pub week: i32,
    pub season_type: String,
    pub home_team: String,
    pub away_team: String,
}

impl GameKey {
    fn of_game(game: &Game) -> Self {
        GameKey {
            season: game.season,
            week: game.week,
            season_type: game.season_type.clone(),
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
        }
    }
}

/// Key for joining a ranking to one side of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TeamWeekKey {
    season: i32,
    week: i32,
    season_type: String,
    team: String,
}

/// A game row enriched with media, lines, win probability and poll ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedGame {
    pub id: i64,
    pub season: i32,
    pub week: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "neutralSite")]
    pub neutral_site: Option<bool>,
    #[serde(rename = "conferenceGame")]
    pub conference_game: Option<bool>,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "homeClassification")]
    pub home_classification: Option<String>,
    #[serde(rename = "homeConference")]
    pub home_conference: Option<String>,
    #[serde(rename = "homePoints")]
    pub home_points: Option<i32>,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "awayClassification")]
    pub away_classification: Option<String>,
    #[serde(rename = "awayConference")]
    pub away_conference: Option<String>,
    #[serde(rename = "awayPoints")]
    pub away_points: Option<i32>,
    #[serde(rename = "mediaType")]
    pub media_type: Option<String>,
    pub outlet: Option<String>,
    /// Betting lines for the game as a JSON column, left unflattened.
    pub lines: Option<String>,
    #[serde(rename = "homeWinProbability")]
    pub home_win_probability: Option<f64>,
    #[serde(rename = "homeRank")]
    pub home_rank: Option<i32>,
    #[serde(rename = "awayRank")]
    pub away_rank: Option<i32>,
    #[serde(rename = "homeRanked")]
    pub home_ranked: bool,
    #[serde(rename = "awayRanked")]
    pub away_ranked: bool,
    #[serde(rename = "rankedTeamCount")]
    pub ranked_team_count: u8,
    #[serde(rename = "isRankedMatchup")]
    pub is_ranked_matchup: bool,
}

/// Left-joins the enrichment datasets onto the games table. Every game row
/// is preserved; unmatched enrichment columns stay empty.
///
/// `rankings` must already be restricted to the single designated poll.
pub fn merge(
    games: &[Game],
    media: &[GameMedia],
    lines: &[LineRecord],
    wp: &[PregameWinProbability],
    rankings: &[FlatRanking],
) -> Vec<MergedGame> {
    let media_by_key = index_media(media);
    let lines_by_key = index_lines(lines);
    let wp_by_key = index_win_probabilities(wp);
    let ranks_by_team = index_rankings(rankings);

    debug!(
        "Merging {} games against {} media, {} lines, {} wp, {} ranking keys",
        games.len(),
        media_by_key.len(),
        lines_by_key.len(),
        wp_by_key.len(),
        ranks_by_team.len()
    );

    games
        .iter()
        .map(|game| {
            let key = GameKey::of_game(game);
            let media_row = media_by_key.get(&key);
            let lines_row = lines_by_key.get(&key);
            let wp_row = wp_by_key.get(&key);

            let home_rank = ranks_by_team
                .get(&team_key(game, &game.home_team))
                .copied();
            let away_rank = ranks_by_team
                .get(&team_key(game, &game.away_team))
                .copied();

            let home_ranked = home_rank.is_some();
            let away_ranked = away_rank.is_some();

            MergedGame {
                id: game.id,
                season: game.season,
                week: game.week,
                season_type: game.season_type.clone(),
                start_date: game.start_date.clone(),
                neutral_site: game.neutral_site,
                conference_game: game.conference_game,
                home_team: game.home_team.clone(),
                home_classification: game.home_classification.clone(),
                home_conference: game.home_conference.clone(),
                home_points: game.home_points,
                away_team: game.away_team.clone(),
                away_classification: game.away_classification.clone(),
                away_conference: game.away_conference.clone(),
                away_points: game.away_points,
                media_type: media_row.and_then(|m| m.media_type.clone()),
                outlet: media_row.and_then(|m| m.outlet.clone()),
                lines: lines_row.map(|l| l.lines.clone()),
                home_win_probability: wp_row.and_then(|w| w.home_win_probability),
                home_rank,
                away_rank,
                home_ranked,
                away_ranked,
                ranked_team_count: home_ranked as u8 + away_ranked as u8,
                is_ranked_matchup: home_ranked && away_ranked,
            }
        })
        .collect()
}

fn team_key(game: &Game, team: &str) -> TeamWeekKey {
    TeamWeekKey {
        season: game.season,
        week: game.week,
        season_type: game.season_type.clone(),
        team: team.to_string(),
    }
}

// The index builders keep the first row seen per key. Duplicate enrichment
// rows would otherwise fan the join out and duplicate game rows.

fn index_media(media: &[GameMedia]) -> HashMap<GameKey, &GameMedia> {
    let mut map = HashMap::new();
    for row in media {
        map.entry(GameKey {
            season: row.season,
            week: row.week,
            season_type: row.season_type.clone(),
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
        })
        .or_insert(row);
    }
    map
}

fn index_lines(lines: &[LineRecord]) -> HashMap<GameKey, &LineRecord> {
    let mut map = HashMap::new();
    for row in lines {
        map.entry(GameKey {
            season: row.season,
            week: row.week,
            season_type: row.season_type.clone(),
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
        })
        .or_insert(row);
    }
    map
}

fn index_win_probabilities(
    wp: &[PregameWinProbability],
) -> HashMap<GameKey, &PregameWinProbability> {
    let mut map = HashMap::new();
    for row in wp {
        map.entry(GameKey {
            season: row.season,
            week: row.week,
            season_type: row.season_type.clone(),
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
        })
        .or_insert(row);
    }
    map
}

fn index_rankings(rankings: &[FlatRanking]) -> HashMap<TeamWeekKey, i32> {
    let mut map = HashMap::new();
    for row in rankings {
        map.entry(TeamWeekKey {
            season: row.season,
            week: row.week,
            season_type: row.season_type.clone(),
            team: row.school.clone(),
        })
        .or_insert(row.rank);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(season: i32, week: i32, home: &str, away: &str) -> Game {
        Game {
            id: 1,
            season,
            week,
            season_type: "regular".to_string(),
            start_date: None,
            neutral_site: None,
            conference_game: None,
            home_team: home.to_string(),
            home_classification: Some("fbs".to_string()),
            home_conference: None,
            home_points: None,
            away_team: away.to_string(),
            away_classification: Some("fbs".to_string()),
            away_conference: None,
            away_points: None,
        }
    }

    fn ranking(season: i32, week: i32, school: &str, rank: i32) -> FlatRanking {
        FlatRanking {
            season,
            week,
            season_type: "regular".to_string(),
            poll: "AP Top 25".to_string(),
            school: school.to_string(),
            rank,
        }
    }

    #[test]
    fn test_merge_preserves_every_game_row() {
        let games = vec![game(2020, 1, "A", "B"), game(2020, 2, "C", "D")];
        let merged = merge(&games, &[], &[], &[], &[]);
        assert_eq!(merged.len(), games.len());
        assert!(merged.iter().all(|m| m.media_type.is_none()
            && m.lines.is_none()
            && m.home_win_probability.is_none()
            && m.home_rank.is_none()
            && m.away_rank.is_none()));
    }

    #[test]
    fn test_merge_end_to_end_scenario() {
        // Synthetic scenario: 2020 week 5 regular, A vs B, A ranked 10.
        let games = vec![game(2020, 5, "A", "B")];
        let rankings = vec![ranking(2020, 5, "A", 10)];

        let merged = merge(&games, &[], &[], &[], &rankings);
        assert_eq!(merged.len(), 1);
        let row = &merged[0];
        assert_eq!(row.home_rank, Some(10));
        assert!(row.home_ranked);
        assert_eq!(row.away_rank, None);
        assert!(!row.away_ranked);
        assert_eq!(row.ranked_team_count, 1);
        assert!(!row.is_ranked_matchup);
    }

    #[test]
    fn test_merge_ranked_matchup_flags() {
        let games = vec![game(2020, 5, "A", "B")];
        let rankings = vec![ranking(2020, 5, "A", 3), ranking(2020, 5, "B", 7)];

        let merged = merge(&games, &[], &[], &[], &rankings);
        let row = &merged[0];
        assert_eq!(row.home_rank, Some(3));
        assert_eq!(row.away_rank, Some(7));
        assert_eq!(row.ranked_team_count, 2);
        assert!(row.is_ranked_matchup);
    }

    #[test]
    fn test_merge_attaches_media_lines_and_win_probability() {
        let games = vec![game(2020, 5, "A", "B")];
        let media = vec![GameMedia {
            id: 1,
            season: 2020,
            week: 5,
            season_type: "regular".to_string(),
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            media_type: Some("tv".to_string()),
            outlet: Some("ESPN".to_string()),
        }];
        let lines = vec![LineRecord {
            id: 1,
            season: 2020,
            week: 5,
            season_type: "regular".to_string(),
            home_team: "A".to_string(),
            home_score: None,
            away_team: "B".to_string(),
            away_score: None,
            lines: r#"[{"provider":"consensus","spread":-3.5}]"#.to_string(),
        }];
        let wp = vec![PregameWinProbability {
            game_id: Some(1),
            season: 2020,
            week: 5,
            season_type: "regular".to_string(),
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            team: None,
            spread: None,
            home_win_probability: Some(0.81),
        }];

        let merged = merge(&games, &media, &lines, &wp, &[]);
        let row = &merged[0];
        assert_eq!(row.media_type.as_deref(), Some("tv"));
        assert_eq!(row.outlet.as_deref(), Some("ESPN"));
        assert!(row.lines.as_deref().unwrap().contains("consensus"));
        assert_eq!(row.home_win_probability, Some(0.81));
    }

    #[test]
    fn test_merge_key_mismatch_yields_nulls() {
        // Same teams, different week: no enrichment should attach.
        let games = vec![game(2020, 6, "A", "B")];
        let rankings = vec![ranking(2020, 5, "A", 10)];

        let merged = merge(&games, &[], &[], &[], &rankings);
        assert_eq!(merged[0].home_rank, None);
        assert_eq!(merged[0].ranked_team_count, 0);
    }

    #[test]
    fn test_duplicate_enrichment_rows_do_not_fan_out() {
        let games = vec![game(2020, 5, "A", "B")];
        // Duplicate poll entries for the same team and week; keep-first wins.
        let rankings = vec![ranking(2020, 5, "A", 10), ranking(2020, 5, "A", 12)];

        let merged = merge(&games, &[], &[], &[], &rankings);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].home_rank, Some(10));
    }
}
