use serde::{Deserialize, Serialize};

/// One game row from the /games endpoint.
///
/// Classification fields are optional because older seasons and lower-tier
/// games sometimes omit them; an absent classification never matches the
/// top-division tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    /// Overwritten with the season-loop year before rows are pooled.
    #[serde(default)]
    pub season: i32,
    pub week: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "neutralSite", default)]
    pub neutral_site: Option<bool>,
    #[serde(rename = "conferenceGame", default)]
    pub conference_game: Option<bool>,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "homeClassification", default)]
    pub home_classification: Option<String>,
    #[serde(rename = "homeConference", default)]
    pub home_conference: Option<String>,
    #[serde(rename = "homePoints", default)]
    pub home_points: Option<i32>,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "awayClassification", default)]
    pub away_classification: Option<String>,
    #[serde(rename = "awayConference", default)]
    pub away_conference: Option<String>,
    #[serde(rename = "awayPoints", default)]
    pub away_points: Option<i32>,
}

/// One team row from the /teams roster endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub school: String,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
}

/// One SP+ composite rating row from /ratings/sp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpRating {
    pub team: String,
    #[serde(default)]
    pub conference: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub ranking: Option<i32>,
    /// Tagged by the season loop, not present in the API response.
    #[serde(default)]
    pub season: i32,
}

/// One Elo rating row from /ratings/elo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EloRating {
    pub team: String,
    #[serde(default)]
    pub conference: Option<String>,
    pub elo: f64,
    /// Tagged by the season loop.
    #[serde(default)]
    pub season: i32,
}

/// One pregame win probability row from /metrics/wp/pregame.
///
/// The `team` column only appears in some responses; when present it is used
/// for top-division filtering, when absent the row passes through unfiltered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PregameWinProbability {
    #[serde(rename = "gameId", default)]
    pub game_id: Option<i64>,
    #[serde(default)]
    pub season: i32,
    pub week: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub spread: Option<f64>,
    #[serde(rename = "homeWinProbability", default)]
    pub home_win_probability: Option<f64>,
}

/// One betting-lines row from /lines. The nested provider lines are carried
/// natively here and serialized as a JSON column when persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingLine {
    pub id: i64,
    #[serde(default)]
    pub season: i32,
    pub week: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "homeScore", default)]
    pub home_score: Option<i32>,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "awayScore", default)]
    pub away_score: Option<i32>,
    #[serde(default)]
    pub lines: Vec<LineProvider>,
}

/// One provider entry inside a betting-lines row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProvider {
    pub provider: String,
    #[serde(default)]
    pub spread: Option<f64>,
    #[serde(rename = "formattedSpread", default)]
    pub formatted_spread: Option<String>,
    #[serde(rename = "overUnder", default)]
    pub over_under: Option<f64>,
    #[serde(rename = "homeMoneyline", default)]
    pub home_moneyline: Option<i32>,
    #[serde(rename = "awayMoneyline", default)]
    pub away_moneyline: Option<i32>,
}

/// One rankings row from /rankings: a season week with its bundle of polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingWeek {
    #[serde(default)]
    pub season: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    pub week: i32,
    #[serde(default)]
    pub polls: Vec<Poll>,
}

/// A named poll with its rank entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub poll: String,
    #[serde(default)]
    pub ranks: Vec<PollRank>,
}

/// One rank entry within a poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollRank {
    pub rank: i32,
    pub school: String,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(rename = "firstPlaceVotes", default)]
    pub first_place_votes: Option<i32>,
    #[serde(default)]
    pub points: Option<i32>,
}

/// One broadcast/media row from /games/media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMedia {
    pub id: i64,
    #[serde(default)]
    pub season: i32,
    pub week: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub outlet: Option<String>,
}
