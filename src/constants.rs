//! Application-wide constants and configuration values
//!
//! This module centralizes endpoint paths, default pipeline parameters and
//! other magic values so they are defined in exactly one place.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Default API domain for the CollegeFootballData API
pub const DEFAULT_API_DOMAIN: &str = "https://api.collegefootballdata.com";

/// First season pulled by default (inclusive)
pub const DEFAULT_START_YEAR: i32 = 2010;

/// Last season pulled by default (inclusive)
pub const DEFAULT_END_YEAR: i32 = 2024;

/// Default directory for CSV output, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Classification tag identifying top-division (FBS) teams
pub const FBS_CLASSIFICATION: &str = "fbs";

/// The single poll used for ranking enrichment in the merged table
pub const AP_POLL: &str = "AP Top 25";

/// File name of the final merged weekly game table
pub const MERGED_FILE_NAME: &str = "merged_weekly_games_with_rankings.csv";

/// API endpoint paths, relative to the API domain
pub mod endpoints {
    /// Game schedule and results
    pub const GAMES: &str = "/games";

    /// Team roster with division classification
    pub const TEAMS: &str = "/teams";

    /// SP+ composite ratings
    pub const SP_RATINGS: &str = "/ratings/sp";

    /// Elo ratings
    pub const ELO_RATINGS: &str = "/ratings/elo";

    /// Pregame win probabilities
    pub const WIN_PROBABILITIES: &str = "/metrics/wp/pregame";

    /// Betting lines
    pub const LINES: &str = "/lines";

    /// Weekly poll rankings
    pub const RANKINGS: &str = "/rankings";

    /// Broadcast / media information per game
    pub const MEDIA: &str = "/games/media";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable holding the API bearer token
    pub const API_KEY: &str = "CFBD_API_KEY";

    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "CFBD_API_DOMAIN";

    /// Environment variable for data directory override
    pub const DATA_DIR: &str = "CFBD_DATA_DIR";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "CFBD_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "CFBD_HTTP_TIMEOUT";
}
