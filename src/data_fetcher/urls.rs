//! URL building utilities for API endpoints

use crate::constants::endpoints;

/// Builds the games URL for a season. `seasonType=both` pulls regular season
/// and postseason in one call.
///
/// # Example
/// ```
/// use cfbd_pipeline::data_fetcher::urls::build_games_url;
///
/// let url = build_games_url("https://api.example.com", 2020);
/// assert_eq!(url, "https://api.example.com/games?year=2020&seasonType=both");
/// ```
pub fn build_games_url(api_domain: &str, year: i32) -> String {
    format!("{api_domain}{}?year={year}&seasonType=both", endpoints::GAMES)
}

/// Builds the roster URL. Takes no query parameters; the classification
/// filter is applied client-side.
///
/// # Example
/// ```
/// use cfbd_pipeline::data_fetcher::urls::build_teams_url;
///
/// let url = build_teams_url("https://api.example.com");
/// assert_eq!(url, "https://api.example.com/teams");
/// ```
pub fn build_teams_url(api_domain: &str) -> String {
    format!("{api_domain}{}", endpoints::TEAMS)
}

/// Builds the SP+ ratings URL for a season.
pub fn build_sp_ratings_url(api_domain: &str, year: i32) -> String {
    format!("{api_domain}{}?year={year}", endpoints::SP_RATINGS)
}

/// Builds the Elo ratings URL for a season.
pub fn build_elo_ratings_url(api_domain: &str, year: i32) -> String {
    format!("{api_domain}{}?year={year}", endpoints::ELO_RATINGS)
}

/// Builds the pregame win probability URL for a season.
pub fn build_win_probabilities_url(api_domain: &str, year: i32) -> String {
    format!("{api_domain}{}?year={year}", endpoints::WIN_PROBABILITIES)
}

/// Builds the betting lines URL for a season.
pub fn build_lines_url(api_domain: &str, year: i32) -> String {
    format!("{api_domain}{}?year={year}", endpoints::LINES)
}

/// Builds the poll rankings URL for a season.
pub fn build_rankings_url(api_domain: &str, year: i32) -> String {
    format!("{api_domain}{}?year={year}", endpoints::RANKINGS)
}

/// Builds the broadcast/media URL for a season.
pub fn build_media_url(api_domain: &str, year: i32) -> String {
    format!("{api_domain}{}?year={year}", endpoints::MEDIA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_parameterized_urls() {
        let domain = "https://api.collegefootballdata.com";
        assert_eq!(
            build_sp_ratings_url(domain, 2015),
            "https://api.collegefootballdata.com/ratings/sp?year=2015"
        );
        assert_eq!(
            build_elo_ratings_url(domain, 2015),
            "https://api.collegefootballdata.com/ratings/elo?year=2015"
        );
        assert_eq!(
            build_win_probabilities_url(domain, 2015),
            "https://api.collegefootballdata.com/metrics/wp/pregame?year=2015"
        );
        assert_eq!(
            build_lines_url(domain, 2015),
            "https://api.collegefootballdata.com/lines?year=2015"
        );
        assert_eq!(
            build_rankings_url(domain, 2015),
            "https://api.collegefootballdata.com/rankings?year=2015"
        );
        assert_eq!(
            build_media_url(domain, 2015),
            "https://api.collegefootballdata.com/games/media?year=2015"
        );
    }

    #[test]
    fn test_games_url_pulls_both_season_types() {
        let url = build_games_url("https://api.example.com", 2010);
        assert!(url.contains("seasonType=both"));
        assert!(url.contains("year=2010"));
    }
}
