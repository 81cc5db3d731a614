//! HTTP client for the CollegeFootballData API.
//!
//! One typed fetch path for every endpoint: build the URL, issue a GET with
//! the bearer token, map non-success statuses to specific error variants and
//! parse the body into the endpoint's model list. There is deliberately no
//! retry, caching or rate-limit handling; the season loop decides what to do
//! with a failed fetch.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::constants;
use crate::data_fetcher::models::{
    BettingLine, EloRating, Game, GameMedia, PregameWinProbability, RankingWeek, SpRating, Team,
};
use crate::data_fetcher::urls;
use crate::error::AppError;

/// Creates a properly configured HTTP client with connection pooling and
/// timeout handling.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Typed client for the CollegeFootballData API.
#[derive(Debug, Clone)]
pub struct CfbdClient {
    client: Client,
    api_domain: String,
    api_key: Option<String>,
}

impl CfbdClient {
    /// Builds a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)
            .map_err(AppError::ApiFetch)?;
        Ok(CfbdClient {
            client,
            api_domain: config.api_domain.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// The API domain this client talks to.
    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    /// Generic fetch returning the parsed JSON array for an endpoint.
    ///
    /// Non-success statuses become specific error variants so callers can
    /// tell "request failed" apart from "no data for this query" (an empty
    /// array with status 200).
    #[instrument(skip(self))]
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, AppError> {
        info!("Fetching data from URL: {url}");

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Request failed for URL {}: {}", url, e);
                return if e.is_timeout() {
                    Err(AppError::network_timeout(url))
                } else if e.is_connect() {
                    Err(AppError::network_connection(url, e.to_string()))
                } else {
                    Err(AppError::ApiFetch(e))
                };
            }
        };

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let status_code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("Unknown error");

            error!("HTTP {} - {} (URL: {})", status_code, reason, url);

            return Err(match status_code {
                404 => AppError::api_not_found(url),
                429 => AppError::api_rate_limit(reason, url),
                400..=499 => AppError::api_client_error(status_code, reason, url),
                500..=599 => {
                    if status_code == 502 || status_code == 503 {
                        AppError::api_service_unavailable(status_code, reason, url)
                    } else {
                        AppError::api_server_error(status_code, reason, url)
                    }
                }
                _ => AppError::api_server_error(status_code, reason, url),
            });
        }

        let response_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read response text from URL {}: {}", url, e);
                return Err(AppError::ApiFetch(e));
            }
        };

        debug!("Response length: {} bytes", response_text.len());

        match serde_json::from_str::<Vec<T>>(&response_text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                error!("Failed to parse API response: {} (URL: {})", e, url);
                if response_text.trim().is_empty() {
                    Err(AppError::api_no_data("Response body is empty", url))
                } else if !response_text.trim_start().starts_with('{')
                    && !response_text.trim_start().starts_with('[')
                {
                    Err(AppError::api_malformed_json(
                        "Response is not valid JSON",
                        url,
                    ))
                } else {
                    Err(AppError::api_unexpected_structure(e.to_string(), url))
                }
            }
        }
    }

    /// Fetches the full team roster (no query parameters).
    pub async fn fetch_teams(&self) -> Result<Vec<Team>, AppError> {
        self.fetch(&urls::build_teams_url(&self.api_domain)).await
    }

    /// Fetches games for a season, regular season and postseason together.
    pub async fn fetch_games(&self, year: i32) -> Result<Vec<Game>, AppError> {
        self.fetch(&urls::build_games_url(&self.api_domain, year))
            .await
    }

    /// Fetches SP+ composite ratings for a season.
    pub async fn fetch_sp_ratings(&self, year: i32) -> Result<Vec<SpRating>, AppError> {
        self.fetch(&urls::build_sp_ratings_url(&self.api_domain, year))
            .await
    }

    /// Fetches Elo ratings for a season.
    pub async fn fetch_elo_ratings(&self, year: i32) -> Result<Vec<EloRating>, AppError> {
        self.fetch(&urls::build_elo_ratings_url(&self.api_domain, year))
            .await
    }

    /// Fetches pregame win probabilities for a season.
    pub async fn fetch_win_probabilities(
        &self,
        year: i32,
    ) -> Result<Vec<PregameWinProbability>, AppError> {
        self.fetch(&urls::build_win_probabilities_url(&self.api_domain, year))
            .await
    }

    /// Fetches betting lines for a season.
    pub async fn fetch_lines(&self, year: i32) -> Result<Vec<BettingLine>, AppError> {
        self.fetch(&urls::build_lines_url(&self.api_domain, year))
            .await
    }

    /// Fetches weekly poll rankings for a season, nested polls included.
    pub async fn fetch_rankings(&self, year: i32) -> Result<Vec<RankingWeek>, AppError> {
        self.fetch(&urls::build_rankings_url(&self.api_domain, year))
            .await
    }

    /// Fetches broadcast/media info for a season.
    pub async fn fetch_media(&self, year: i32) -> Result<Vec<GameMedia>, AppError> {
        self.fetch(&urls::build_media_url(&self.api_domain, year))
            .await
    }
}
