//! College Football Data Pipeline Library
//!
//! This library pulls college-football statistics from the
//! CollegeFootballData API across seasons, filters everything to
//! top-division (FBS) teams, flattens the nested weekly poll rankings and
//! merges the datasets into one weekly game-level table.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cfbd_pipeline::config::Config;
//! use cfbd_pipeline::data_fetcher::CfbdClient;
//! use cfbd_pipeline::error::AppError;
//! use cfbd_pipeline::pipeline::{collect_seasons, fetch_fbs_teams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = CfbdClient::new(&config)?;
//!
//!     // The top-division team set is computed once and reused
//!     let fbs_teams = fetch_fbs_teams(&client).await?;
//!
//!     let data = collect_seasons(&client, &fbs_teams, 2020, 2021).await;
//!     println!("{} games collected", data.games.len());
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::CfbdClient;
pub use data_fetcher::models::{Game, GameMedia, PregameWinProbability, RankingWeek};
pub use error::AppError;
pub use pipeline::{CollectedData, FlatRanking, MergedGame};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
