//! The ETL pipeline: season collection, CSV persistence, rankings
//! flattening and the final merge.

pub mod collect;
pub mod merge;
pub mod rankings;
pub mod store;

pub use collect::{CollectedData, collect_seasons, fetch_fbs_teams};
pub use merge::{MergedGame, merge};
pub use rankings::{FlatRanking, ap_top25, flatten_rankings};
