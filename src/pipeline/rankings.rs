//! Rankings flattener: turns the persisted nested poll bundles into one flat
//! row per (season, week, seasonType, poll, school, rank).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::AP_POLL;
use crate::data_fetcher::models::Poll;
use crate::pipeline::store::RankingRecord;

/// One flattened ranking row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRanking {
    pub season: i32,
    pub week: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    pub poll: String,
    pub school: String,
    pub rank: i32,
}

/// Flattens persisted ranking rows. The polls column is parsed per row; a
/// malformed row is logged with its index and skipped, it never aborts the
/// batch.
pub fn flatten_rankings(records: &[RankingRecord]) -> Vec<FlatRanking> {
    let mut flat = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let polls: Vec<Poll> = match serde_json::from_str(&record.polls) {
            Ok(polls) => polls,
            Err(e) => {
                warn!("Skipping rankings row {index}: malformed polls column: {e}");
                continue;
            }
        };

        for poll in &polls {
            for entry in &poll.ranks {
                flat.push(FlatRanking {
                    season: record.season,
                    week: record.week,
                    season_type: record.season_type.clone(),
                    poll: poll.poll.clone(),
                    school: entry.school.clone(),
                    rank: entry.rank,
                });
            }
        }
    }

    flat
}

/// Restricts flattened rows to the AP Top 25 poll; all other polls are
/// discarded for merge purposes.
pub fn ap_top25(flat: Vec<FlatRanking>) -> Vec<FlatRanking> {
    flat.into_iter().filter(|r| r.poll == AP_POLL).collect()
}
