//! Pipeline orchestration: the fetch phase (season loop + CSV output) and
//! the merge phase (flatten rankings, left-join, write the merged table).

use std::path::Path;
use tracing::info;

use crate::cli::Args;
use crate::config::Config;
use crate::constants::MERGED_FILE_NAME;
use crate::data_fetcher::CfbdClient;
use crate::data_fetcher::models::{Game, GameMedia, PregameWinProbability};
use crate::error::AppError;
use crate::pipeline::store::{self, LineRecord, RankingRecord};
use crate::pipeline::{ap_top25, collect_seasons, fetch_fbs_teams, flatten_rankings, merge};

/// Runs the pipeline according to the parsed arguments. Both phases run by
/// default; --fetch-only and --merge-only select one.
pub async fn run(args: &Args, config: &Config) -> Result<(), AppError> {
    let data_dir_string = args
        .data_dir
        .clone()
        .unwrap_or_else(|| config.resolved_data_dir());
    let data_dir = Path::new(&data_dir_string);

    if !args.merge_only {
        run_fetch_phase(config, data_dir, args.start_year, args.end_year).await?;
    }

    if !args.fetch_only {
        run_merge_phase(data_dir, args.start_year, args.end_year)?;
    }

    Ok(())
}

/// Fetch phase: resolve the top-division team set once, run the season loop
/// and persist one CSV per dataset kind.
pub async fn run_fetch_phase(
    config: &Config,
    data_dir: &Path,
    start_year: i32,
    end_year: i32,
) -> Result<(), AppError> {
    let client = CfbdClient::new(config)?;

    // Without the team set no filtering is possible, so this one propagates.
    let fbs_teams = fetch_fbs_teams(&client).await?;

    let data = collect_seasons(&client, &fbs_teams, start_year, end_year).await;
    info!(
        "Collected {} games, {} sp, {} elo, {} wp, {} lines, {} ranking weeks, {} media rows",
        data.games.len(),
        data.sp.len(),
        data.elo.len(),
        data.wp.len(),
        data.lines.len(),
        data.rankings.len(),
        data.media.len()
    );

    store::write_datasets(&data, data_dir, start_year, end_year)
}

/// Merge phase: read the persisted CSVs back, flatten and restrict the
/// rankings, left-join everything onto games and write the merged table.
pub fn run_merge_phase(data_dir: &Path, start_year: i32, end_year: i32) -> Result<(), AppError> {
    let games: Vec<Game> =
        store::read_csv(&store::dataset_path(data_dir, "games", start_year, end_year))?;
    let media: Vec<GameMedia> =
        store::read_csv_or_empty(&store::dataset_path(data_dir, "media", start_year, end_year))?;
    let lines: Vec<LineRecord> =
        store::read_csv_or_empty(&store::dataset_path(data_dir, "lines", start_year, end_year))?;
    let wp: Vec<PregameWinProbability> =
        store::read_csv_or_empty(&store::dataset_path(data_dir, "wp", start_year, end_year))?;
    let ranking_records: Vec<RankingRecord> = store::read_csv_or_empty(&store::dataset_path(
        data_dir, "rankings", start_year, end_year,
    ))?;

    let flat = flatten_rankings(&ranking_records);
    let ap = ap_top25(flat);
    info!(
        "Flattened rankings down to {} AP Top 25 rows from {} ranking weeks",
        ap.len(),
        ranking_records.len()
    );

    let merged = merge(&games, &media, &lines, &wp, &ap);

    let out_path = data_dir.join(MERGED_FILE_NAME);
    store::write_csv(&merged, &out_path)?;
    info!("Saved {} merged rows to {}", merged.len(), out_path.display());

    Ok(())
}
