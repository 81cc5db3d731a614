//! CSV persistence for the collected datasets.
//!
//! Each dataset kind goes to `{kind}_{start}_{end}.csv` under the data
//! directory. Nested structures (betting lines, poll bundles) are stored as
//! one JSON-string column with a strict serde schema, so the merge phase can
//! re-parse them without a lossy text format.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::data_fetcher::models::{BettingLine, RankingWeek};
use crate::error::AppError;
use crate::pipeline::collect::CollectedData;

/// CSV row for a betting-lines entry; the provider lines ride along as a
/// JSON column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: i64,
    pub season: i32,
    pub week: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "homeScore")]
    pub home_score: Option<i32>,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "awayScore")]
    pub away_score: Option<i32>,
    pub lines: String,
}

impl LineRecord {
    fn from_line(line: &BettingLine) -> Result<Self, AppError> {
        Ok(LineRecord {
            id: line.id,
            season: line.season,
            week: line.week,
            season_type: line.season_type.clone(),
            home_team: line.home_team.clone(),
            home_score: line.home_score,
            away_team: line.away_team.clone(),
            away_score: line.away_score,
            lines: serde_json::to_string(&line.lines)?,
        })
    }
}

/// CSV row for a rankings week; the poll bundle rides along as a JSON column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRecord {
    pub season: i32,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    pub week: i32,
    pub polls: String,
}

impl RankingRecord {
    fn from_week(week: &RankingWeek) -> Result<Self, AppError> {
        Ok(RankingRecord {
            season: week.season,
            season_type: week.season_type.clone(),
            week: week.week,
            polls: serde_json::to_string(&week.polls)?,
        })
    }
}

/// Builds the output path for a dataset kind over a year range.
pub fn dataset_path(dir: &Path, kind: &str, start_year: i32, end_year: i32) -> PathBuf {
    dir.join(format!("{kind}_{start_year}_{end_year}.csv"))
}

/// Writes every collected dataset kind to its own CSV. Kinds with zero rows
/// are skipped with a diagnostic instead of producing an empty file.
pub fn write_datasets(
    data: &CollectedData,
    dir: &Path,
    start_year: i32,
    end_year: i32,
) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)?;

    write_kind(&data.games, dir, "games", start_year, end_year)?;
    write_kind(&data.sp, dir, "sp", start_year, end_year)?;
    write_kind(&data.elo, dir, "elo", start_year, end_year)?;
    write_kind(&data.wp, dir, "wp", start_year, end_year)?;

    let line_records = data
        .lines
        .iter()
        .map(LineRecord::from_line)
        .collect::<Result<Vec<_>, _>>()?;
    write_kind(&line_records, dir, "lines", start_year, end_year)?;

    let ranking_records = data
        .rankings
        .iter()
        .map(RankingRecord::from_week)
        .collect::<Result<Vec<_>, _>>()?;
    write_kind(&ranking_records, dir, "rankings", start_year, end_year)?;

    write_kind(&data.media, dir, "media", start_year, end_year)?;

    Ok(())
}

fn write_kind<T: Serialize>(
    rows: &[T],
    dir: &Path,
    kind: &str,
    start_year: i32,
    end_year: i32,
) -> Result<(), AppError> {
    if rows.is_empty() {
        warn!("No data collected for {kind}");
        return Ok(());
    }
    let path = dataset_path(dir, kind, start_year, end_year);
    write_csv(rows, &path)?;
    info!("Saved {} {kind} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Writes rows to a CSV file with a header derived from the serde field
/// names.
pub fn write_csv<T: Serialize>(rows: &[T], path: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a whole CSV file into typed rows. A missing file is a
/// `DatasetMissing` error so the merge phase can report which fetch output
/// it needed.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    if !path.exists() {
        return Err(AppError::dataset_missing(path.display().to_string()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Reads an enrichment CSV, degrading a missing file to zero rows with a
/// diagnostic. The merged table then simply carries nulls for that source.
pub fn read_csv_or_empty<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    match read_csv(path) {
        Ok(rows) => Ok(rows),
        Err(AppError::DatasetMissing { path }) => {
            warn!("Enrichment dataset missing, merged columns stay empty: {path}");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{Game, LineProvider};
    use tempfile::tempdir;

    fn sample_game() -> Game {
        Game {
            id: 7,
            season: 2020,
            week: 5,
            season_type: "regular".to_string(),
            start_date: Some("2020-10-03T19:30:00.000Z".to_string()),
            neutral_site: Some(false),
            conference_game: Some(true),
            home_team: "A".to_string(),
            home_classification: Some("fbs".to_string()),
            home_conference: Some("SEC".to_string()),
            home_points: Some(41),
            away_team: "B".to_string(),
            away_classification: None,
            away_conference: None,
            away_points: None,
        }
    }

    #[test]
    fn test_game_csv_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("games.csv");

        let games = vec![sample_game()];
        write_csv(&games, &path).unwrap();

        let read: Vec<Game> = read_csv(&path).unwrap();
        assert_eq!(read, games);
    }

    #[test]
    fn test_line_record_serializes_providers_as_json() {
        let line = BettingLine {
            id: 9,
            season: 2020,
            week: 5,
            season_type: "regular".to_string(),
            home_team: "A".to_string(),
            home_score: None,
            away_team: "B".to_string(),
            away_score: None,
            lines: vec![LineProvider {
                provider: "consensus".to_string(),
                spread: Some(-3.5),
                formatted_spread: None,
                over_under: Some(51.0),
                home_moneyline: None,
                away_moneyline: None,
            }],
        };

        let record = LineRecord::from_line(&line).unwrap();
        let parsed: Vec<LineProvider> = serde_json::from_str(&record.lines).unwrap();
        assert_eq!(parsed, line.lines);
    }

    #[test]
    fn test_read_csv_missing_file_is_dataset_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = read_csv::<Game>(&path).unwrap_err();
        assert!(matches!(err, AppError::DatasetMissing { .. }));

        let rows: Vec<Game> = read_csv_or_empty(&path).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_write_datasets_skips_empty_kinds() {
        let dir = tempdir().unwrap();
        let mut data = CollectedData::default();
        data.games.push(sample_game());

        write_datasets(&data, dir.path(), 2020, 2020).unwrap();

        assert!(dataset_path(dir.path(), "games", 2020, 2020).exists());
        assert!(!dataset_path(dir.path(), "sp", 2020, 2020).exists());
        assert!(!dataset_path(dir.path(), "rankings", 2020, 2020).exists());
    }
}
