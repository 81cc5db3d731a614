use cfbd_pipeline::data_fetcher::models::{Poll, PollRank, RankingWeek};
use cfbd_pipeline::pipeline::collect::CollectedData;
use cfbd_pipeline::pipeline::store::{RankingRecord, dataset_path, read_csv, write_datasets};
use cfbd_pipeline::pipeline::{ap_top25, flatten_rankings};
use tempfile::tempdir;

fn rank(school: &str, rank: i32) -> PollRank {
    PollRank {
        rank,
        school: school.to_string(),
        conference: None,
        first_place_votes: None,
        points: None,
    }
}

fn ranking_week(season: i32, week: i32, polls: Vec<Poll>) -> RankingWeek {
    RankingWeek {
        season,
        season_type: "regular".to_string(),
        week,
        polls,
    }
}

/// The polls column survives the CSV write/read cycle and flattens to one
/// row per rank entry, summed over all polls in every ranking week.
#[tokio::test]
async fn test_flattening_count_through_persisted_csv() {
    let mut data = CollectedData::default();
    data.rankings = vec![
        ranking_week(
            2020,
            5,
            vec![
                Poll {
                    poll: "AP Top 25".to_string(),
                    ranks: vec![rank("A", 1), rank("B", 2), rank("C", 3)],
                },
                Poll {
                    poll: "Coaches Poll".to_string(),
                    ranks: vec![rank("A", 1), rank("B", 2)],
                },
            ],
        ),
        ranking_week(
            2021,
            1,
            vec![Poll {
                poll: "AP Top 25".to_string(),
                ranks: vec![rank("D", 1)],
            }],
        ),
    ];

    let expected_total: usize = data
        .rankings
        .iter()
        .flat_map(|w| w.polls.iter())
        .map(|p| p.ranks.len())
        .sum();

    let dir = tempdir().unwrap();
    write_datasets(&data, dir.path(), 2020, 2021).unwrap();

    let records: Vec<RankingRecord> =
        read_csv(&dataset_path(dir.path(), "rankings", 2020, 2021)).unwrap();
    assert_eq!(records.len(), 2);

    let flat = flatten_rankings(&records);
    assert_eq!(flat.len(), expected_total);

    // Season/week/seasonType carry over from the source rows
    assert!(flat.iter().all(|r| r.season_type == "regular"));
    assert!(
        flat.iter()
            .filter(|r| r.season == 2021)
            .all(|r| r.week == 1 && r.school == "D")
    );

    // Restricting to the designated poll drops the Coaches Poll rows
    let ap = ap_top25(flat);
    assert_eq!(ap.len(), 4);
    assert!(ap.iter().all(|r| r.poll == "AP Top 25"));
}
