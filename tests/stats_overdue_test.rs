use chrono::NaiveDate;
use std::sync::Arc;

use palpiteiro::config::lotteries::LotteryId;
use palpiteiro::persistence::{DrawResult, DrawStore, MemoryDrawStore};
use palpiteiro::stats::{StalenessAnalyzer, Taxonomy};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

fn draw(d: u32, values: &[&str]) -> DrawResult {
    DrawResult::new(
        LotteryId::RioPtm,
        day(d),
        values.iter().map(|v| Some(v.to_string())).collect(),
        "https://example.com/r",
    )
}

#[tokio::test]
async fn test_rankings_reproduce_from_store_history_alone() {
    // * History = D1, D2, D3 with milhar 1234 only in D1
    let store = Arc::new(MemoryDrawStore::new());
    store.upsert(draw(1, &["1234", "0556"])).await.unwrap();
    store.upsert(draw(2, &["5678", "0556"])).await.unwrap();
    store.upsert(draw(3, &["9012", "0101"])).await.unwrap();

    let history = store.query_history(LotteryId::RioPtm).await.unwrap();
    let report = StalenessAnalyzer::rank(&history);

    let record = report.milhares.iter().find(|r| r.value == "1234").unwrap();
    assert_eq!(record.draws_since_last_seen, 2);
    assert_eq!(record.last_seen_date, Some(day(1)));

    // * 0556 repeated in D2: last seen index 1, so 3 - 1 - 1 = 1
    let repeated = report.milhares.iter().find(|r| r.value == "0556").unwrap();
    assert_eq!(repeated.draws_since_last_seen, 1);
    assert_eq!(repeated.last_seen_date, Some(day(2)));
}

#[test]
fn test_universe_sizes_hold_for_every_history() {
    let histories: Vec<Vec<DrawResult>> = vec![
        vec![],
        vec![draw(1, &["4312"])],
        (1..=25).map(|d| draw(d, &["4312", "0556", "7890"])).collect(),
    ];

    for history in histories {
        let report = StalenessAnalyzer::rank(&history);
        assert_eq!(report.dezenas.len(), 100);
        assert_eq!(report.centenas.len(), 1_000);
        assert_eq!(report.milhares.len(), 10_000);
        assert_eq!(report.animals.len(), 25);
    }
}

#[test]
fn test_empty_history_is_all_zero_and_never_seen() {
    let report = StalenessAnalyzer::rank(&[]);
    for taxonomy in [
        Taxonomy::Dezena,
        Taxonomy::Centena,
        Taxonomy::Milhar,
        Taxonomy::Animal,
    ] {
        assert!(report
            .records(taxonomy)
            .iter()
            .all(|r| r.draws_since_last_seen == 0 && r.last_seen_date.is_none()));
    }
}

#[test]
fn test_never_seen_staleness_is_monotonic_in_history_length() {
    let mut history = Vec::new();
    let mut previous = None;

    for d in 1..=10 {
        history.push(draw(d, &["4312"]));
        let staleness = StalenessAnalyzer::rank(&history)
            .milhares
            .iter()
            .find(|r| r.value == "9999")
            .unwrap()
            .draws_since_last_seen;

        if let Some(prev) = previous {
            assert_eq!(staleness, prev + 1, "must grow by exactly one per draw");
        }
        previous = Some(staleness);
    }
    assert_eq!(previous, Some(10));
}

#[test]
fn test_threshold_and_ranking_for_suggestions() {
    // * Ten draws, dezena 12 in every one, dezena 56 only in the first
    let history: Vec<DrawResult> = (1..=10)
        .map(|d| {
            if d == 1 {
                draw(d, &["4312", "0556"])
            } else {
                draw(d, &["4312", "0701"])
            }
        })
        .collect();

    let report = StalenessAnalyzer::rank(&history).at_least(5);

    // * 56 is nine draws stale and survives the threshold; 12 and 01 do not
    let values: Vec<&str> = report.dezenas.iter().map(|r| r.value.as_str()).collect();
    assert!(values.contains(&"56"));
    assert!(!values.contains(&"12"));
    assert!(!values.contains(&"01"));

    // * Never-seen dezenas outrank it at ten draws stale
    assert_eq!(report.dezenas[0].draws_since_last_seen, 10);
    let seen = report.dezenas.iter().find(|r| r.value == "56").unwrap();
    assert_eq!(seen.draws_since_last_seen, 9);
}
