use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use palpiteiro::config::lotteries::LotteryId;
use palpiteiro::engine::{FailoverOutcome, SourceFailover};
use palpiteiro::network::errors::FetchError;
use palpiteiro::network::fetcher::{AsyncFetch, PageFetcher};

// * Scripted fetcher: serves canned bodies, fails every unknown URL, and
// * logs each attempt so the short-circuit property can be asserted.
struct ScriptedFetcher {
    pages: HashMap<String, String>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFetcher {
    fn serving(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(u, b)| (u.to_string(), b.to_string()))
                .collect(),
            hits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PageFetcher for ScriptedFetcher {
    fn fetch(&self, url: &str) -> AsyncFetch {
        self.hits.lock().unwrap().push(url.to_string());
        let result = self
            .pages
            .get(url)
            .cloned()
            .ok_or(FetchError::HardBan(503));
        Box::pin(async move { result })
    }
}

fn target_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
}

const FEDERAL_PAGE: &str = r#"
    <h1>Resultado federal de hoje</h1>
    <table>
        <thead><tr><th>Premio</th><th>Milhar</th></tr></thead>
        <tbody>
            <tr><td>1º</td><td>4312</td></tr>
            <tr><td>2º</td><td>0556</td></tr>
            <tr><td>3º</td><td>7890</td></tr>
            <tr><td>4º</td><td>1122</td></tr>
            <tr><td>5º</td><td>3344</td></tr>
        </tbody>
    </table>
"#;

#[tokio::test]
async fn test_failover_short_circuits_on_first_success() {
    let source = LotteryId::Federal.source();
    let fetcher = ScriptedFetcher::serving(&[(source.backup_urls[0], FEDERAL_PAGE)]);
    let hits = fetcher.hits.clone();

    let outcome = SourceFailover::new(fetcher)
        .resolve(LotteryId::Federal, target_date())
        .await;

    let draw = match outcome {
        FailoverOutcome::Succeeded { draw, attempts } => {
            assert_eq!(attempts, 2);
            draw
        }
        other => panic!("expected success, got {:?}", other),
    };

    // * Primary failed, first backup won; the second backup is never tried
    let attempted = hits.lock().unwrap().clone();
    assert_eq!(
        attempted,
        vec![
            source.primary_url.to_string(),
            source.backup_urls[0].to_string()
        ]
    );
    assert_eq!(draw.source_url, source.backup_urls[0]);
    assert_eq!(draw.lottery_id, LotteryId::Federal);
}

#[tokio::test]
async fn test_exhausted_is_distinct_and_carries_last_error() {
    let fetcher = ScriptedFetcher::serving(&[]);
    let source = LotteryId::Federal.source();
    let chain_len = 1 + source.backup_urls.len();

    let outcome = SourceFailover::new(fetcher)
        .resolve(LotteryId::Federal, target_date())
        .await;

    match outcome {
        FailoverOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, chain_len);
            // * Diagnostics point at the last URL in the chain
            assert!(last_error.contains(source.backup_urls[source.backup_urls.len() - 1]));
        }
        other => panic!("expected exhaustion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reextraction_of_same_document_is_byte_identical() {
    let source = LotteryId::Federal.source();

    let mut draws = Vec::new();
    for _ in 0..2 {
        let fetcher = ScriptedFetcher::serving(&[(source.primary_url, FEDERAL_PAGE)]);
        let outcome = SourceFailover::new(fetcher)
            .resolve(LotteryId::Federal, target_date())
            .await;
        match outcome {
            FailoverOutcome::Succeeded { draw, .. } => draws.push(draw),
            other => panic!("expected success, got {:?}", other),
        }
    }

    assert_eq!(draws[0], draws[1]);
    assert_eq!(
        serde_json::to_vec(&draws[0]).unwrap(),
        serde_json::to_vec(&draws[1]).unwrap()
    );
}
