// * Source failover: walks a lottery's configured URL chain, one attempt
// * per URL, until a fully populated draw comes back or the chain runs out.
// * Transport failures, empty extractions and partial extractions all look
// * the same to the chain: advance.

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::lotteries::LotteryId;
use crate::engine::normalizer::{self, NormalizeError};
use crate::extract::{FormatDetector, ResultExtractor};
use crate::network::errors::{FailureKind, FetchError};
use crate::network::fetcher::PageFetcher;
use crate::ops::telemetry;
use crate::persistence::schema::DrawResult;

/// States of one `(lottery, date)` resolution, in transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Pending,
    Trying(usize),
    Succeeded,
    Exhausted,
}

/// Terminal outcome of a resolution. `Exhausted` is an explicit "no result"
/// distinct from any single transport error; it carries the last failure
/// for diagnostics.
#[derive(Debug, Clone)]
pub enum FailoverOutcome {
    Succeeded {
        draw: DrawResult,
        attempts: usize,
    },
    Exhausted {
        attempts: usize,
        last_error: String,
    },
}

// * Why one attempt failed. Internal to the chain; every variant advances.
#[derive(Debug)]
enum AttemptFailure {
    Fetch(FetchError),
    Empty,
    Partial { populated: usize, expected: usize },
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::Fetch(e) => write!(f, "fetch failed: {e}"),
            AttemptFailure::Empty => write!(f, "no valid candidates extracted"),
            AttemptFailure::Partial {
                populated,
                expected,
            } => write!(f, "partial extraction: {populated} of {expected} positions"),
        }
    }
}

/// Drives fetch, detect, extract and normalize across one lottery's source
/// chain. Inherently serial per lottery: URL `i + 1` is only ever touched
/// after URL `i` failed, and the first success stops the chain.
pub struct SourceFailover<F> {
    fetcher: F,
    detector: FormatDetector,
    extractor: ResultExtractor,
}

impl<F: PageFetcher> SourceFailover<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            detector: FormatDetector::new(),
            extractor: ResultExtractor::new(),
        }
    }

    /// Resolves one `(lottery, date)` against the configured URL chain.
    pub async fn resolve(&self, lottery: LotteryId, date: NaiveDate) -> FailoverOutcome {
        let source = lottery.source();
        let urls: Vec<&str> = std::iter::once(source.primary_url)
            .chain(source.backup_urls.iter().copied())
            .collect();

        debug!(lottery = %lottery, state = ?SourceState::Pending, sources = urls.len(), "resolving");
        let mut last_error = String::from("no sources configured");

        for (i, url) in urls.iter().enumerate() {
            debug!(lottery = %lottery, state = ?SourceState::Trying(i), url, "trying source");

            match self.attempt(lottery, date, url).await {
                Ok(draw) => {
                    info!(
                        lottery = %lottery,
                        date = %date,
                        state = ?SourceState::Succeeded,
                        attempts = i + 1,
                        prizes = draw.populated_count(),
                        "source chain succeeded"
                    );
                    return FailoverOutcome::Succeeded {
                        draw,
                        attempts: i + 1,
                    };
                }
                Err(failure) => {
                    warn!(
                        lottery = %lottery,
                        attempt = i + 1,
                        url,
                        error = %failure,
                        "source attempt failed"
                    );
                    last_error = format!("{url}: {failure}");
                }
            }
        }

        warn!(
            lottery = %lottery,
            date = %date,
            state = ?SourceState::Exhausted,
            attempts = urls.len(),
            last_error = %last_error,
            "source chain exhausted"
        );
        FailoverOutcome::Exhausted {
            attempts: urls.len(),
            last_error,
        }
    }

    // * One URL, one attempt. Full population required: a document that
    // * fills only some positions counts as a failure for the chain.
    async fn attempt(
        &self,
        lottery: LotteryId,
        date: NaiveDate,
        url: &str,
    ) -> Result<DrawResult, AttemptFailure> {
        let started = Instant::now();
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => {
                telemetry::record_fetch_attempt("success", started.elapsed().as_secs_f64());
                body
            }
            Err(e) => {
                let outcome = match e.kind() {
                    FailureKind::Timeout => "timeout",
                    FailureKind::Transport => "transport",
                };
                telemetry::record_fetch_attempt(outcome, started.elapsed().as_secs_f64());
                return Err(AttemptFailure::Fetch(e));
            }
        };

        let guess = self.detector.detect(lottery, &body);
        debug!(
            lottery = %lottery,
            prizes = guess.expected_prize_count,
            width = guess.digit_width,
            confidence = guess.confidence,
            "format detected"
        );

        let slots = self.extractor.extract(&body, &guess);
        let draw = match normalizer::normalize(lottery, date, slots, &guess, url) {
            Ok(draw) => draw,
            Err(NormalizeError::Empty { .. }) => return Err(AttemptFailure::Empty),
        };

        if !draw.is_fully_populated() {
            return Err(AttemptFailure::Partial {
                populated: draw.populated_count(),
                expected: draw.prizes.len(),
            });
        }

        Ok(draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fetcher::AsyncFetch;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // * Scripted fetcher: url -> canned body, misses fail, every hit logged
    struct ScriptedFetcher {
        pages: HashMap<String, String>,
        hits: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
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

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
    }

    // * Five full federal rows, enough to satisfy the keyword format
    const FULL_PAGE: &str = r#"
        <h1>Resultado federal</h1>
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

    const PARTIAL_PAGE: &str = r#"
        <h1>Resultado federal parcial</h1>
        <table>
            <tbody>
                <tr><td>1º</td><td>4312</td></tr>
                <tr><td>2º</td><td>0556</td></tr>
            </tbody>
        </table>
    "#;

    #[tokio::test]
    async fn test_primary_success_stops_the_chain() {
        let source = LotteryId::Federal.source();
        let fetcher = ScriptedFetcher::new(&[(source.primary_url, FULL_PAGE)]);
        let hits = fetcher.hits.clone();

        let outcome = SourceFailover::new(fetcher)
            .resolve(LotteryId::Federal, day())
            .await;

        match outcome {
            FailoverOutcome::Succeeded { draw, attempts } => {
                assert_eq!(attempts, 1);
                assert_eq!(draw.first_prize(), Some("4312"));
                assert_eq!(draw.source_url, source.primary_url);
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(hits.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_backup_succeeds_after_primary_fails() {
        let source = LotteryId::Federal.source();
        let fetcher = ScriptedFetcher::new(&[(source.backup_urls[0], FULL_PAGE)]);
        let hits = fetcher.hits.clone();

        let outcome = SourceFailover::new(fetcher)
            .resolve(LotteryId::Federal, day())
            .await;

        match outcome {
            FailoverOutcome::Succeeded { draw, attempts } => {
                assert_eq!(attempts, 2);
                assert_eq!(draw.source_url, source.backup_urls[0]);
            }
            other => panic!("expected success, got {:?}", other),
        }

        // * The second backup must never be touched
        let hits = hits.lock().unwrap();
        assert_eq!(hits.len(), 2);
        assert!(!hits.contains(&source.backup_urls[1].to_string()));
    }

    #[tokio::test]
    async fn test_partial_extraction_advances_the_chain() {
        let source = LotteryId::Federal.source();
        let fetcher = ScriptedFetcher::new(&[
            (source.primary_url, PARTIAL_PAGE),
            (source.backup_urls[0], FULL_PAGE),
        ]);

        let outcome = SourceFailover::new(fetcher)
            .resolve(LotteryId::Federal, day())
            .await;

        match outcome {
            FailoverOutcome::Succeeded { attempts, .. } => assert_eq!(attempts, 2),
            other => panic!("expected success via backup, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exhausted_carries_the_last_error() {
        let fetcher = ScriptedFetcher::new(&[]);
        let source = LotteryId::Federal.source();
        let expected_attempts = 1 + source.backup_urls.len();
        let hits_handle = fetcher.hits.clone();

        let outcome = SourceFailover::new(fetcher)
            .resolve(LotteryId::Federal, day())
            .await;

        match outcome {
            FailoverOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, expected_attempts);
                assert!(last_error.contains(source.backup_urls[1]));
                assert!(last_error.contains("503"));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(hits_handle.lock().unwrap().len(), expected_attempts);
    }

    #[tokio::test]
    async fn test_empty_page_reads_as_extraction_empty() {
        let source = LotteryId::Federal.source();
        let fetcher = ScriptedFetcher::new(&[
            (source.primary_url, "<html><body>em breve</body></html>"),
            (source.backup_urls[0], "<html><body>aguarde</body></html>"),
            (source.backup_urls[1], "<html></html>"),
        ]);

        let outcome = SourceFailover::new(fetcher)
            .resolve(LotteryId::Federal, day())
            .await;

        match outcome {
            FailoverOutcome::Exhausted { last_error, .. } => {
                assert!(last_error.contains("no valid candidates"));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }
}
