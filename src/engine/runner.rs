// * Batch orchestration: one run resolves many lotteries concurrently under
// * a small worker limit, while each lottery's own source chain stays
// * strictly sequential inside its task. Failure containment is per lottery;
// * one exhausted chain never aborts its siblings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};

use crate::config::constants::WORKER_LIMIT;
use crate::config::lotteries::LotteryId;
use crate::engine::failover::{FailoverOutcome, SourceFailover};
use crate::network::fetcher::PageFetcher;
use crate::ops::telemetry;
use crate::persistence::store::DrawStore;

/// Per-run accounting, the whole user-visible result of one batch.
#[derive(Debug, Default)]
pub struct RunReport {
    pub succeeded: Vec<LotteryId>,
    pub exhausted: Vec<(LotteryId, String)>,
    pub store_failures: Vec<(LotteryId, String)>,
    pub draws_written: usize,
    pub cancelled: usize,
}

impl RunReport {
    pub fn total_attempted(&self) -> usize {
        self.succeeded.len() + self.exhausted.len() + self.store_failures.len()
    }
}

// * What one lottery task came back with
enum TaskOutcome {
    Written(LotteryId),
    Exhausted(LotteryId, String),
    StoreFailed(LotteryId, String),
    Cancelled,
}

/// Runs extraction batches: fetch, extract, normalize and store for a set
/// of lotteries on one target date.
pub struct BatchRunner<F, S> {
    failover: SourceFailover<F>,
    store: S,
    worker_limit: usize,
    cancel: Arc<AtomicBool>,
}

impl<F: PageFetcher, S: DrawStore> BatchRunner<F, S> {
    pub fn new(fetcher: F, store: S) -> Self {
        Self {
            failover: SourceFailover::new(fetcher),
            store,
            worker_limit: WORKER_LIMIT,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_worker_limit(mut self, limit: usize) -> Self {
        self.worker_limit = limit.max(1);
        self
    }

    /// Flag checked between lottery tasks. Flipping it abandons lotteries
    /// not yet started; in-flight attempts finish or fail on their own and
    /// nothing partial is ever written.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Resolves every given lottery for `date` and writes accepted draws.
    pub async fn run(&self, lotteries: &[LotteryId], date: NaiveDate) -> RunReport {
        info!(
            lotteries = lotteries.len(),
            date = %date,
            workers = self.worker_limit,
            "batch run starting"
        );

        let outcomes: Vec<TaskOutcome> = stream::iter(lotteries.iter().copied())
            .map(|lottery| self.run_one(lottery, date))
            .buffer_unordered(self.worker_limit)
            .collect()
            .await;

        let mut report = RunReport::default();
        for outcome in outcomes {
            match outcome {
                TaskOutcome::Written(id) => {
                    report.succeeded.push(id);
                    report.draws_written += 1;
                }
                TaskOutcome::Exhausted(id, err) => report.exhausted.push((id, err)),
                TaskOutcome::StoreFailed(id, err) => report.store_failures.push((id, err)),
                TaskOutcome::Cancelled => report.cancelled += 1,
            }
        }

        info!(
            succeeded = report.succeeded.len(),
            exhausted = report.exhausted.len(),
            store_failures = report.store_failures.len(),
            draws_written = report.draws_written,
            cancelled = report.cancelled,
            "batch run complete"
        );
        report
    }

    async fn run_one(&self, lottery: LotteryId, date: NaiveDate) -> TaskOutcome {
        if self.cancel.load(Ordering::Relaxed) {
            return TaskOutcome::Cancelled;
        }

        match self.failover.resolve(lottery, date).await {
            FailoverOutcome::Succeeded { draw, .. } => match self.store.upsert(draw).await {
                Ok(()) => {
                    telemetry::record_draw_written();
                    TaskOutcome::Written(lottery)
                }
                Err(e) => {
                    // * Store failure is fatal to this lottery only
                    error!(lottery = %lottery, error = %e, "store upsert failed");
                    TaskOutcome::StoreFailed(lottery, e.to_string())
                }
            },
            FailoverOutcome::Exhausted { last_error, .. } => {
                telemetry::record_source_exhausted();
                warn!(lottery = %lottery, last_error = %last_error, "lottery exhausted");
                TaskOutcome::Exhausted(lottery, last_error)
            }
        }
    }
}
