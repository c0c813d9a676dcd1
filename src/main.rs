// * Manual-trigger entry point: one batch run over every configured lottery
// * for today, against the file-backed store. Scheduling lives outside.

use palpiteiro::config::constants::DEFAULT_OVERDUE_THRESHOLD;
use palpiteiro::config::lotteries::ALL_LOTTERIES;
use palpiteiro::engine::BatchRunner;
use palpiteiro::network::LivePageFetcher;
use palpiteiro::ops::telemetry;
use palpiteiro::persistence::{DrawStore, JsonFileDrawStore};
use palpiteiro::stats::StalenessAnalyzer;

use std::sync::Arc;

const DEFAULT_STORE_PATH: &str = "draws.json";

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    let metrics = telemetry::start_metrics_server_default().await;

    let store_path =
        std::env::var("PALPITEIRO_STORE").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    let store = match JsonFileDrawStore::open(&store_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(path = %store_path, error = %e, "cannot open draw store");
            std::process::exit(1);
        }
    };

    let runner = BatchRunner::new(LivePageFetcher::new(), Arc::clone(&store));
    let today = chrono::Local::now().date_naive();
    let report = runner.run(&ALL_LOTTERIES, today).await;

    for (lottery, error) in &report.exhausted {
        tracing::warn!(lottery = %lottery, error = %error, "no result today");
    }

    // * Refresh the overdue rankings for every lottery that has history
    for lottery in ALL_LOTTERIES {
        match store.query_history(lottery).await {
            Ok(history) if !history.is_empty() => {
                let ranked = StalenessAnalyzer::rank(&history);
                let overdue = ranked.at_least(DEFAULT_OVERDUE_THRESHOLD);
                tracing::info!(
                    lottery = %lottery,
                    draws = ranked.total_draws,
                    most_overdue_dezena = %ranked.dezenas[0].value,
                    most_overdue_animal = %ranked.animals[0].value,
                    overdue_milhares = overdue.milhares.len(),
                    "staleness refreshed"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::error!(lottery = %lottery, error = %e, "history query failed"),
        }
    }

    tracing::info!(
        succeeded = report.succeeded.len(),
        exhausted = report.exhausted.len(),
        draws_written = report.draws_written,
        "run finished"
    );
    metrics.shutdown();
}
