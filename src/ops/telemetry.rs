// * Telemetry: JSON logging and Prometheus metrics for the pipeline.
// * Every metric below is driven by pipeline code, none are decorative.

use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, register_histogram_vec, Counter,
    CounterVec, Encoder, Histogram, HistogramVec, TextEncoder,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// * Default metrics server port
const DEFAULT_METRICS_PORT: u16 = 9000;

lazy_static! {
    // * Fetch attempts by outcome: success, transport, timeout
    pub static ref FETCH_ATTEMPTS_TOTAL: CounterVec = register_counter_vec!(
        "palpiteiro_fetch_attempts_total",
        "Total page fetch attempts by outcome",
        &["outcome"]
    ).unwrap();

    // * Fetch duration by outcome
    pub static ref FETCH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "palpiteiro_fetch_duration_seconds",
        "Page fetch duration in seconds",
        &["outcome"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0]
    ).unwrap();

    // * Draws written through the store
    pub static ref DRAWS_WRITTEN_TOTAL: Counter = register_counter!(
        "palpiteiro_draws_written_total",
        "Total draw records upserted into the store"
    ).unwrap();

    // * Lotteries whose whole source chain failed in a run
    pub static ref SOURCES_EXHAUSTED_TOTAL: Counter = register_counter!(
        "palpiteiro_sources_exhausted_total",
        "Total lottery runs that exhausted every configured source"
    ).unwrap();

    // * Accepted candidates per extraction strategy
    pub static ref STRATEGY_CANDIDATES_TOTAL: CounterVec = register_counter_vec!(
        "palpiteiro_strategy_candidates_total",
        "Validated candidates accepted into the pool, by strategy",
        &["strategy"]
    ).unwrap();

    // * Full-universe staleness scan duration
    pub static ref OVERDUE_SCAN_DURATION_SECONDS: Histogram = register_histogram!(
        "palpiteiro_overdue_scan_duration_seconds",
        "Staleness analysis duration in seconds",
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    ).unwrap();
}

/// Initializes the tracing subscriber with JSON formatting.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("palpiteiro=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}

/// Initializes tracing with pretty formatting (for development).
pub fn init_tracing_pretty() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("palpiteiro=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty())
        .init();
}

/// Records one fetch attempt with its outcome label and duration.
pub fn record_fetch_attempt(outcome: &str, seconds: f64) {
    FETCH_ATTEMPTS_TOTAL.with_label_values(&[outcome]).inc();
    FETCH_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(seconds);
}

pub fn record_draw_written() {
    DRAWS_WRITTEN_TOTAL.inc();
}

pub fn record_source_exhausted() {
    SOURCES_EXHAUSTED_TOTAL.inc();
}

pub fn record_strategy_candidates(strategy: &str, accepted: usize) {
    STRATEGY_CANDIDATES_TOTAL
        .with_label_values(&[strategy])
        .inc_by(accepted as f64);
}

pub fn observe_overdue_scan(seconds: f64) {
    OVERDUE_SCAN_DURATION_SECONDS.observe(seconds);
}

/// Metrics server handle for graceful shutdown.
pub struct MetricsServerHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    running: Arc<AtomicBool>,
}

impl MetricsServerHandle {
    /// Signals the metrics server to shut down.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// Starts the Prometheus metrics HTTP server on the specified port.
///
/// Returns a handle that can be used for graceful shutdown.
pub async fn start_metrics_server(port: u16) -> MetricsServerHandle {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tokio::spawn(async move {
        let make_svc = hyper::service::make_service_fn(|_conn| async {
            Ok::<_, std::convert::Infallible>(hyper::service::service_fn(handle_metrics_request))
        });

        let server = hyper::Server::bind(&addr)
            .serve(make_svc)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });

        tracing::info!(port = port, "Metrics server started");

        if let Err(e) = server.await {
            tracing::error!(error = %e, "Metrics server error");
        }

        running_clone.store(false, Ordering::Relaxed);
        tracing::info!("Metrics server stopped");
    });

    MetricsServerHandle {
        shutdown_tx: Some(shutdown_tx),
        running,
    }
}

/// Starts the metrics server on the default port (9000).
pub async fn start_metrics_server_default() -> MetricsServerHandle {
    start_metrics_server(DEFAULT_METRICS_PORT).await
}

// * /metrics for Prometheus scrape, /health for liveness probes
async fn handle_metrics_request(
    req: hyper::Request<hyper::Body>,
) -> Result<hyper::Response<hyper::Body>, std::convert::Infallible> {
    match req.uri().path() {
        "/metrics" => {
            let encoder = TextEncoder::new();
            let metric_families = prometheus::gather();
            let mut buffer = Vec::new();
            encoder.encode(&metric_families, &mut buffer).unwrap();

            Ok(hyper::Response::builder()
                .status(200)
                .header("Content-Type", encoder.format_type())
                .body(hyper::Body::from(buffer))
                .unwrap())
        }
        "/health" => Ok(hyper::Response::builder()
            .status(200)
            .body(hyper::Body::from("OK"))
            .unwrap()),
        _ => Ok(hyper::Response::builder()
            .status(404)
            .body(hyper::Body::from("Not Found"))
            .unwrap()),
    }
}

/// Returns the current metrics in the Prometheus text exposition format.
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap_or_default()
}
