// * Operations: structured logging and Prometheus metrics, plus the small
// * HTTP surface that exposes them.

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    get_metrics_string, init_tracing, init_tracing_pretty, start_metrics_server,
    MetricsServerHandle,
};
