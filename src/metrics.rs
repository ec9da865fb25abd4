//! Prometheus metrics for the file proxy.
//!
//! Storage calls are the only real work this service does, so the metrics
//! cover them: a counter by operation and outcome, and a latency histogram by
//! operation. Exposed at /metrics in text format.

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::future::Future;

lazy_static! {
    /// Registry for all metrics
    pub static ref REGISTRY: Registry = Registry::new();

    /// Storage operation counter by operation and outcome
    pub static ref STORAGE_OPERATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("fileproxy_storage_operations_total", "Total storage operations"),
        &["operation", "outcome"]
    )
    .expect("Failed to create STORAGE_OPERATIONS metric");

    /// Storage operation duration histogram by operation
    pub static ref STORAGE_OPERATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "fileproxy_storage_operation_duration_seconds",
            "Storage operation duration in seconds"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"]
    )
    .expect("Failed to create STORAGE_OPERATION_DURATION metric");
}

/// Initialize metrics and register with the global registry
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(STORAGE_OPERATIONS.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(STORAGE_OPERATION_DURATION.clone()))
        .unwrap();
}

/// Run one storage call, recording its latency and outcome.
pub async fn observe_storage_op<T, E, F>(operation: &str, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let timer = STORAGE_OPERATION_DURATION
        .with_label_values(&[operation])
        .start_timer();
    let result = call.await;
    timer.observe_duration();

    let outcome = if result.is_ok() { "ok" } else { "error" };
    STORAGE_OPERATIONS
        .with_label_values(&[operation, outcome])
        .inc();

    result
}
