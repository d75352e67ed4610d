//! Prometheus metrics for classifai-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static CLASSIFICATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static MODEL_CALL_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GATEWAY_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static DB_OPERATION_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize all metrics. Safe to call more than once; the first call wins.
pub fn init_metrics() {
    let registry = Registry::new();

    let classifications = IntCounterVec::new(
        Opts::new(
            "classifications_total",
            "Total classification requests by outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create classifications_total metric");

    let model_call_duration = HistogramVec::new(
        HistogramOpts::new(
            "model_call_duration_seconds",
            "Model API call duration in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
    )
    .expect("Failed to create model_call_duration_seconds metric");

    let gateway_errors = IntCounterVec::new(
        Opts::new("gateway_errors_total", "Total model gateway errors"),
        &["error_type"],
    )
    .expect("Failed to create gateway_errors_total metric");

    let db_duration = HistogramVec::new(
        HistogramOpts::new(
            "db_operation_duration_seconds",
            "Database operation duration in seconds",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["operation"],
    )
    .expect("Failed to create db_operation_duration_seconds metric");

    registry
        .register(Box::new(classifications.clone()))
        .expect("Failed to register classifications_total");
    registry
        .register(Box::new(model_call_duration.clone()))
        .expect("Failed to register model_call_duration_seconds");
    registry
        .register(Box::new(gateway_errors.clone()))
        .expect("Failed to register gateway_errors_total");
    registry
        .register(Box::new(db_duration.clone()))
        .expect("Failed to register db_operation_duration_seconds");

    let _ = REGISTRY.set(registry);
    let _ = CLASSIFICATIONS_TOTAL.set(classifications);
    let _ = MODEL_CALL_DURATION_SECONDS.set(model_call_duration);
    let _ = GATEWAY_ERRORS_TOTAL.set(gateway_errors);
    let _ = DB_OPERATION_DURATION_SECONDS.set(db_duration);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a finished classification request by outcome label.
pub fn record_classification(outcome: &str) {
    if let Some(counter) = CLASSIFICATIONS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record model API call latency.
pub fn record_model_call(model: &str, duration_secs: f64) {
    if let Some(histogram) = MODEL_CALL_DURATION_SECONDS.get() {
        histogram.with_label_values(&[model]).observe(duration_secs);
    }
}

/// Record a model gateway error.
pub fn record_gateway_error(error_type: &str) {
    if let Some(counter) = GATEWAY_ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type]).inc();
    }
}

/// Record database operation duration.
pub fn record_db_operation(operation: &str, duration_secs: f64) {
    if let Some(histogram) = DB_OPERATION_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[operation])
            .observe(duration_secs);
    }
}
