//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the relayarr server:
//! - HTTP request metrics (latency, counts)
//! - Configured indexers and clients (collected dynamically)
//! - Core announce and push metrics (registered from the core crate)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use regex_lite::Regex;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "relayarr_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 120.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("relayarr_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "relayarr_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Configuration Metrics (collected dynamically)
// =============================================================================

/// Indexers by enabled state.
pub static INDEXERS_CONFIGURED: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("relayarr_indexers_configured", "Configured indexers"),
        &["enabled"],
    )
    .unwrap()
});

/// Arr clients receiving pushes.
pub static CLIENTS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "relayarr_clients_active",
        "Number of enabled arr clients",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Configuration
    registry
        .register(Box::new(INDEXERS_CONFIGURED.clone()))
        .unwrap();
    registry.register(Box::new(CLIENTS_ACTIVE.clone())).unwrap();

    // Core metrics (announces, pushes)
    for metric in relayarr_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Collect dynamic metrics from current application state.
///
/// This is called before encoding metrics to update gauges with current values.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let indexers = state.processor().indexers();
    let enabled = indexers.iter().filter(|i| i.enabled).count();
    INDEXERS_CONFIGURED
        .with_label_values(&["true"])
        .set(enabled as i64);
    INDEXERS_CONFIGURED
        .with_label_values(&["false"])
        .set((indexers.len() - enabled) as i64);

    CLIENTS_ACTIVE.set(state.processor().clients().len() as i64);
}

static CLIENT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/api/v1/clients/)[^/]+(/.*)?$").unwrap());

/// Normalize a path for metric labels (replace client names with a
/// placeholder).
pub fn normalize_path(path: &str) -> String {
    CLIENT_PATH.replace(path, "${1}{name}${2}").to_string()
}
