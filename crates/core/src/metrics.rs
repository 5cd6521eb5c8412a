//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Announce processing (lines seen per indexer and how they ended)
//! - Release pushes (outcome and latency per arr client)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Announce Metrics
// =============================================================================

/// Announce lines processed by result.
pub static ANNOUNCE_LINES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "relayarr_announce_lines_total",
            "Total announce lines processed",
        ),
        &["indexer", "result"], // "matched", "no_match", "error"
    )
    .unwrap()
});

// =============================================================================
// Push Metrics
// =============================================================================

/// Push outcomes by client.
pub static PUSH_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "relayarr_push_outcomes_total",
            "Total release pushes by outcome",
        ),
        &["client", "outcome"], // "accepted", "rejected", "unauthorized", "error"
    )
    .unwrap()
});

/// Push duration in seconds, including the application's processing time.
pub static PUSH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "relayarr_push_duration_seconds",
            "Duration of release pushes to arr applications",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["client"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ANNOUNCE_LINES.clone()),
        Box::new(PUSH_OUTCOMES.clone()),
        Box::new(PUSH_DURATION.clone()),
    ]
}
