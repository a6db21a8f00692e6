//! Prometheus metrics for the regime diagnosis site.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, which is a programming error that should crash at first use.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

use crate::error::TelemetryResult;

/// Total HTTP requests by matched route and status code.
pub static HTTP_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "regime_http_requests_total",
        "Total HTTP requests",
        &["route", "status"]
    )
    .unwrap()
});

/// HTTP request latency in milliseconds.
pub static HTTP_REQUEST_DURATION_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "regime_http_request_duration_ms",
        "HTTP request latency in milliseconds",
        &["route"],
        vec![0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 250.0, 500.0, 1000.0]
    )
    .unwrap()
});

/// Artifact reads by kind (json/csv/jsonl) and outcome (ok/not_found/parse_error/io_error).
pub static ARTIFACT_READS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "regime_artifact_reads_total",
        "Total results artifact reads",
        &["kind", "outcome"]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record a finished HTTP request.
    pub fn http_request(route: &str, status: u16, latency_ms: f64) {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&[route, &status.to_string()])
            .inc();
        HTTP_REQUEST_DURATION_MS
            .with_label_values(&[route])
            .observe(latency_ms);
    }

    /// Record an artifact read.
    pub fn artifact_read(kind: &str, outcome: &str) {
        ARTIFACT_READS_TOTAL
            .with_label_values(&[kind, outcome])
            .inc();
    }

    /// Encode every registered metric in the Prometheus text format.
    pub fn gather_text() -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
