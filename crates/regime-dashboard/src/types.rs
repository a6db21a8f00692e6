//! API response types.
//!
//! Pipeline documents are passed through as `serde_json::Value`; these types
//! only wrap them where a route reshapes its output.

use regime_core::RunId;
use serde::Serialize;
use serde_json::Value;

/// A list of records, e.g. CSV rows or JSON Lines entries.
#[derive(Debug, Clone, Serialize)]
pub struct RecordsResponse<T> {
    pub count: usize,
    pub records: Vec<T>,
}

impl<T> RecordsResponse<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            count: records.len(),
            records,
        }
    }
}

/// A document belonging to the latest valid run.
#[derive(Debug, Clone, Serialize)]
pub struct RunDocument {
    pub run_id: RunId,
    pub data: Value,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the results root exists.
    pub results_available: bool,
    /// Unix milliseconds.
    pub timestamp_ms: i64,
}

/// Error body shared by every API route.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}
