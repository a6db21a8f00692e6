//! Prometheus metrics and structured logging for the regime diagnosis site.
//!
//! - Prometheus metrics for HTTP requests and artifact reads
//! - Structured JSON logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
