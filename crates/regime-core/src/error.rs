//! Error types for regime-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid asset symbol: {0}")]
    InvalidAsset(String),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Invalid run id: {0}")]
    InvalidRunId(String),

    #[error("Unsupported locale: {0}")]
    InvalidLocale(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
