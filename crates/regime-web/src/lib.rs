//! Regime diagnosis web server.
//!
//! Main application that wires the pieces together:
//! - Layered configuration (TOML file + environment)
//! - Results store over the pipeline output directory
//! - HTTP server for pages and the results API

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, ConfigSource};
pub use error::{AppError, AppResult};
