//! regime-dashboard - HTTP server for the regime diagnosis site.
//!
//! Serves the marketing pages, the dashboard shell and a read-only JSON API
//! over the pipeline results tree.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  axum HTTP Server (port 3000)                 │
//! │  GET /, /{page}, /ja, /ja/{page}  → marketing pages (HTML)    │
//! │  GET /dashboard                   → dashboard shell + fetch JS│
//! │  GET /api/...                     → results API (JSON)        │
//! │  GET /assets/...                  → public dir (optional)     │
//! │  GET /metrics                     → Prometheus text           │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ every request reads from disk
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │         ResultsStore  →  results/ (written by the pipeline)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use regime_dashboard::{run_server, shutdown_signal, AppState, ServerConfig};
//!
//! let state = AppState::new(store, ServerConfig::default());
//! run_server(state, shutdown_signal()).await?;
//! ```

mod api;
mod config;
mod error;
mod pages;
mod server;
mod state;
mod types;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{create_router, run_server, shutdown_signal};
pub use state::AppState;
pub use types::{ErrorBody, HealthResponse, RecordsResponse, RunDocument};
