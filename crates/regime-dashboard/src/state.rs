//! Shared handler state.
//!
//! Everything here is immutable after startup; each request reads the
//! results tree afresh.

use std::sync::Arc;

use regime_core::ResultsLayout;
use regime_store::ResultsStore;

use crate::config::ServerConfig;

/// Shared application state for axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<ResultsStore>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: ResultsStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// State over a results root with default server settings.
    pub fn for_root(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(
            ResultsStore::new(ResultsLayout::new(root)),
            ServerConfig::default(),
        )
    }

    pub fn store(&self) -> &ResultsStore {
        &self.store
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
