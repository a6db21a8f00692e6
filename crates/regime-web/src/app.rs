//! Application wiring.

use regime_core::ResultsLayout;
use regime_dashboard::{run_server, shutdown_signal, AppState};
use regime_store::ResultsStore;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// The web application: results store plus HTTP server.
pub struct Application {
    config: AppConfig,
    store: ResultsStore,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        if config.results.root.trim().is_empty() {
            return Err(AppError::Config("results.root must not be empty".to_string()));
        }
        let store = ResultsStore::new(ResultsLayout::new(&config.results.root));
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handler state for the HTTP server.
    pub fn state(&self) -> AppState {
        AppState::new(self.store.clone(), self.config.server.clone())
    }

    /// Serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> AppResult<()> {
        if self.store.root_exists().await {
            info!(root = %self.config.results.root, "Results root found");
        } else {
            // The pipeline may create the tree later; routes answer 404/503 until then.
            warn!(root = %self.config.results.root, "Results root does not exist yet");
        }

        run_server(self.state(), shutdown_signal())
            .await
            .map_err(|e| AppError::Server(e.to_string()))
    }
}
