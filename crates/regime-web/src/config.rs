//! Application configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. TOML file (`--config` > `REGIME_CONFIG` > `config/default.toml`)
//! 3. `REGIME__<SECTION>__<KEY>` environment variables
//! 4. command line overrides applied by `main`

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use regime_dashboard::ServerConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Config file used when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "REGIME_CONFIG";

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "REGIME";

/// Results tree configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// Root directory written by the analysis pipeline.
    #[serde(default = "default_results_root")]
    pub root: String,
}

fn default_results_root() -> String {
    "./results".to_string()
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            root: default_results_root(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log filter directive. `RUST_LOG` takes precedence when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Config file chosen at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: String,
    /// Named explicitly (CLI or env); a missing file is then an error.
    pub required: bool,
    /// Whether the file existed when configuration was loaded.
    pub found: bool,
}

impl ConfigSource {
    /// Pick the config file: `--config` > `REGIME_CONFIG` > default path.
    pub fn resolve(explicit_path: Option<&str>, env_path: Option<String>) -> Self {
        let explicit = explicit_path.map(str::to_string).or(env_path);
        let required = explicit.is_some();
        let path = explicit.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let found = Path::new(&path).is_file();
        Self {
            path,
            required,
            found,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Results tree configuration.
    #[serde(default)]
    pub results: ResultsConfig,
    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the file chosen by `explicit_path`,
    /// `REGIME_CONFIG` or the default path, layered with process environment
    /// overrides.
    ///
    /// An explicitly named file must exist; the default file is optional.
    /// The returned [`ConfigSource`] says which file was used, so the caller
    /// can log it once logging is up.
    pub fn load(explicit_path: Option<&str>) -> AppResult<(Self, ConfigSource)> {
        let source = ConfigSource::resolve(explicit_path, std::env::var(CONFIG_PATH_ENV).ok());
        let config = Self::load_from(Path::new(&source.path), source.required, None)?;
        Ok((config, source))
    }

    /// Load from `path` layered with environment overrides.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        path: &Path,
        required: bool,
        env: Option<HashMap<String, String>>,
    ) -> AppResult<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> AppResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {e}")))
    }
}
