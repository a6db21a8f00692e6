//! Regime diagnosis web server - Entry Point

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

/// Regime diagnosis website and read-only results API
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via REGIME_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Results directory written by the analysis pipeline
    #[arg(long)]
    results_root: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, source) = regime_web::AppConfig::load(args.config.as_deref())?;
    if let Some(root) = args.results_root {
        config.results.root = root;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    regime_telemetry::init_logging(config.telemetry.log_level.as_deref())?;

    info!("Starting regime-web v{}", env!("CARGO_PKG_VERSION"));
    if source.found {
        info!(path = %source.path, "Loaded config file");
    } else {
        warn!(path = %source.path, "Config file not found, using defaults");
    }
    info!(
        addr = %config.server.bind_addr(),
        results_root = %config.results.root,
        "Configuration loaded"
    );

    let app = regime_web::Application::new(config)?;
    app.run().await?;

    Ok(())
}
