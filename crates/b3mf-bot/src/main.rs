//! B3 magic-formula buy bot - entry point.

use anyhow::Result;
use b3mf_bot::{AppConfig, Application, StdinConsent};
use b3mf_feed::FundamentusSource;
use clap::Parser;
use tracing::info;

/// B3 magic-formula buy bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via B3MF_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

// The run is strictly sequential: async is only the I/O idiom, never
// fan-out, so a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    b3mf_telemetry::init_logging()?;

    info!("Starting b3mf-bot v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > B3MF_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("B3MF_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = AppConfig::from_file(&config_path)?;

    let source = FundamentusSource::new(&config.listing_url)?;
    let app = Application::new(config);

    let outcome = app.run(&source, &StdinConsent).await?;
    info!(%outcome, "Run finished");

    Ok(())
}
