use anyhow::{Context, Result, bail};
use mock_training_server::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Picks the log level: `RUST_LOG` wins over `server.logs.level`.
fn resolve_log_level(configured: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());
    if level.parse::<LevelFilter>().is_err() {
        bail!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        );
    }
    Ok(level)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration is loaded before logging is set up
    let config = config::load()
        .await
        .context("Failed to load configuration")?;
    let log_level = resolve_log_level(&config.server.logs.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .json()
        .init();

    info!("Mock training server starting with log level: {}", log_level);

    server::run(config)
        .await
        .context("Mock training server stopped")?;

    Ok(())
}
