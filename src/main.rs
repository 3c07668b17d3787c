use anyhow::Result;
use similarity_bridge::{
    config::{self, RunMode},
    server,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    // Release mode logs JSON lines, debug mode logs human-readable text
    match config.server.mode {
        RunMode::Release => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        RunMode::Debug => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    info!(
        "Starting similarity bridge with log level: {} ({} mode)",
        log_level, config.server.mode
    );

    server::run(config).await?;

    Ok(())
}
