mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`) and applies
/// `PORT` / `RUN_MODE` overrides from the environment.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if explicit_path.is_none() && !Path::new(&config_path).exists() {
        debug!("No {} found, using default configuration", config_path);
        Config::default()
    } else {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(&config_path).await?;
        parse(&config_str)?
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

pub fn parse(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Applies the environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    if let Some(mode) = lookup("RUN_MODE").filter(|m| !m.trim().is_empty()) {
        config.server.mode = mode.parse::<RunMode>().map_err(Error::config)?;
    }

    Ok(())
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("server.port must be non-zero"));
        }
        if self.worker.command.trim().is_empty() {
            return Err(Error::config("worker.command must not be empty"));
        }
        if self.worker.timeout_ms == 0 {
            return Err(Error::config("worker.timeout_ms must be greater than zero"));
        }
        if self.worker.max_output_bytes == 0 {
            return Err(Error::config(
                "worker.max_output_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}
