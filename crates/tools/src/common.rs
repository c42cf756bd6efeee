//! Common utilities for tools: logging setup and config file I/O

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global options shared by every tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
pub struct GlobalConfig {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl GlobalConfig {
    /// Log level selected by the flags
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else if self.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

/// Initialize logging based on configuration
pub fn init_logging(config: &GlobalConfig) {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration from a JSON or TOML file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }

    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("Failed to parse config file {:?}: {}", path, e),
    }
}

/// Save configuration to a file, JSON for `.json` paths and TOML otherwise
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config).context("Failed to serialize config")?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}
