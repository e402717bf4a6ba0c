use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const CONFIG_PATH_ENV: &str = "HOUSING_MARKET_CONFIG";

/// How advertisement reports are written to stdout
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Market-wide settings threaded into payment calculations and the demo binary
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketConfig {
    /// Yearly mortgage interest rate used in monthly payment estimates
    pub interest_rate: f64,
    /// Artificial delay after every processed bid, in milliseconds (0 disables it)
    pub bid_latency_ms: u64,
    /// Fallback tracing filter when RUST_LOG is not set
    pub log_level: String,
    pub report_format: ReportFormat,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            interest_rate: 0.04,
            bid_latency_ms: 0,
            log_level: "info".to_string(),
            report_format: ReportFormat::Text,
        }
    }
}

impl MarketConfig {
    pub fn bid_latency(&self) -> Duration {
        Duration::from_millis(self.bid_latency_ms)
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse market config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
    }
}

/// Load the config from the file named by `HOUSING_MARKET_CONFIG` (also read from `.env`).
/// Without that variable the defaults are used.
pub fn load_config() -> Result<MarketConfig> {
    dotenvy::dotenv().ok();

    match env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            debug!("Loading market config from {}", path);
            MarketConfig::from_file(path)
        }
        Err(_) => Ok(MarketConfig::default()),
    }
}
