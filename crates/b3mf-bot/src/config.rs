//! Application configuration.
//!
//! TOML file plus environment overrides for the secrets: credentials are
//! read from `B3MF_LOGIN` / `B3MF_PASSWORD` / `B3MF_SERVER` when set,
//! so they never have to live in the file.

use crate::error::{AppError, AppResult};
use b3mf_core::Credentials;
use b3mf_ranker::RankerConfig;
use b3mf_risk::MarketHours;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Fundamentals listing URL.
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    /// Fixed per-order volume.
    #[serde(default = "default_volume")]
    pub volume: Decimal,
    /// Candidate selection parameters.
    #[serde(default)]
    pub ranker: RankerConfig,
    /// Advisory trading window in exchange-local time.
    #[serde(default)]
    pub market_hours: MarketHours,
    /// Broker credentials (login, password, server endpoint).
    #[serde(default)]
    pub credentials: Credentials,
}

fn default_listing_url() -> String {
    "https://www.fundamentus.com.br/resultado.php".to_string()
}

fn default_volume() -> Decimal {
    Decimal::from(500)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            volume: default_volume(),
            ranker: RankerConfig::default(),
            market_hours: MarketHours::default(),
            credentials: Credentials::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the given file, falling back to defaults
    /// when the file does not exist, then apply environment overrides.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let mut config = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
            toml::from_str(&content)
                .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Credentials from the environment win over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(login) = std::env::var("B3MF_LOGIN") {
            self.credentials.login = login;
        }
        if let Ok(password) = std::env::var("B3MF_PASSWORD") {
            self.credentials.password = password;
        }
        if let Ok(server) = std::env::var("B3MF_SERVER") {
            self.credentials.server = server;
        }
    }
}
