use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::{ConnectorConfigFile, ExchangeProfile};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No enabled exchanges in config")]
    NoEnabledExchanges,
    #[error("Exchange not found: {0}")]
    ExchangeNotFound(String),
    #[error("Exchange listed twice: {0}")]
    DuplicateExchange(String),
    #[error("Poll interval must be non-zero")]
    ZeroPollInterval,
    #[error("Candle batch limit must be non-zero for {0}")]
    ZeroCandleBatch(String),
}

/// Load connector configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConnectorConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: ConnectorConfigFile = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<ConnectorConfigFile, ConfigError> {
    let config: ConnectorConfigFile = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the embedded configuration listing every supported exchange
pub fn load_default_config() -> Result<ConnectorConfigFile, ConfigError> {
    let default_config = include_str!("exchanges.json");
    load_config_from_str(default_config)
}

impl ConnectorConfigFile {
    /// Get only enabled exchanges
    pub fn enabled_exchanges(&self) -> Vec<&ExchangeProfile> {
        self.exchanges.iter().filter(|e| e.enabled).collect()
    }

    /// Get a specific exchange by ID
    pub fn get_exchange(&self, id: &str) -> Result<&ExchangeProfile, ConfigError> {
        let wanted = id.to_lowercase();
        self.exchanges
            .iter()
            .find(|e| e.id.to_lowercase() == wanted)
            .ok_or_else(|| ConfigError::ExchangeNotFound(id.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_exchanges().is_empty() {
            return Err(ConfigError::NoEnabledExchanges);
        }
        if self.global.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        let mut seen = HashSet::new();
        for profile in &self.exchanges {
            if !seen.insert(profile.exchange_id()) {
                return Err(ConfigError::DuplicateExchange(profile.id.clone()));
            }
            if profile.candles.is_some_and(|c| c.batch_limit == 0 || c.max_batches == 0) {
                return Err(ConfigError::ZeroCandleBatch(profile.id.clone()));
            }
        }
        Ok(())
    }
}
