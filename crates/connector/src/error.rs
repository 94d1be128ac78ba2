//! Error types for the connector crate
//!
//! Exchange-side failures (error responses, timeouts) are not errors here:
//! they surface as a `FetchStatus`. Only contract violations are.

use thiserror::Error;

use crate::config::ConfigError;

/// Failure turning a raw element into an `Instrument` or `Candle`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Malformed {field} for instrument {instrument}: {value:?} is not a number")]
    MalformedNumber {
        instrument: String,
        field: String,
        value: String,
    },

    #[error("Missing {field} for instrument {instrument}")]
    MissingField { instrument: String, field: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Normalization failed on {exchange}: {source}")]
    Normalize {
        exchange: String,
        #[source]
        source: NormalizeError,
    },

    #[error("Historical candles are not supported on {0}")]
    CandlesUnsupported(String),
}

pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Unsupported exchange: {0}")]
    UnsupportedExchange(String),

    #[error("Exchange already registered: {0}")]
    DuplicateExchange(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}
