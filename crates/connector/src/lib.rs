//! Meridian Connector
//!
//! Fetches instrument reference data and historical candles from exchanges
//! through a market-data session and normalizes them into one uniform schema.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Config: exchanges.json                                      │
//! │  - one ExchangeProfile per supported exchange                │
//! │  - field-name overrides, default kind, active status value   │
//! │  - candle paging (single, forward, backward) and batch size  │
//! │  - global request timeout and poll interval                  │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Registry: exchange id -> Connector                          │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Connector (one per exchange, owns one Session)              │
//! │  send request -> wait for correlated response -> normalize   │
//! │  candles: one round trip per batch, sorted and deduplicated  │
//! │  Complete | TimedOut | ExchangeError | SessionUnavailable    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use meridian_connector::{Registry, Timeframe, load_default_config};
//!
//! let config = load_default_config()?;
//! let registry = Registry::from_config(&config, |profile| open_session(profile))?;
//!
//! let instruments = registry.get_pairs("binance-usds-futures")?;
//! for instrument in &instruments {
//!     println!("{}", instrument);
//! }
//!
//! let candles = registry.get_historical_candles("okx", "BTC-USDT", Timeframe::Hour1, Some(from), None)?;
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod normalize;
pub mod registry;

// Re-export commonly used types for convenience
pub use config::{
    CandlePaging, CandleProfile, ConfigError, ConnectorConfigFile, ExchangeProfile, FieldNames,
    GlobalConfig, load_config, load_config_from_str, load_default_config,
};
pub use connector::{CandlesResult, Connector, FetchStatus, InstrumentsResult, PollTiming};
pub use error::{ConnectorError, ConnectorResult, NormalizeError, RegistryError};
pub use normalize::Normalizer;
pub use registry::Registry;

pub use meridian_core::{Candle, ExchangeId, Instrument, InstrumentKind, Timeframe};
