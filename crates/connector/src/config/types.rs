use meridian_core::{ExchangeId, InstrumentKind, fields};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::connector::PollTiming;

/// Root configuration for the connectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfigFile {
    pub exchanges: Vec<ExchangeProfile>,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Everything that distinguishes one exchange's connector from another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeProfile {
    /// Unique identifier for the exchange (e.g., "binance-usds-futures")
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether this exchange is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Kind assigned when an element does not state its own
    #[serde(default)]
    pub kind: InstrumentKind,
    /// Status value meaning "open for trading"; unset if the exchange has none
    #[serde(default)]
    pub active_status: Option<String>,
    /// Raw field names, for exchanges that deviate from the canonical ones
    #[serde(default)]
    pub fields: FieldNames,
    /// Historical candle support; unset for exchanges without it
    #[serde(default)]
    pub candles: Option<CandleProfile>,
}

impl ExchangeProfile {
    pub fn new(id: impl Into<String>, kind: InstrumentKind) -> Self {
        let id = id.into();
        ExchangeProfile {
            name: id.clone(),
            id,
            enabled: true,
            kind,
            active_status: None,
            fields: FieldNames::default(),
            candles: None,
        }
    }

    pub fn with_active_status(mut self, status: impl Into<String>) -> Self {
        self.active_status = Some(status.into());
        self
    }

    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_candles(mut self, candles: CandleProfile) -> Self {
        self.candles = Some(candles);
        self
    }

    pub fn exchange_id(&self) -> ExchangeId {
        ExchangeId::new(&self.id)
    }
}

/// Raw field name read for each normalized attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub instrument: String,
    pub base: String,
    pub quote: String,
    pub settle: String,
    pub underlying: String,
    pub price_increment: String,
    pub quantity_increment: String,
    pub quantity_min: String,
    pub quote_quantity_min: String,
    pub contract_size: String,
    pub contract_multiplier: String,
    pub status: String,
    pub kind: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        FieldNames {
            instrument: fields::INSTRUMENT.to_string(),
            base: fields::BASE_ASSET.to_string(),
            quote: fields::QUOTE_ASSET.to_string(),
            settle: fields::SETTLE_ASSET.to_string(),
            underlying: fields::UNDERLYING_SYMBOL.to_string(),
            price_increment: fields::ORDER_PRICE_INCREMENT.to_string(),
            quantity_increment: fields::ORDER_QUANTITY_INCREMENT.to_string(),
            quantity_min: fields::ORDER_QUANTITY_MIN.to_string(),
            quote_quantity_min: fields::ORDER_QUOTE_QUANTITY_MIN.to_string(),
            contract_size: fields::CONTRACT_SIZE.to_string(),
            contract_multiplier: fields::CONTRACT_MULTIPLIER.to_string(),
            status: fields::INSTRUMENT_STATUS.to_string(),
            kind: fields::INSTRUMENT_TYPE.to_string(),
        }
    }
}

/// How an exchange pages through candle history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandlePaging {
    /// One request covering the whole range
    #[default]
    Single,
    /// Walk forward from the start of the range
    Forward,
    /// Walk backward from the end of the range
    Backward,
}

/// Candle request settings for one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleProfile {
    #[serde(default)]
    pub paging: CandlePaging,
    /// Most candles the exchange returns per request
    #[serde(default = "default_batch_limit")]
    pub batch_limit: u32,
    /// Upper bound on requests for one range
    #[serde(default = "default_max_batches")]
    pub max_batches: u32,
}

impl CandleProfile {
    pub fn new(paging: CandlePaging, batch_limit: u32) -> Self {
        Self {
            paging,
            batch_limit,
            max_batches: default_max_batches(),
        }
    }
}

impl Default for CandleProfile {
    fn default() -> Self {
        Self::new(CandlePaging::default(), default_batch_limit())
    }
}

/// Global configuration that applies to all exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Total time a request may take before the connector gives up
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    /// Longest single wait on the session between deadline checks
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            request_timeout_ms: default_request_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl GlobalConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn poll_timing(&self) -> PollTiming {
        PollTiming::new(self.request_timeout(), self.poll_interval())
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_batch_limit() -> u32 {
    1_000
}

fn default_max_batches() -> u32 {
    100
}

fn default_request_timeout() -> u64 {
    10_000
}

fn default_poll_interval() -> u64 {
    100
}
