//! Registry - exchange identifier to connector
//!
//! Built at startup from the enabled profiles of a validated config file. More
//! connectors can be registered at runtime; an identifier is never bound
//! twice.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::info;
use meridian_core::{Candle, ExchangeId, Instrument, Timeframe};
use meridian_ports::Session;
use std::sync::Arc;

use crate::config::{ConnectorConfigFile, ExchangeProfile};
use crate::connector::Connector;
use crate::error::RegistryError;

#[derive(Default)]
pub struct Registry {
    connectors: DashMap<ExchangeId, Arc<Connector>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One connector per enabled exchange, each on its own session
    pub fn from_config<F>(
        config: &ConnectorConfigFile,
        mut open_session: F,
    ) -> Result<Self, RegistryError>
    where
        F: FnMut(&ExchangeProfile) -> Arc<dyn Session>,
    {
        config.validate()?;

        let registry = Self::new();
        let timing = config.global.poll_timing();

        for profile in config.enabled_exchanges() {
            let session = open_session(profile);
            registry.register(Connector::new(profile.clone(), session, timing))?;
        }

        info!("Registry ready with {} exchanges", registry.len());
        Ok(registry)
    }

    pub fn register(&self, connector: Connector) -> Result<Arc<Connector>, RegistryError> {
        match self.connectors.entry(connector.exchange().clone()) {
            Entry::Occupied(entry) => {
                Err(RegistryError::DuplicateExchange(entry.key().to_string()))
            }
            Entry::Vacant(entry) => {
                let connector = Arc::new(connector);
                entry.insert(Arc::clone(&connector));
                Ok(connector)
            }
        }
    }

    /// Connector for an exchange identifier (case-insensitive)
    pub fn lookup(&self, exchange: &str) -> Result<Arc<Connector>, RegistryError> {
        self.connectors
            .get(&ExchangeId::new(exchange))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::UnsupportedExchange(exchange.to_string()))
    }

    pub fn contains(&self, exchange: &str) -> bool {
        self.connectors.contains_key(&ExchangeId::new(exchange))
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Registered identifiers in ascending order
    pub fn supported_exchanges(&self) -> Vec<ExchangeId> {
        let mut ids: Vec<_> = self.connectors.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Instruments of one exchange
    pub fn get_pairs(&self, exchange: &str) -> Result<Vec<Instrument>, RegistryError> {
        // The map guard is released before the blocking fetch
        let connector = self.lookup(exchange)?;
        Ok(connector.get_instruments()?)
    }

    /// Candles of one instrument on one exchange, opened within `[from_ms, to_ms]`
    pub fn get_historical_candles(
        &self,
        exchange: &str,
        instrument: &str,
        timeframe: Timeframe,
        from_ms: Option<u64>,
        to_ms: Option<u64>,
    ) -> Result<Vec<Candle>, RegistryError> {
        let connector = self.lookup(exchange)?;
        Ok(connector.get_historical_candles(instrument, timeframe, from_ms, to_ms)?)
    }
}
