//! Simulated exchange adapter
//!
//! Serves a fixed instrument catalog over a channel session, with
//! configurable failure modes for exercising connectors.

mod exchange;

pub use exchange::{Behavior, SimulatedExchange};

use meridian_core::{Candle, fields};
use meridian_ports::Element;

/// Build an instrument element from field/value pairs
pub fn element(fields: &[(&str, &str)]) -> Element {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Candle as the element a session would deliver for it
pub fn candle_element(candle: &Candle) -> Element {
    element(&[
        (fields::TIMESTAMP, &candle.timestamp.to_string()),
        (fields::OPEN_PRICE, &candle.open.to_string()),
        (fields::HIGH_PRICE, &candle.high.to_string()),
        (fields::LOW_PRICE, &candle.low.to_string()),
        (fields::CLOSE_PRICE, &candle.close.to_string()),
        (fields::VOLUME, &candle.volume.to_string()),
    ])
}
