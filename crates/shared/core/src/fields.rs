//! Canonical raw field names carried by instrument and candle elements.
//!
//! Sessions deliver every instrument as a flat map of field name to string
//! value. These are the names a session uses unless an exchange profile
//! overrides them.

/// Exchange-native instrument identifier
pub const INSTRUMENT: &str = "INSTRUMENT";
pub const BASE_ASSET: &str = "BASE_ASSET";
pub const QUOTE_ASSET: &str = "QUOTE_ASSET";
pub const SETTLE_ASSET: &str = "SETTLE_ASSET";
pub const UNDERLYING_SYMBOL: &str = "UNDERLYING_SYMBOL";

/// Minimum price increment
pub const ORDER_PRICE_INCREMENT: &str = "ORDER_PRICE_INCREMENT";
/// Minimum quantity increment
pub const ORDER_QUANTITY_INCREMENT: &str = "ORDER_QUANTITY_INCREMENT";
pub const ORDER_QUANTITY_MIN: &str = "ORDER_QUANTITY_MIN";
pub const ORDER_QUOTE_QUANTITY_MIN: &str = "ORDER_QUOTE_QUANTITY_MIN";

pub const CONTRACT_SIZE: &str = "CONTRACT_SIZE";
pub const CONTRACT_MULTIPLIER: &str = "CONTRACT_MULTIPLIER";

pub const INSTRUMENT_STATUS: &str = "INSTRUMENT_STATUS";
pub const INSTRUMENT_TYPE: &str = "INSTRUMENT_TYPE";

/// Candle open time in epoch milliseconds
pub const TIMESTAMP: &str = "TIMESTAMP";
pub const OPEN_PRICE: &str = "OPEN_PRICE";
pub const HIGH_PRICE: &str = "HIGH_PRICE";
pub const LOW_PRICE: &str = "LOW_PRICE";
pub const CLOSE_PRICE: &str = "CLOSE_PRICE";
pub const VOLUME: &str = "VOLUME";
