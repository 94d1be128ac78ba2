//! Meridian Core Domain
//!
//! Pure domain types for instrument reference data and historical candles.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod candles;
pub mod exchange;
pub mod fields;
pub mod instruments;

// Re-export commonly used types at crate root
pub use candles::{Candle, ParseTimeframeError, Timeframe};
pub use exchange::ExchangeId;
pub use instruments::{Instrument, InstrumentId, InstrumentKind, ParseKindError, exact_decimal};

// Decimal type of the exact increment views
pub use rust_decimal::Decimal;
