//! Normalized instrument reference data
//!
//! - `Instrument`: one tradable symbol on one exchange, uniform across venues
//! - `InstrumentKind`: spot pairs, dated futures, perpetual swaps, options

mod instrument;
mod kind;

pub use instrument::{Instrument, InstrumentId, exact_decimal};
pub use kind::{InstrumentKind, ParseKindError};
