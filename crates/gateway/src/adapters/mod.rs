//! Exchange adapters
//!
//! Adapters sit on the exchange side of a session and turn exchange
//! activity into session events.

pub mod replay;
pub mod simulator;
