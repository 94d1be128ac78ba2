//! Meridian Gateway
//!
//! Session layer for the Meridian reference-data client. Provides:
//! - Channel transport: a `Session` whose event queue supports a real
//!   blocking wait, plus the exchange-side endpoint that feeds it
//! - Exchange adapters (simulated exchange with instruments and candles,
//!   recorded replay)
//!
//! ## Architecture
//!
//! ```text
//!   Connector (caller thread, blocking)
//!         │ send(Request)          ▲ wait()/drain() -> Vec<Event>
//!    ┌────▼────────────────────────┴────┐
//!    │          ChannelSession          │
//!    └────┬────────────────────────▲────┘
//!         │ tokio mpsc             │ crossbeam
//!    ┌────▼────────────────────────┴────┐
//!    │   SessionEndpoint (tokio task)   │
//!    │   SimulatedExchange / real I/O   │
//!    └──────────────────────────────────┘
//! ```
//!
//! The connector side never needs a runtime; the exchange side runs on
//! whatever tokio runtime the application provides.

pub mod adapters;
pub mod error;
pub mod transport;

// Re-export commonly used types
pub use adapters::{
    replay::ReplaySession,
    simulator::{Behavior, SimulatedExchange, candle_element, element},
};
pub use error::{GatewayError, TransportError};
pub use transport::channel::{ChannelSession, SessionEndpoint};
