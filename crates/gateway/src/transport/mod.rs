//! Transport layer
//!
//! Channels connecting a blocking session consumer to an async exchange
//! side. Requests travel over tokio mpsc so the exchange side can await
//! them; events travel over crossbeam so the consumer can block on them
//! with a timeout without owning a runtime.

pub mod channel;
