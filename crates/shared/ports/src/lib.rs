//! Meridian Ports
//!
//! Port definitions for the Meridian reference-data client.
//! These define the boundary between the connector logic and whatever
//! market-data session actually talks to an exchange.

mod error;
mod messages;
mod session;

pub use error::{SessionError, SessionResult};
pub use messages::{
    CandleList, CandleQuery, Element, Event, InstrumentList, Message, Operation, Request,
    Response, ResponseError,
};
pub use session::Session;
