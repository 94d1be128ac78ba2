//! Wire types exchanged with a session
//!
//! A request asks one exchange for something. The session answers
//! asynchronously with events; a response event carries one or more
//! messages. Every type here is serde-serializable so sessions can be
//! recorded and replayed.

use meridian_core::{ExchangeId, Timeframe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Raw instrument description: exchange field name to string value
pub type Element = BTreeMap<String, String>;

/// Operations a session can be asked to perform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    GetInstruments,
    GetHistoricalCandles(CandleQuery),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetInstruments => "get_instruments",
            Operation::GetHistoricalCandles(_) => "get_historical_candles",
        }
    }
}

/// One batch of historical candles
///
/// Bounds are bar open times in epoch milliseconds, both inclusive. A
/// missing bound leaves that side to the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandleQuery {
    pub instrument: String,
    pub timeframe: Timeframe,
    #[serde(default)]
    pub start_ms: Option<u64>,
    #[serde(default)]
    pub end_ms: Option<u64>,
    /// Most candles wanted in one batch
    pub limit: u32,
}

impl CandleQuery {
    pub fn new(instrument: impl Into<String>, timeframe: Timeframe, limit: u32) -> Self {
        Self {
            instrument: instrument.into(),
            timeframe,
            start_ms: None,
            end_ms: None,
            limit,
        }
    }

    pub fn starting_at(mut self, start_ms: Option<u64>) -> Self {
        self.start_ms = start_ms;
        self
    }

    pub fn ending_at(mut self, end_ms: Option<u64>) -> Self {
        self.end_ms = end_ms;
        self
    }
}

/// Request submitted to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Echoed back on responses so callers can match them up
    pub correlation_id: Uuid,
    pub exchange: ExchangeId,
    pub operation: Operation,
}

impl Request {
    pub fn new(exchange: impl Into<ExchangeId>, operation: Operation) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            exchange: exchange.into(),
            operation,
        }
    }

    /// Request for the full instrument list of an exchange
    pub fn get_instruments(exchange: impl Into<ExchangeId>) -> Self {
        Self::new(exchange, Operation::GetInstruments)
    }

    /// Request for one batch of candles
    pub fn get_historical_candles(exchange: impl Into<ExchangeId>, query: CandleQuery) -> Self {
        Self::new(exchange, Operation::GetHistoricalCandles(query))
    }
}

/// Unit of asynchronous delivery from a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Answer to a request
    Response(Response),
    /// Connectivity notices and anything else that is not an answer
    Status { detail: String },
}

impl Event {
    pub fn is_response(&self) -> bool {
        matches!(self, Event::Response(_))
    }
}

/// Messages answering one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// `None` for sessions that do not echo correlation ids
    #[serde(default)]
    pub correlation_id: Option<Uuid>,
    pub messages: Vec<Message>,
}

impl Response {
    /// Response tagged with the id of the request it answers
    pub fn to(request: &Request, messages: Vec<Message>) -> Self {
        Self {
            correlation_id: Some(request.correlation_id),
            messages,
        }
    }

    pub fn untagged(messages: Vec<Message>) -> Self {
        Self {
            correlation_id: None,
            messages,
        }
    }

    /// Whether this response may belong to the given request
    pub fn answers(&self, correlation_id: Uuid) -> bool {
        self.correlation_id.is_none_or(|id| id == correlation_id)
    }
}

impl From<Response> for Event {
    fn from(response: Response) -> Self {
        Event::Response(response)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    InstrumentList(InstrumentList),
    CandleList(CandleList),
    ResponseError(ResponseError),
    /// Any message kind the instrument flow does not act on
    Other { kind: String },
}

/// One page of an exchange's instrument catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentList {
    pub elements: Vec<Element>,
    /// More pages follow in later messages
    #[serde(default)]
    pub has_more: bool,
}

impl InstrumentList {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            has_more: false,
        }
    }

    pub fn page(elements: Vec<Element>, has_more: bool) -> Self {
        Self { elements, has_more }
    }
}

/// One batch of candles, one element per bar
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandleList {
    pub elements: Vec<Element>,
}

impl CandleList {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

/// Error reported by the exchange for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub details: String,
}

impl ResponseError {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }
}
