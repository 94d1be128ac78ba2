//! Simulated exchange - answers instrument and candle requests
//!
//! Runs as a tokio task on the exchange side of a `ChannelSession`,
//! the way a real market-data session delivers responses from its own
//! I/O threads.

use super::candle_element;
use crate::error::TransportError;
use crate::transport::channel::{ChannelSession, SessionEndpoint};
use log::{debug, info, warn};
use meridian_core::{Candle, ExchangeId};
use meridian_ports::{
    CandleList, CandleQuery, Element, Event, InstrumentList, Message, Operation, Request,
    Response, ResponseError,
};
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// How the simulated exchange answers an instrument request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// Whole catalog in a single instrument list
    Respond,
    /// Catalog split over several lists of at most `page_size` elements
    Paginate { page_size: usize },
    /// Exchange-reported error
    Reject { details: String },
    /// Never answer
    Silent,
}

/// Simulated exchange serving one instrument catalog and candle history
#[derive(Debug, Clone)]
pub struct SimulatedExchange {
    exchange: ExchangeId,
    catalog: Vec<Element>,
    candles: HashMap<String, Vec<Candle>>,
    behavior: Behavior,
    latency: Duration,
    noise: bool,
    tag_responses: bool,
}

impl SimulatedExchange {
    pub fn new(exchange: impl Into<ExchangeId>, catalog: Vec<Element>) -> Self {
        Self {
            exchange: exchange.into(),
            catalog,
            candles: HashMap::new(),
            behavior: Behavior::Respond,
            latency: Duration::ZERO,
            noise: false,
            tag_responses: true,
        }
    }

    /// Candle history for one instrument, in any order
    pub fn with_candles(mut self, instrument: impl Into<String>, candles: Vec<Candle>) -> Self {
        self.candles.insert(instrument.into(), candles);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Delay before each answer
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Precede every answer with a status event and an unrelated message
    pub fn with_noise(mut self, noise: bool) -> Self {
        self.noise = noise;
        self
    }

    /// Answer without echoing correlation ids
    pub fn untagged(mut self) -> Self {
        self.tag_responses = false;
        self
    }

    /// Spawn the exchange task on `handle` and return the consumer session
    pub fn connect(self, handle: &Handle) -> ChannelSession {
        let (session, endpoint) = ChannelSession::pair(format!("simulated-{}", self.exchange));
        handle.spawn(self.run(endpoint));
        session
    }

    /// Spawn the exchange task on the current runtime
    pub fn spawn(self, endpoint: SessionEndpoint) -> JoinHandle<()> {
        tokio::spawn(self.run(endpoint))
    }

    /// Serve requests until the session is dropped
    pub async fn run(self, mut endpoint: SessionEndpoint) {
        info!("Simulated exchange {} started", self.exchange);

        while let Some(request) = endpoint.next_request().await {
            debug!(
                "{} received {} ({})",
                self.exchange,
                request.operation.name(),
                request.correlation_id
            );

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            if let Err(e) = self.answer(&endpoint, &request) {
                warn!("Simulated exchange {} stopping: {}", self.exchange, e);
                break;
            }
        }

        info!("Simulated exchange {} stopped", self.exchange);
    }

    fn answer(&self, endpoint: &SessionEndpoint, request: &Request) -> Result<(), TransportError> {
        if self.noise {
            endpoint.publish(Event::Status {
                detail: "heartbeat".to_string(),
            })?;
            let ack = Message::Other {
                kind: "ack".to_string(),
            };
            self.respond(endpoint, request, vec![ack])?;
        }

        if request.exchange != self.exchange {
            let error = ResponseError::new(format!("unknown exchange {}", request.exchange));
            return self.respond(endpoint, request, vec![Message::ResponseError(error)]);
        }

        match &request.operation {
            Operation::GetInstruments => self.answer_instruments(endpoint, request),
            Operation::GetHistoricalCandles(query) => self.answer_candles(endpoint, request, query),
        }
    }

    fn answer_instruments(
        &self,
        endpoint: &SessionEndpoint,
        request: &Request,
    ) -> Result<(), TransportError> {
        match &self.behavior {
            Behavior::Respond => {
                let list = InstrumentList::new(self.catalog.clone());
                self.respond(endpoint, request, vec![Message::InstrumentList(list)])
            }
            Behavior::Paginate { page_size } => {
                let pages: Vec<&[Element]> = if self.catalog.is_empty() {
                    vec![self.catalog.as_slice()]
                } else {
                    self.catalog.chunks((*page_size).max(1)).collect()
                };
                let last = pages.len() - 1;
                for (i, page) in pages.into_iter().enumerate() {
                    let list = InstrumentList::page(page.to_vec(), i < last);
                    self.respond(endpoint, request, vec![Message::InstrumentList(list)])?;
                }
                Ok(())
            }
            Behavior::Reject { details } => {
                let error = ResponseError::new(details.clone());
                self.respond(endpoint, request, vec![Message::ResponseError(error)])
            }
            Behavior::Silent => {
                debug!("{} staying silent", self.exchange);
                Ok(())
            }
        }
    }

    /// Bars inside the query bounds, at most `limit` of them: the oldest when
    /// a start is given, otherwise the newest, sent newest first.
    fn answer_candles(
        &self,
        endpoint: &SessionEndpoint,
        request: &Request,
        query: &CandleQuery,
    ) -> Result<(), TransportError> {
        match &self.behavior {
            Behavior::Reject { details } => {
                let error = ResponseError::new(details.clone());
                return self.respond(endpoint, request, vec![Message::ResponseError(error)]);
            }
            Behavior::Silent => return Ok(()),
            Behavior::Respond | Behavior::Paginate { .. } => {}
        }

        let Some(series) = self.candles.get(&query.instrument) else {
            let error = ResponseError::new(format!("unknown instrument {}", query.instrument));
            return self.respond(endpoint, request, vec![Message::ResponseError(error)]);
        };

        let mut bars: Vec<&Candle> = series
            .iter()
            .filter(|c| c.within(query.start_ms, query.end_ms))
            .collect();
        bars.sort_by_key(|c| c.timestamp);

        let limit = (query.limit as usize).max(1);
        let batch: Vec<&Candle> = if query.start_ms.is_some() {
            bars.into_iter().take(limit).collect()
        } else {
            bars.into_iter().rev().take(limit).collect()
        };

        let elements = batch.into_iter().map(candle_element).collect();
        let list = CandleList::new(elements);
        self.respond(endpoint, request, vec![Message::CandleList(list)])
    }

    fn respond(
        &self,
        endpoint: &SessionEndpoint,
        request: &Request,
        messages: Vec<Message>,
    ) -> Result<(), TransportError> {
        let response = if self.tag_responses {
            Response::to(request, messages)
        } else {
            Response::untagged(messages)
        };
        endpoint.publish(response)
    }
}
