//! Channel-based session for single-process mode
//!
//! `ChannelSession` is the consumer half handed to a connector.
//! `SessionEndpoint` is the exchange half, driven by a tokio task.
//! No serialization overhead - messages are passed directly.

use crate::error::TransportError;
use crossbeam_channel::{self as crossbeam, RecvTimeoutError};
use meridian_ports::{Event, Message, Request, Response, Session, SessionError, SessionResult};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Consumer side of a channel session
pub struct ChannelSession {
    name: String,
    requests: mpsc::UnboundedSender<Request>,
    events: crossbeam::Receiver<Event>,
}

impl ChannelSession {
    /// Create a connected session/endpoint pair
    pub fn pair(name: impl Into<String>) -> (Self, SessionEndpoint) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = crossbeam::unbounded();

        let session = Self {
            name: name.into(),
            requests: request_tx,
            events: event_rx,
        };
        let endpoint = SessionEndpoint {
            requests: request_rx,
            events: event_tx,
        };
        (session, endpoint)
    }
}

impl Session for ChannelSession {
    fn send(&self, request: Request) -> SessionResult<()> {
        self.requests.send(request).map_err(|_| SessionError::Closed)
    }

    fn drain(&self) -> Vec<Event> {
        self.events.try_iter().collect()
    }

    fn wait(&self, timeout: Duration) -> Vec<Event> {
        match self.events.recv_timeout(timeout) {
            Ok(first) => {
                let mut events = vec![first];
                events.extend(self.events.try_iter());
                events
            }
            Err(RecvTimeoutError::Timeout) => Vec::new(),
            Err(RecvTimeoutError::Disconnected) => {
                // Nothing can arrive any more; keep the caller's pacing
                std::thread::sleep(timeout);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Exchange side of a channel session
pub struct SessionEndpoint {
    requests: mpsc::UnboundedReceiver<Request>,
    events: crossbeam::Sender<Event>,
}

impl SessionEndpoint {
    /// Wait for the next request. `None` once the session is dropped.
    pub async fn next_request(&mut self) -> Option<Request> {
        self.requests.recv().await
    }

    /// Try to receive a request without waiting
    pub fn try_next_request(&mut self) -> Result<Option<Request>, TransportError> {
        match self.requests.try_recv() {
            Ok(request) => Ok(Some(request)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::ChannelClosed),
        }
    }

    /// Enqueue an event for the consumer
    pub fn publish(&self, event: impl Into<Event>) -> Result<(), TransportError> {
        self.events
            .send(event.into())
            .map_err(|_| TransportError::ChannelClosed)
    }

    /// Answer a request with messages tagged by its correlation id
    pub fn reply(&self, request: &Request, messages: Vec<Message>) -> Result<(), TransportError> {
        self.publish(Response::to(request, messages))
    }
}
