//! Replay session - answers every request with a recorded event script
//!
//! Recordings are JSON arrays of events. Untagged responses in the script
//! are tagged with the correlation id of the request being answered, so a
//! recording made against one request replays against any later one.
//! Responses recorded with an explicit id keep it.
//!
//! The session also remembers the most recent requests it was sent
//! (`sent`), for tests and for inspecting what a recording was driven with.

use crate::error::GatewayError;
use log::debug;
use meridian_ports::{Event, Request, Session, SessionResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;

/// Requests kept by `ReplaySession::sent`; older ones are dropped
pub const SENT_HISTORY: usize = 256;

pub struct ReplaySession {
    name: String,
    script: Vec<Event>,
    queue: Mutex<VecDeque<Event>>,
    sent: Mutex<VecDeque<Request>>,
}

impl ReplaySession {
    pub fn new(name: impl Into<String>, script: Vec<Event>) -> Self {
        Self {
            name: name.into(),
            script,
            queue: Mutex::new(VecDeque::new()),
            sent: Mutex::new(VecDeque::new()),
        }
    }

    /// Load a recording from a JSON string
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, GatewayError> {
        let script: Vec<Event> = serde_json::from_str(json)?;
        Ok(Self::new(name, script))
    }

    /// Load a recording from a JSON file; the file stem names the session
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| GatewayError::Recording(format!("bad file name {}", path.display())))?
            .to_string();
        let content = std::fs::read_to_string(path)?;
        Self::from_json(name, &content)
    }

    /// The last `SENT_HISTORY` requests received, oldest first
    pub fn sent(&self) -> Vec<Request> {
        self.sent.lock().iter().cloned().collect()
    }
}

impl Session for ReplaySession {
    fn send(&self, request: Request) -> SessionResult<()> {
        debug!(
            "{} replaying {} events for {}",
            self.name,
            self.script.len(),
            request.correlation_id
        );

        let mut queue = self.queue.lock();
        for event in &self.script {
            let mut event = event.clone();
            if let Event::Response(response) = &mut event {
                response.correlation_id.get_or_insert(request.correlation_id);
            }
            queue.push_back(event);
        }
        drop(queue);

        let mut sent = self.sent.lock();
        if sent.len() == SENT_HISTORY {
            sent.pop_front();
        }
        sent.push_back(request);
        Ok(())
    }

    fn drain(&self) -> Vec<Event> {
        self.queue.lock().drain(..).collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
