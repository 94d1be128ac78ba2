use std::time::Duration;

use crate::error::SessionResult;
use crate::messages::{Event, Request};

/// Port for an exchange market-data session
///
/// A session owns the connectivity to one exchange. Requests go in through
/// `send`; answers come back later as events, delivered by whatever
/// background I/O the implementation runs. Implementations must be safe
/// to share between threads.
pub trait Session: Send + Sync {
    /// Submit a request. Never blocks on the exchange.
    fn send(&self, request: Request) -> SessionResult<()>;

    /// Remove and return every queued event (possibly none). Never blocks.
    fn drain(&self) -> Vec<Event>;

    /// Wait up to `timeout` for events, then return everything queued.
    ///
    /// The default sleeps once when the queue is empty. Sessions backed by
    /// a channel should override this with a real blocking receive.
    fn wait(&self, timeout: Duration) -> Vec<Event> {
        let events = self.drain();
        if !events.is_empty() {
            return events;
        }
        std::thread::sleep(timeout);
        self.drain()
    }

    /// Get the session's name for logging
    fn name(&self) -> &str {
        "Session"
    }
}
