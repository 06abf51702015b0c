//! Live-update fan-out to connected viewers.

use tokio::sync::broadcast;
use tracing::{debug, instrument};

/// Receives the serialized match state after every published change.
///
/// Delivery is best-effort: implementations must not fail or block the
/// caller.
pub trait Broadcaster: Send + Sync {
    /// Pushes a serialized state to every listener.
    fn publish(&self, payload: String);
}

/// Broadcaster that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn publish(&self, _payload: String) {}
}

/// Fans payloads out over a `tokio` broadcast channel.
///
/// Each viewer holds its own receiver from [`ChannelBroadcaster::subscribe`];
/// a slow viewer lags and skips frames instead of holding up the sender.
#[derive(Debug, Clone)]
pub struct ChannelBroadcaster {
    sender: broadcast::Sender<String>,
}

impl ChannelBroadcaster {
    /// Creates a channel buffering up to `capacity` payloads per viewer.
    #[instrument]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Registers a new viewer.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Number of currently subscribed viewers.
    pub fn viewers(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Broadcaster for ChannelBroadcaster {
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    fn publish(&self, payload: String) {
        match self.sender.send(payload) {
            Ok(viewers) => debug!(viewers, "State published"),
            Err(_) => debug!("No viewers subscribed, dropping state"),
        }
    }
}
