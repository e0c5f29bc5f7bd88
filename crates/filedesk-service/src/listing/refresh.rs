//! Refresh notifications published after mutations.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use filedesk_core::events::DriveEvent;

/// The latest refresh request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshTick {
    /// Incremented once per notification.
    pub generation: u64,
    /// What triggered it.
    pub event: Option<DriveEvent>,
}

/// Broadcasts "the listing is stale" to whoever displays it.
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    tx: Arc<watch::Sender<RefreshTick>>,
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshSignal {
    /// Creates a signal at generation zero.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RefreshTick::default());
        Self { tx: Arc::new(tx) }
    }

    /// Publish one refresh.
    pub fn notify(&self, event: DriveEvent) {
        debug!(?event, "Refresh requested");
        self.tx.send_modify(|tick| {
            tick.generation += 1;
            tick.event = Some(event);
        });
    }

    /// Number of refreshes published so far.
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    /// The most recent tick.
    pub fn latest(&self) -> RefreshTick {
        self.tx.borrow().clone()
    }

    /// Receive subsequent ticks.
    pub fn subscribe(&self) -> watch::Receiver<RefreshTick> {
        self.tx.subscribe()
    }
}
