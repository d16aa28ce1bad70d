//! In-process event bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use homedash_domain::event::StateEvent;

use crate::ports::EventPublisher;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<StateEvent>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; configuration validation rejects that
    /// value before the bus is built.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.sender.subscribe()
    }

    /// Same as [`subscribe`](Self::subscribe), wrapped as a `Stream`.
    ///
    /// Lagging subscribers see a `Lagged` error item instead of the dropped
    /// events.
    #[must_use]
    pub fn stream(&self) -> BroadcastStream<StateEvent> {
        BroadcastStream::new(self.sender.subscribe())
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: StateEvent) {
        // broadcast::send fails only when there are zero receivers,
        // which is fine: nobody is listening.
        let _ = self.sender.send(event);
    }
}
