//! Event bus port — publish/subscribe for state events.

use homedash_domain::event::StateEvent;

/// Publishes state events to interested subscribers.
///
/// Publishing is synchronous: subscribers are notified before the mutating
/// call that produced the event returns.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: StateEvent);
}

impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: StateEvent) {
        (**self).publish(event);
    }
}
