//! Event bus port — publish/subscribe for space events.

use minispace_domain::event::SpaceEvent;

/// Publishes space events to interested subscribers.
///
/// Publishing never fails from the caller's point of view: an event nobody
/// listens to is dropped.
pub trait EventPublisher {
    fn publish(&self, event: SpaceEvent);
}

impl<T: EventPublisher> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: SpaceEvent) {
        (**self).publish(event);
    }
}

impl<T: EventPublisher> EventPublisher for std::rc::Rc<T> {
    fn publish(&self, event: SpaceEvent) {
        (**self).publish(event);
    }
}
