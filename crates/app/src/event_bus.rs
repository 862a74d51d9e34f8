//! Space events fanned out over a tokio broadcast channel.

use tokio::sync::broadcast;

use minispace_domain::event::SpaceEvent;

use crate::ports::EventPublisher;

/// Publisher handed to the space service. Every subscriber gets its own
/// copy of each event; a slow subscriber misses the oldest ones once
/// `capacity` events are queued for it.
pub struct InProcessEventBus {
    sender: broadcast::Sender<SpaceEvent>,
}

impl InProcessEventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SpaceEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: SpaceEvent) {
        // send only fails when nobody is subscribed
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use minispace_domain::device::DeviceKind;
    use minispace_domain::event::SpaceEventType;
    use minispace_domain::id::DeviceId;
    use serde_json::json;
    use tokio::sync::broadcast::error::RecvError;

    fn led(index: u32) -> Option<DeviceId> {
        Some(DeviceId::new(DeviceKind::Led, index))
    }

    #[tokio::test]
    async fn should_carry_link_payload_through_shared_bus() {
        let bus = Arc::new(InProcessEventBus::new(16));
        let mut rx = bus.subscribe();
        let publisher: Arc<InProcessEventBus> = Arc::clone(&bus);

        publisher.publish(SpaceEvent::new(
            SpaceEventType::Connected,
            led(1),
            json!({ "hub": "RPI1", "slot": 2 }),
        ));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type, SpaceEventType::Connected);
        assert_eq!(received.device_id, led(1));
        assert_eq!(received.data["hub"], "RPI1");
        assert_eq!(received.data["slot"], 2);
    }

    #[tokio::test]
    async fn should_keep_publication_order_for_every_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut console = bus.subscribe();
        let mut log = bus.subscribe();

        for event_type in [
            SpaceEventType::PendingStarted,
            SpaceEventType::Connected,
            SpaceEventType::PendingEnded,
        ] {
            bus.publish(SpaceEvent::new(event_type, led(1), json!({})));
        }

        for rx in [&mut console, &mut log] {
            let mut seen = Vec::new();
            while let Ok(event) = rx.try_recv() {
                seen.push(event.event_type);
            }
            assert_eq!(
                seen,
                [
                    SpaceEventType::PendingStarted,
                    SpaceEventType::Connected,
                    SpaceEventType::PendingEnded,
                ]
            );
        }
    }

    #[test]
    fn should_drop_events_when_nobody_listens() {
        let bus = InProcessEventBus::new(1);
        bus.publish(SpaceEvent::new(SpaceEventType::Relayout, None, json!({})));
        bus.publish(SpaceEvent::new(SpaceEventType::Relayout, None, json!({})));
    }

    #[tokio::test]
    async fn should_report_skipped_events_to_lagging_subscriber() {
        let bus = InProcessEventBus::new(2);
        let mut rx = bus.subscribe();

        for index in 1..=3 {
            bus.publish(SpaceEvent::new(SpaceEventType::DeviceAdded, led(index), json!({})));
        }

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(1))));
        assert_eq!(rx.recv().await.unwrap().device_id, led(2));
        assert_eq!(rx.recv().await.unwrap().device_id, led(3));
    }
}
