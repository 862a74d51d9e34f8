//! Pending-connection mode.
//!
//! After a gesture on a hub, the hub becomes *pending*: tapping any other
//! device toggles that device's link to the hub. At most one hub on the
//! whole space is pending at a time.

use minispace_domain::device::SlotNumber;
use minispace_domain::id::DeviceId;
use minispace_domain::registry::DeviceRegistry;

/// Decoration the view shows on a device while a hub is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Tapping would link the device to the pending hub.
    Connectable,
    /// The device is linked to the pending hub; tapping would unlink it.
    Connected,
}

/// What a tap did while a hub was pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// No hub was pending.
    Ignored,
    /// The pending hub itself was tapped and pending mode ended.
    Exited,
    Connected(SlotNumber),
    Disconnected(SlotNumber),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingConnection {
    hub: Option<DeviceId>,
}

impl PendingConnection {
    #[must_use]
    pub fn hub(&self) -> Option<DeviceId> {
        self.hub
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.hub.is_some()
    }

    /// Make `hub` the pending hub and return the one it replaces, if any.
    pub fn begin(&mut self, hub: DeviceId) -> Option<DeviceId> {
        self.hub.replace(hub)
    }

    /// Leave pending mode and return the hub that was pending.
    pub fn end(&mut self) -> Option<DeviceId> {
        self.hub.take()
    }

    /// Decorations for every device other than the pending hub. Devices
    /// linked to a different hub get none.
    #[must_use]
    pub fn affordances(&self, registry: &DeviceRegistry) -> Vec<(DeviceId, Affordance)> {
        let Some(hub) = self.hub else {
            return Vec::new();
        };
        registry
            .iter()
            .filter(|device| device.id() != hub)
            .filter_map(|device| match device.hub_link() {
                Some(link) if link.hub == hub => Some((device.id(), Affordance::Connected)),
                Some(_) => None,
                None => Some((device.id(), Affordance::Connectable)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minispace_domain::device::{DeviceKind, SlotRequest};
    use minispace_domain::geometry::Position;
    use minispace_domain::identity::IndexPolicy;

    #[test]
    fn should_replace_previous_pending_hub() {
        let mut pending = PendingConnection::default();
        let a = DeviceId::new(DeviceKind::RaspberryPi, 1);
        let b = DeviceId::new(DeviceKind::RaspberryPi, 2);

        assert_eq!(pending.begin(a), None);
        assert_eq!(pending.begin(b), Some(a));
        assert_eq!(pending.hub(), Some(b));
        assert_eq!(pending.end(), Some(b));
        assert!(!pending.is_pending());
    }

    #[test]
    fn should_offer_nothing_when_not_pending() {
        let mut reg = DeviceRegistry::new(IndexPolicy::Compacting);
        reg.add(DeviceKind::Led, Position::default());
        assert!(PendingConnection::default().affordances(&reg).is_empty());
    }

    #[test]
    fn should_decorate_devices_by_link_state() {
        let mut reg = DeviceRegistry::new(IndexPolicy::Compacting);
        let hub = reg.add(DeviceKind::RaspberryPi, Position::default()).id();
        let other_hub = reg.add(DeviceKind::RaspberryPi, Position::default()).id();
        let linked = reg.add(DeviceKind::Led, Position::default()).id();
        let elsewhere = reg.add(DeviceKind::Led, Position::default()).id();
        let free = reg.add(DeviceKind::Lamp, Position::default()).id();
        reg.connect(hub, linked, SlotRequest::Auto).unwrap();
        reg.connect(other_hub, elsewhere, SlotRequest::Auto).unwrap();

        let mut pending = PendingConnection::default();
        pending.begin(hub);

        assert_eq!(
            pending.affordances(&reg),
            vec![
                (other_hub, Affordance::Connectable),
                (linked, Affordance::Connected),
                (free, Affordance::Connectable),
            ]
        );
    }
}
