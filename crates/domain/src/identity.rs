//! Identity allocator: picks the index of a newly added device.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind};
use crate::id::DeviceId;

/// How indices are chosen for new devices of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// One past the highest index among surviving devices of the kind.
    /// Deleting the newest device frees its number for the next one.
    #[default]
    Compacting,
    /// Never hand out a number twice during the session.
    Monotonic,
}

impl FromStr for IndexPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compacting" => Ok(Self::Compacting),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(format!("unknown index policy {other:?}")),
        }
    }
}

/// One more than the highest index of `kind` among `devices`, or `1`.
pub fn next_index<'a>(kind: DeviceKind, devices: impl IntoIterator<Item = &'a Device>) -> u32 {
    devices
        .into_iter()
        .filter(|device| device.kind() == kind)
        .map(Device::index)
        .max()
        .map_or(1, |highest| highest + 1)
}

#[derive(Debug, Clone, Default)]
pub struct IdentityAllocator {
    policy: IndexPolicy,
    high_water: HashMap<DeviceKind, u32>,
}

impl IdentityAllocator {
    #[must_use]
    pub fn new(policy: IndexPolicy) -> Self {
        Self {
            policy,
            high_water: HashMap::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Pick the id of the next device of `kind` given the devices alive now.
    pub fn allocate<'a>(
        &mut self,
        kind: DeviceKind,
        devices: impl IntoIterator<Item = &'a Device>,
    ) -> DeviceId {
        let from_survivors = next_index(kind, devices);
        let index = match self.policy {
            IndexPolicy::Compacting => from_survivors,
            IndexPolicy::Monotonic => {
                let issued = self.high_water.get(&kind).copied().unwrap_or(0);
                from_survivors.max(issued + 1)
            }
        };
        self.high_water.insert(kind, index);
        DeviceId::new(kind, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    fn bulb(index: u32) -> Device {
        Device::new(DeviceId::new(DeviceKind::Bulb, index), Position::default())
    }

    #[test]
    fn should_start_at_one_when_no_device_of_kind() {
        let lamp = Device::new(DeviceId::new(DeviceKind::Lamp, 4), Position::default());
        assert_eq!(next_index(DeviceKind::Bulb, [&lamp]), 1);
    }

    #[test]
    fn should_follow_highest_surviving_index() {
        let devices = [bulb(1), bulb(3)];
        assert_eq!(next_index(DeviceKind::Bulb, &devices), 4);
    }

    #[test]
    fn should_reuse_number_of_deleted_newest_device_when_compacting() {
        let mut allocator = IdentityAllocator::new(IndexPolicy::Compacting);
        let first = bulb(1);
        assert_eq!(allocator.allocate(DeviceKind::Bulb, [&first]).index(), 2);
        // BULB2 was deleted before the next add
        assert_eq!(allocator.allocate(DeviceKind::Bulb, [&first]).index(), 2);
    }

    #[test]
    fn should_never_reuse_number_when_monotonic() {
        let mut allocator = IdentityAllocator::new(IndexPolicy::Monotonic);
        let first = bulb(1);
        assert_eq!(allocator.allocate(DeviceKind::Bulb, [&first]).index(), 2);
        assert_eq!(allocator.allocate(DeviceKind::Bulb, [&first]).index(), 3);
        assert_eq!(allocator.allocate(DeviceKind::Lamp, std::iter::empty::<&Device>()).index(), 1);
    }

    #[test]
    fn should_parse_policy_names() {
        assert_eq!("Monotonic".parse::<IndexPolicy>(), Ok(IndexPolicy::Monotonic));
        assert!("sometimes".parse::<IndexPolicy>().is_err());
    }
}
