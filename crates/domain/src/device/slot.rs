//! Hub slots ("pins") and the per-hub slot table.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// Attachment point of a peripheral on a hub. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotNumber(NonZeroU32);

impl SlotNumber {
    /// Returns `None` for zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How the slot of a new link is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotRequest {
    /// Smallest free slot on the hub.
    #[default]
    Auto,
    Explicit(SlotNumber),
}

impl From<SlotNumber> for SlotRequest {
    fn from(slot: SlotNumber) -> Self {
        Self::Explicit(slot)
    }
}

/// Peripherals held by a hub, keyed by slot.
///
/// Slot numbers are unique by construction; the registry guarantees that a
/// peripheral id never appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotTable {
    entries: BTreeMap<SlotNumber, DeviceId>,
}

impl SlotTable {
    #[must_use]
    pub fn occupant(&self, slot: SlotNumber) -> Option<DeviceId> {
        self.entries.get(&slot).copied()
    }

    #[must_use]
    pub fn slot_of(&self, peripheral: DeviceId) -> Option<SlotNumber> {
        self.entries
            .iter()
            .find_map(|(slot, id)| (*id == peripheral).then_some(*slot))
    }

    /// Smallest slot number not currently used, scanning upward from 1.
    #[must_use]
    pub fn first_free(&self) -> SlotNumber {
        let mut candidate = NonZeroU32::MIN;
        for slot in self.entries.keys() {
            if slot.0 != candidate {
                break;
            }
            candidate = candidate.saturating_add(1);
        }
        SlotNumber(candidate)
    }

    /// Entries in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotNumber, DeviceId)> + '_ {
        self.entries.iter().map(|(slot, id)| (*slot, *id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, slot: SlotNumber, peripheral: DeviceId) {
        self.entries.insert(slot, peripheral);
    }

    pub(crate) fn remove_peripheral(&mut self, peripheral: DeviceId) -> Option<SlotNumber> {
        let slot = self.slot_of(peripheral)?;
        self.entries.remove(&slot);
        Some(slot)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
