//! Connection manager: links between hubs and peripherals.
//!
//! A link is stored twice: as an entry in the hub's [`SlotTable`] and as
//! the peripheral's [`HubLink`]. Every operation here either updates both
//! sides or neither:
//!
//! - a peripheral has a `HubLink` exactly when its hub's table holds it,
//! - a table never holds the same peripheral twice,
//! - a peripheral is attached to at most one hub.
//!
//! Moving a peripheral to another hub takes a `disconnect` followed by a
//! `connect`; `connect` never re-points an existing link.

use serde::Serialize;

use crate::device::{Device, HubLink, SlotNumber, SlotRequest, SlotTable};
use crate::error::SpaceError;
use crate::id::DeviceId;
use crate::registry::DeviceRegistry;

/// One hub → peripheral link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub hub: DeviceId,
    pub peripheral: DeviceId,
    pub slot: SlotNumber,
}

impl DeviceRegistry {
    /// Attach `peripheral_id` to `hub_id` and return the slot it got.
    ///
    /// Checks run in this order and the first failure wins: both ids
    /// exist, the hub is hub-kind, the two differ, the peripheral is not
    /// linked anywhere, the requested slot is free.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`], [`SpaceError::NotAHub`],
    /// [`SpaceError::SelfLink`], [`SpaceError::AlreadyLinked`] or
    /// [`SpaceError::SlotTaken`]; state is unchanged on error.
    pub fn connect(
        &mut self,
        hub_id: DeviceId,
        peripheral_id: DeviceId,
        request: SlotRequest,
    ) -> Result<SlotNumber, SpaceError> {
        let hub = self.require(hub_id)?;
        let peripheral = self.require(peripheral_id)?;
        let Some(slots) = hub.slots() else {
            return Err(SpaceError::NotAHub {
                id: hub_id,
                kind: hub.kind(),
            });
        };
        if hub_id == peripheral_id {
            return Err(SpaceError::SelfLink { id: hub_id });
        }
        if let Some(existing) = peripheral.hub_link() {
            return Err(SpaceError::AlreadyLinked {
                peripheral: peripheral_id,
                hub: existing.hub,
            });
        }
        let slot = match request {
            SlotRequest::Auto => slots.first_free(),
            SlotRequest::Explicit(slot) => match slots.occupant(slot) {
                Some(occupant) => {
                    return Err(SpaceError::SlotTaken {
                        hub: hub_id,
                        slot,
                        occupant,
                    });
                }
                None => slot,
            },
        };

        if let Some(table) = self.slots_mut(hub_id) {
            table.insert(slot, peripheral_id);
        }
        if let Some(peripheral) = self.devices.get_mut(&peripheral_id) {
            peripheral.hub_link = Some(HubLink { hub: hub_id, slot });
        }
        debug_assert!(self.links_consistent());
        Ok(slot)
    }

    /// Detach `peripheral_id` from `hub_id`, returning the slot it held.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when either id is missing and
    /// [`SpaceError::NotLinked`] when the hub does not hold the peripheral.
    pub fn disconnect(
        &mut self,
        hub_id: DeviceId,
        peripheral_id: DeviceId,
    ) -> Result<SlotNumber, SpaceError> {
        self.require(hub_id)?;
        self.require(peripheral_id)?;
        let slot = self
            .slots_mut(hub_id)
            .and_then(|table| table.remove_peripheral(peripheral_id))
            .ok_or(SpaceError::NotLinked {
                hub: hub_id,
                peripheral: peripheral_id,
            })?;
        if let Some(peripheral) = self.devices.get_mut(&peripheral_id) {
            peripheral.hub_link = None;
        }
        debug_assert!(self.links_consistent());
        Ok(slot)
    }

    /// Cut every link of a device that is about to be removed and return
    /// the links that were cut. Peripherals that no longer exist are skipped.
    pub(crate) fn teardown_for_deleted_device(&mut self, id: DeviceId) -> Vec<Link> {
        let Some(device) = self.devices.get_mut(&id) else {
            return Vec::new();
        };
        let upstream = device.hub_link.take();
        let downstream: Vec<_> = device
            .slots
            .as_mut()
            .map(|table| {
                let entries: Vec<_> = table.iter().collect();
                table.clear();
                entries
            })
            .unwrap_or_default();

        let mut severed = Vec::with_capacity(downstream.len() + 1);
        if let Some(link) = upstream {
            if let Some(table) = self.slots_mut(link.hub) {
                table.remove_peripheral(id);
            }
            severed.push(Link {
                hub: link.hub,
                peripheral: id,
                slot: link.slot,
            });
        }
        for (slot, peripheral_id) in downstream {
            if let Some(peripheral) = self.devices.get_mut(&peripheral_id) {
                peripheral.hub_link = None;
                severed.push(Link {
                    hub: id,
                    peripheral: peripheral_id,
                    slot,
                });
            }
        }
        severed
    }

    /// Every link, hubs in registry order and slots ascending.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.iter().flat_map(|hub| {
            let hub_id = hub.id();
            hub.slots()
                .into_iter()
                .flat_map(SlotTable::iter)
                .map(move |(slot, peripheral)| Link {
                    hub: hub_id,
                    peripheral,
                    slot,
                })
        })
    }

    /// Whether every slot entry is mirrored by the peripheral's `HubLink`
    /// and every `HubLink` by a slot entry.
    #[must_use]
    pub fn links_consistent(&self) -> bool {
        let forward = self.devices.values().all(|hub| {
            hub.slots().is_none_or(|table| {
                table.iter().all(|(slot, peripheral)| {
                    self.devices.get(&peripheral).and_then(Device::hub_link)
                        == Some(HubLink { hub: hub.id(), slot })
                })
            })
        });
        let backward = self.devices.values().all(|peripheral| {
            peripheral.hub_link().is_none_or(|link| {
                self.devices
                    .get(&link.hub)
                    .and_then(Device::slots)
                    .and_then(|table| table.occupant(link.slot))
                    == Some(peripheral.id())
            })
        });
        forward && backward
    }

    fn slots_mut(&mut self, hub_id: DeviceId) -> Option<&mut SlotTable> {
        self.devices
            .get_mut(&hub_id)
            .and_then(|hub| hub.slots.as_mut())
    }
}
