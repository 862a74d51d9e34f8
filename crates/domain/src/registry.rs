//! Device registry: the authoritative, ordered collection of devices.
//!
//! Every mutation of a device record goes through this type. Link
//! operations live in [`connection`](crate::connection) as further
//! `impl DeviceRegistry` blocks.

use std::collections::HashMap;

use crate::connection::Link;
use crate::device::{Device, DeviceKind, DeviceStatus};
use crate::error::SpaceError;
use crate::geometry::Position;
use crate::id::DeviceId;
use crate::identity::{IdentityAllocator, IndexPolicy};
use crate::label::WatchedProperty;

/// A device taken off the space, with the links that were cut to remove it.
#[derive(Debug, Clone)]
pub struct Removal {
    pub device: Device,
    pub severed: Vec<Link>,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    pub(crate) devices: HashMap<DeviceId, Device>,
    order: Vec<DeviceId>,
    allocator: IdentityAllocator,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new(policy: IndexPolicy) -> Self {
        Self {
            devices: HashMap::new(),
            order: Vec::new(),
            allocator: IdentityAllocator::new(policy),
        }
    }

    /// Create a device of `kind` at `position` and append it to the space.
    pub fn add(&mut self, kind: DeviceKind, position: Position) -> &Device {
        let id = self.allocator.allocate(kind, self.devices.values());
        self.order.push(id);
        self.devices
            .entry(id)
            .or_insert_with(|| Device::new(id, position))
    }

    #[must_use]
    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Like [`get`](Self::get) but reports a missing device as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    pub fn require(&self, id: DeviceId) -> Result<&Device, SpaceError> {
        self.devices.get(&id).ok_or(SpaceError::UnknownDevice { id })
    }

    fn require_mut(&mut self, id: DeviceId) -> Result<&mut Device, SpaceError> {
        self.devices
            .get_mut(&id)
            .ok_or(SpaceError::UnknownDevice { id })
    }

    #[must_use]
    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices.contains_key(&id)
    }

    /// Devices in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Device> + '_ {
        self.order.iter().filter_map(|id| self.devices.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn count_of_kind(&self, kind: DeviceKind) -> usize {
        self.devices.values().filter(|d| d.kind() == kind).count()
    }

    /// Cut every link involving `id`, then drop the record.
    /// Unknown ids are ignored.
    pub fn remove(&mut self, id: DeviceId) -> Option<Removal> {
        if !self.devices.contains_key(&id) {
            return None;
        }
        let severed = self.teardown_for_deleted_device(id);
        let device = self.devices.remove(&id)?;
        self.order.retain(|other| *other != id);
        debug_assert!(self.links_consistent());
        Some(Removal { device, severed })
    }

    /// Switch a device to `status`, returning the previous status.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] or, when the kind does not
    /// support `status`, [`SpaceError::InvalidStatus`].
    pub fn change_status(
        &mut self,
        id: DeviceId,
        status: DeviceStatus,
    ) -> Result<DeviceStatus, SpaceError> {
        let device = self.require_mut(id)?;
        if !device.kind().accepts(status) {
            return Err(SpaceError::InvalidStatus { id, status });
        }
        Ok(std::mem::replace(&mut device.status, status))
    }

    /// Change the display name. The id is unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    pub fn rename(&mut self, id: DeviceId, name: impl Into<String>) -> Result<(), SpaceError> {
        self.require_mut(id)?.label.name = name.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    pub fn set_comment(
        &mut self,
        id: DeviceId,
        comment: impl Into<String>,
    ) -> Result<(), SpaceError> {
        self.require_mut(id)?.label.comment = comment.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    pub fn watch(&mut self, id: DeviceId, property: WatchedProperty) -> Result<(), SpaceError> {
        self.require_mut(id)?.label.watch(property);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    pub fn move_to(&mut self, id: DeviceId, position: Position) -> Result<(), SpaceError> {
        self.require_mut(id)?.position = position;
        Ok(())
    }
}
