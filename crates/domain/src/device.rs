//! Device: a hub or peripheral placed on the space.
//!
//! Records are created and mutated only through the
//! [`DeviceRegistry`](crate::registry::DeviceRegistry); the accessors here
//! are read-only.

mod kind;
mod slot;

pub use kind::{DeviceKind, DeviceStatus};
pub use slot::{SlotNumber, SlotRequest, SlotTable};

use serde::Serialize;

use crate::geometry::Position;
use crate::id::DeviceId;
use crate::label::Label;

/// The hub a peripheral is attached to, and on which slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubLink {
    pub hub: DeviceId,
    pub slot: SlotNumber,
}

/// A device placed on the space.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub(crate) id: DeviceId,
    pub(crate) status: DeviceStatus,
    pub(crate) position: Position,
    pub(crate) label: Label,
    pub(crate) hub_link: Option<HubLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) slots: Option<SlotTable>,
}

impl Device {
    pub(crate) fn new(id: DeviceId, position: Position) -> Self {
        let kind = id.kind();
        Self {
            id,
            status: kind.default_status(),
            position,
            label: Label::new(format!("{} {}", kind.label(), id.index())),
            hub_link: None,
            slots: kind.is_hub().then(SlotTable::default),
        }
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.id.kind()
    }

    #[must_use]
    pub fn index(&self) -> u32 {
        self.id.index()
    }

    #[must_use]
    pub fn is_hub(&self) -> bool {
        self.kind().is_hub()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.label.name
    }

    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Hub this device is attached to, if any.
    #[must_use]
    pub fn hub_link(&self) -> Option<HubLink> {
        self.hub_link
    }

    /// Peripherals attached to this device. `None` unless the device is a hub.
    #[must_use]
    pub fn slots(&self) -> Option<&SlotTable> {
        self.slots.as_ref()
    }
}
