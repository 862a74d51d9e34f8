//! Common error types used across the workspace.
//!
//! Every failure here is recoverable: the rejected operation leaves the
//! space exactly as it was and the caller decides whether to tell the user.

use crate::device::{DeviceKind, DeviceStatus, SlotNumber};
use crate::id::DeviceId;

/// A rejected operation on the space.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpaceError {
    #[error("no device with id {id} on the space")]
    UnknownDevice { id: DeviceId },

    #[error("{id} is a {kind} and cannot accept peripherals")]
    NotAHub { id: DeviceId, kind: DeviceKind },

    #[error("{id} cannot be linked to itself")]
    SelfLink { id: DeviceId },

    #[error("{peripheral} is already linked to {hub}")]
    AlreadyLinked { peripheral: DeviceId, hub: DeviceId },

    #[error("{peripheral} is not linked to {hub}")]
    NotLinked { hub: DeviceId, peripheral: DeviceId },

    #[error("slot {slot} on {hub} is already used by {occupant}")]
    SlotTaken {
        hub: DeviceId,
        slot: SlotNumber,
        occupant: DeviceId,
    },

    #[error("{status} is not a valid status for {id}")]
    InvalidStatus { id: DeviceId, status: DeviceStatus },
}

/// Failure to parse a textual identifier or keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown device kind {0:?}")]
    Kind(String),

    #[error("unknown device status {0:?}")]
    Status(String),

    #[error("malformed device id {0:?}")]
    DeviceId(String),

    #[error("unknown label property {0:?}")]
    WatchedProperty(String),
}
