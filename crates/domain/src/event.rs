//! Event: an immutable record of a change on the space.
//!
//! Events are produced after a mutation succeeds; rejected operations
//! publish nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, EventId};

/// UTC timestamp of an event.
pub type Timestamp = DateTime<Utc>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceEventType {
    DeviceAdded,
    DeviceRemoved,
    StatusChanged,
    LabelChanged,
    Connected,
    Disconnected,
    Moved,
    Relayout,
    PendingStarted,
    PendingEnded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceEvent {
    pub id: EventId,
    pub event_type: SpaceEventType,
    pub device_id: Option<DeviceId>,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl SpaceEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        event_type: SpaceEventType,
        device_id: Option<DeviceId>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            device_id,
            data,
            timestamp: Utc::now(),
        }
    }
}
