//! Typed identifiers.
//!
//! A [`DeviceId`] is derived from the device kind and its index within that
//! kind (`RPI1`, `LED2`, …) and never changes once assigned. An [`EventId`]
//! is a random UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;
use crate::error::ParseError;

/// Unique identifier for a [`Device`](crate::device::Device) on the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DeviceId {
    kind: DeviceKind,
    index: u32,
}

impl DeviceId {
    /// Build the identifier of the `index`-th device of `kind`.
    #[must_use]
    pub fn new(kind: DeviceKind, index: u32) -> Self {
        Self { kind, index }
    }

    #[must_use]
    pub fn kind(self) -> DeviceKind {
        self.kind
    }

    /// Position of the device among devices of the same kind, starting at 1.
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.code(), self.index)
    }
}

impl FromStr for DeviceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::DeviceId(s.to_string());
        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(malformed)?;
        let (code, digits) = s.split_at(split);
        let kind = code.parse::<DeviceKind>().map_err(|_| malformed())?;
        let index = digits.parse::<u32>().map_err(|_| malformed())?;
        if index == 0 {
            return Err(malformed());
        }
        Ok(Self { kind, index })
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Unique identifier for a [`SpaceEvent`](crate::event::SpaceEvent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(uuid::Uuid);

impl Default for EventId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl EventId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
