//! Device kinds and the statuses each kind can take.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Operational status of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceStatus {
    Off,
    On,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("OFF"),
            Self::On => f.write_str("ON"),
        }
    }
}

impl FromStr for DeviceStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Ok(Self::Off),
            "ON" => Ok(Self::On),
            _ => Err(ParseError::Status(s.to_string())),
        }
    }
}

const HUB_STATUSES: &[DeviceStatus] = &[DeviceStatus::On];
const SWITCHABLE_STATUSES: &[DeviceStatus] = &[DeviceStatus::Off, DeviceStatus::On];

/// The closed set of device kinds that can be placed on the space.
///
/// Only [`RaspberryPi`](Self::RaspberryPi) is a hub: it is the only kind
/// that can hold peripherals in numbered slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceKind {
    #[serde(rename = "RPI")]
    RaspberryPi,
    #[serde(rename = "LED")]
    Led,
    #[serde(rename = "TEMPSENSOR")]
    TempSensor,
    #[serde(rename = "BULB")]
    Bulb,
    #[serde(rename = "LAMP")]
    Lamp,
    #[serde(rename = "THERMOMETER")]
    Thermometer,
}

impl DeviceKind {
    pub const ALL: [Self; 6] = [
        Self::RaspberryPi,
        Self::Led,
        Self::TempSensor,
        Self::Bulb,
        Self::Lamp,
        Self::Thermometer,
    ];

    /// Short uppercase code used as the prefix of device ids.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::RaspberryPi => "RPI",
            Self::Led => "LED",
            Self::TempSensor => "TEMPSENSOR",
            Self::Bulb => "BULB",
            Self::Lamp => "LAMP",
            Self::Thermometer => "THERMOMETER",
        }
    }

    /// Human readable name used to build default display names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RaspberryPi => "Raspberry Pi",
            Self::Led => "LED Bulb",
            Self::TempSensor => "Temp sensor",
            Self::Bulb => "Bulb",
            Self::Lamp => "Lamp",
            Self::Thermometer => "Thermometer",
        }
    }

    #[must_use]
    pub fn is_hub(self) -> bool {
        matches!(self, Self::RaspberryPi)
    }

    /// Statuses a device of this kind may take.
    #[must_use]
    pub fn statuses(self) -> &'static [DeviceStatus] {
        if self.is_hub() {
            HUB_STATUSES
        } else {
            SWITCHABLE_STATUSES
        }
    }

    #[must_use]
    pub fn accepts(self, status: DeviceStatus) -> bool {
        self.statuses().contains(&status)
    }

    /// `OFF` when the kind supports it, otherwise the first allowed status.
    #[must_use]
    pub fn default_status(self) -> DeviceStatus {
        if self.accepts(DeviceStatus::Off) {
            DeviceStatus::Off
        } else {
            self.statuses()[0]
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DeviceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::Kind(s.to_string()))
    }
}
