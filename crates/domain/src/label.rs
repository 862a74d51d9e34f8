//! Label: the editable name/comment card shown next to a device.
//!
//! Besides its free-text fields a label can watch device properties; the
//! watched values are included in [`view`] so the card stays current as
//! the device is connected, moved, or switched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::device::Device;
use crate::error::ParseError;

pub const DEFAULT_COMMENT: &str = "Default comment. Click to type in a new comment.";

/// Device property a label can display alongside its text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchedProperty {
    Connection,
    Position,
    Status,
}

impl fmt::Display for WatchedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => f.write_str("connection"),
            Self::Position => f.write_str("position"),
            Self::Status => f.write_str("status"),
        }
    }
}

impl FromStr for WatchedProperty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "connection" => Ok(Self::Connection),
            "position" => Ok(Self::Position),
            "status" => Ok(Self::Status),
            _ => Err(ParseError::WatchedProperty(s.to_string())),
        }
    }
}

/// User-editable text attached to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub name: String,
    pub comment: String,
    pub watched: Vec<WatchedProperty>,
}

impl Label {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: DEFAULT_COMMENT.to_string(),
            watched: Vec::new(),
        }
    }

    /// Start displaying `property`. Watching twice is a no-op.
    pub fn watch(&mut self, property: WatchedProperty) {
        if !self.watched.contains(&property) {
            self.watched.push(property);
        }
    }
}

/// Render the label card of `device` as JSON: its text fields followed by
/// every watched property, in the order they were added.
#[must_use]
pub fn view(device: &Device) -> Value {
    let label = device.label();
    let mut card = Map::new();
    card.insert("name".into(), Value::String(label.name.clone()));
    card.insert("id".into(), Value::String(device.id().to_string()));
    card.insert("comment".into(), Value::String(label.comment.clone()));

    for property in &label.watched {
        let value = match property {
            WatchedProperty::Connection => connection_view(device),
            WatchedProperty::Position => {
                let position = device.position();
                json!({ "x": position.x(), "y": position.y() })
            }
            WatchedProperty::Status => Value::String(device.status().to_string()),
        };
        card.insert(property.to_string(), value);
    }

    Value::Object(card)
}

fn connection_view(device: &Device) -> Value {
    let mut connection = match device.hub_link() {
        Some(link) => json!({
            "isConnected": true,
            "connectedTo": link.hub.to_string(),
            "slot": link.slot.get(),
        }),
        None => json!({ "isConnected": false, "connectedTo": null }),
    };
    if let (Some(slots), Value::Object(map)) = (device.slots(), &mut connection) {
        let peripherals = slots
            .iter()
            .map(|(slot, id)| json!({ "slot": slot.get(), "device": id.to_string() }))
            .collect();
        map.insert("connectedDevices".into(), Value::Array(peripherals));
    }
    connection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKind;
    use crate::geometry::Position;
    use crate::id::DeviceId;

    fn led() -> Device {
        Device::new(DeviceId::new(DeviceKind::Led, 1), Position::new(0.25, 0.5))
    }

    #[test]
    fn should_start_with_default_comment() {
        let label = Label::new("LED Bulb 1");
        assert_eq!(label.comment, DEFAULT_COMMENT);
        assert!(label.watched.is_empty());
    }

    #[test]
    fn should_not_duplicate_watched_property() {
        let mut label = Label::new("x");
        label.watch(WatchedProperty::Status);
        label.watch(WatchedProperty::Status);
        assert_eq!(label.watched, vec![WatchedProperty::Status]);
    }

    #[test]
    fn should_render_only_text_fields_by_default() {
        let card = view(&led());
        assert_eq!(card["name"], "LED Bulb 1");
        assert_eq!(card["id"], "LED1");
        assert!(card.get("connection").is_none());
    }

    #[test]
    fn should_render_watched_properties() {
        let mut device = led();
        device.label.watch(WatchedProperty::Position);
        device.label.watch(WatchedProperty::Connection);
        device.label.watch(WatchedProperty::Status);

        let card = view(&device);
        assert_eq!(card["position"]["x"], 0.25);
        assert_eq!(card["connection"]["isConnected"], false);
        assert_eq!(card["status"], "OFF");
    }

    #[test]
    fn should_list_hub_peripherals_when_watching_connection() {
        let mut hub = Device::new(DeviceId::new(DeviceKind::RaspberryPi, 1), Position::default());
        hub.label.watch(WatchedProperty::Connection);
        let card = view(&hub);
        assert_eq!(card["connection"]["connectedDevices"], json!([]));
    }

    #[test]
    fn should_parse_property_names() {
        assert_eq!(
            "Connection".parse::<WatchedProperty>().unwrap(),
            WatchedProperty::Connection
        );
        assert!("colour".parse::<WatchedProperty>().is_err());
    }
}
