//! Text view: keeps the last drawn state of every card in memory and
//! traces what a graphical view would repaint.

use std::collections::BTreeMap;

use minispace_app::pending::Affordance;
use minispace_app::ports::{Illustration, View};
use minispace_domain::connector::Connector;
use minispace_domain::device::{Device, DeviceStatus};
use minispace_domain::geometry::Pixel;
use minispace_domain::id::DeviceId;

/// Illustration of a single card. Renders to a one-line sketch.
#[derive(Debug)]
pub struct TextIllustration {
    id: DeviceId,
    title: &'static str,
    status: DeviceStatus,
    frames: u64,
}

impl TextIllustration {
    #[must_use]
    pub fn sketch(&self) -> String {
        let lamp = match self.status {
            DeviceStatus::On => '*',
            DeviceStatus::Off => 'o',
        };
        format!("[{lamp}] {}", self.title)
    }
}

impl Illustration for TextIllustration {
    fn render(&mut self) {
        self.frames += 1;
        tracing::trace!(
            device_id = %self.id,
            frame = self.frames,
            sketch = %self.sketch(),
            "render"
        );
    }

    fn set_visual_state(&mut self, status: DeviceStatus) {
        self.status = status;
    }
}

#[derive(Debug, Default)]
pub struct TextView {
    cards: BTreeMap<DeviceId, Pixel>,
    connectors: Vec<Connector>,
    affordances: Vec<(DeviceId, Affordance)>,
}

impl TextView {
    #[must_use]
    pub fn card(&self, id: DeviceId) -> Option<Pixel> {
        self.cards.get(&id).copied()
    }

    #[must_use]
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    #[must_use]
    pub fn affordance(&self, id: DeviceId) -> Option<Affordance> {
        self.affordances
            .iter()
            .find_map(|(device, affordance)| (*device == id).then_some(*affordance))
    }
}

impl View for TextView {
    type Illustration = TextIllustration;

    fn create_illustration(&mut self, device: &Device) -> TextIllustration {
        tracing::debug!(device_id = %device.id(), "card created");
        TextIllustration {
            id: device.id(),
            title: device.kind().label(),
            status: device.status(),
            frames: 0,
        }
    }

    fn place(&mut self, id: DeviceId, origin: Pixel) {
        self.cards.insert(id, origin);
    }

    fn remove(&mut self, id: DeviceId) {
        self.cards.remove(&id);
        self.affordances.retain(|(device, _)| *device != id);
        tracing::debug!(device_id = %id, "card removed");
    }

    fn draw_connectors(&mut self, connectors: &[Connector]) {
        tracing::debug!(count = connectors.len(), "connectors redrawn");
        self.connectors = connectors.to_vec();
    }

    fn show_affordances(&mut self, affordances: &[(DeviceId, Affordance)]) {
        self.affordances = affordances.to_vec();
    }

    fn refresh_label(&mut self, device: &Device) {
        tracing::trace!(device_id = %device.id(), name = %device.display_name(), "label refreshed");
    }
}
