//! Connector lines: geometry of the wire drawn for each hub link.
//!
//! A connector runs from the hub card's center, vertically down (or up)
//! to the peripheral's row, then horizontally to the peripheral's center.
//! The view clears the two card rectangles after stroking so the line
//! appears to end at the card edges.

use serde::Serialize;

use crate::device::SlotNumber;
use crate::geometry::{Pixel, Rect};
use crate::id::DeviceId;
use crate::layout::LayoutTracker;
use crate::registry::DeviceRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connector {
    pub hub: DeviceId,
    pub peripheral: DeviceId,
    pub slot: SlotNumber,
    pub start: Pixel,
    pub end: Pixel,
    /// Corner of the right-angled route, at `(start.x, end.y)`.
    pub elbow: Pixel,
    /// Card areas the view must not draw over.
    pub avoid: [Rect; 2],
}

/// One connector per existing link, in [`DeviceRegistry::links`] order.
/// Links whose endpoints have no placement yet are skipped.
#[must_use]
pub fn compute_segments(registry: &DeviceRegistry, layout: &LayoutTracker) -> Vec<Connector> {
    registry
        .links()
        .filter_map(|link| {
            let hub_box = layout.bounds(link.hub)?;
            let peripheral_box = layout.bounds(link.peripheral)?;
            let start = hub_box.center();
            let end = peripheral_box.center();
            Some(Connector {
                hub: link.hub,
                peripheral: link.peripheral,
                slot: link.slot,
                start,
                end,
                elbow: Pixel::new(start.x, end.y),
                avoid: [hub_box, peripheral_box],
            })
        })
        .collect()
}
