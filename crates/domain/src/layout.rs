//! Layout tracker: pixel placement of every device card.
//!
//! The registry stores normalized positions; this tracker holds the pixel
//! placement derived from them for the current canvas size, plus the
//! transient placement of a card while it is being dragged.

use std::collections::HashMap;

use crate::device::Device;
use crate::geometry::{self, CanvasSize, Footprint, Pixel, Position, Rect};
use crate::id::DeviceId;

#[derive(Debug, Clone)]
pub struct LayoutTracker {
    canvas: CanvasSize,
    footprint: Footprint,
    placements: HashMap<DeviceId, Pixel>,
}

impl LayoutTracker {
    #[must_use]
    pub fn new(canvas: CanvasSize, footprint: Footprint) -> Self {
        Self {
            canvas,
            footprint,
            placements: HashMap::new(),
        }
    }

    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[must_use]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Place `device` from its normalized position and return the pixel placement.
    pub fn place(&mut self, device: &Device) -> Pixel {
        let pixel = geometry::to_pixels(device.position(), self.canvas);
        self.placements.insert(device.id(), pixel);
        pixel
    }

    /// Adopt a new canvas size and recompute every placement from the
    /// devices' normalized positions. Placements of devices not in
    /// `devices` are dropped.
    pub fn relayout<'a>(
        &mut self,
        devices: impl IntoIterator<Item = &'a Device>,
        canvas: CanvasSize,
    ) {
        self.canvas = canvas;
        self.placements.clear();
        for device in devices {
            self.place(device);
        }
    }

    /// Shift a card by a drag delta, keeping it inside the canvas.
    /// Returns `None` when the device has no placement.
    pub fn nudge(&mut self, id: DeviceId, dx: i32, dy: i32) -> Option<Pixel> {
        let (max_x, max_y) = self.max_origin();
        let pixel = self.placements.get_mut(&id)?;
        pixel.x = pixel.x.saturating_add(dx).clamp(0, max_x);
        pixel.y = pixel.y.saturating_add(dy).clamp(0, max_y);
        Some(*pixel)
    }

    /// Pin a card at `pixel` (clamped into the canvas) and return the
    /// normalized position it corresponds to.
    pub fn settle(&mut self, id: DeviceId, pixel: Pixel) -> Position {
        let (max_x, max_y) = self.max_origin();
        let pinned = Pixel::new(pixel.x.clamp(0, max_x), pixel.y.clamp(0, max_y));
        self.placements.insert(id, pinned);
        geometry::from_pixels(pinned, self.canvas)
    }

    pub fn forget(&mut self, id: DeviceId) {
        self.placements.remove(&id);
    }

    #[must_use]
    pub fn placement(&self, id: DeviceId) -> Option<Pixel> {
        self.placements.get(&id).copied()
    }

    /// Area covered by the card of `id`.
    #[must_use]
    pub fn bounds(&self, id: DeviceId) -> Option<Rect> {
        self.placement(id).map(|origin| Rect {
            origin,
            width: self.footprint.width,
            height: self.footprint.height,
        })
    }

    #[must_use]
    pub fn center(&self, id: DeviceId) -> Option<Pixel> {
        self.bounds(id).map(|rect| rect.center())
    }

    fn max_origin(&self) -> (i32, i32) {
        let max = |canvas: u32, card: u32| {
            i32::try_from(canvas.saturating_sub(card)).unwrap_or(i32::MAX)
        };
        (
            max(self.canvas.width, self.footprint.width),
            max(self.canvas.height, self.footprint.height),
        )
    }
}
