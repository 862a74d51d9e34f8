//! View port: everything the space manager asks the presentation layer to do.
//!
//! The manager never inspects what a view draws; it only tells it what
//! changed.

use minispace_domain::connector::Connector;
use minispace_domain::device::{Device, DeviceStatus};
use minispace_domain::geometry::Pixel;
use minispace_domain::id::DeviceId;

use crate::pending::Affordance;

/// Rendered picture of one device.
pub trait Illustration {
    /// Redraw the picture. Calling it twice in a row draws the same thing.
    fn render(&mut self);

    /// Switch the picture to show `status`.
    fn set_visual_state(&mut self, status: DeviceStatus);
}

/// Presentation layer hosting device cards and connector lines.
pub trait View {
    type Illustration: Illustration;

    /// Create the card and illustration for a freshly added device.
    fn create_illustration(&mut self, device: &Device) -> Self::Illustration;

    /// Move the card of `id` so its top-left corner sits at `origin`.
    fn place(&mut self, id: DeviceId, origin: Pixel);

    /// Take the card of a deleted device off the canvas.
    fn remove(&mut self, id: DeviceId);

    /// Replace all connector lines with `connectors`.
    fn draw_connectors(&mut self, connectors: &[Connector]);

    /// Replace the pending-connection decorations. An empty slice clears them.
    fn show_affordances(&mut self, affordances: &[(DeviceId, Affordance)]);

    /// Refresh the label card of `device`.
    fn refresh_label(&mut self, device: &Device) {
        let _ = device;
    }
}
