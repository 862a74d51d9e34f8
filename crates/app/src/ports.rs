//! Port definitions — traits that the outside world implements.
//!
//! Ports are the boundaries between the space manager and whatever draws
//! it or listens to it.

pub mod event_bus;
pub mod view;

pub use event_bus::EventPublisher;
pub use view::{Illustration, View};
