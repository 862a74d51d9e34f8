//! Space service: the space manager use-cases.
//!
//! Owns the device registry, the layout tracker, the pending-connection
//! state and one illustration per device. Every UI event lands on one of
//! the methods here, which mutate the domain, then tell the view what to
//! redraw and publish a [`SpaceEvent`]. Rejected operations change nothing,
//! are logged at `warn`, and are returned to the caller.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::time::Instant;

use minispace_domain::connector::{self, Connector};
use minispace_domain::device::{Device, DeviceKind, DeviceStatus, SlotNumber, SlotRequest};
use minispace_domain::error::SpaceError;
use minispace_domain::event::{SpaceEvent, SpaceEventType};
use minispace_domain::geometry::{CanvasSize, Footprint, Pixel, Position};
use minispace_domain::id::DeviceId;
use minispace_domain::identity::IndexPolicy;
use minispace_domain::label::{self, WatchedProperty};
use minispace_domain::layout::LayoutTracker;
use minispace_domain::registry::DeviceRegistry;

use crate::debounce::{self, ResizeDebouncer};
use crate::pending::{PendingConnection, TapOutcome};
use crate::ports::{EventPublisher, Illustration, View};

/// Initial dimensions and policies of a space.
#[derive(Debug, Clone, Copy)]
pub struct SpaceSettings {
    pub canvas: CanvasSize,
    pub footprint: Footprint,
    pub index_policy: IndexPolicy,
    pub resize_debounce: Duration,
}

impl Default for SpaceSettings {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::new(800, 600),
            footprint: Footprint {
                width: 100,
                height: 100,
            },
            index_policy: IndexPolicy::default(),
            resize_debounce: debounce::DEFAULT_WINDOW,
        }
    }
}

fn log_rejection(err: &SpaceError) {
    tracing::warn!(%err, "operation rejected");
}

/// The space manager.
pub struct SpaceService<V: View, P> {
    registry: DeviceRegistry,
    layout: LayoutTracker,
    pending: PendingConnection,
    debouncer: ResizeDebouncer,
    illustrations: HashMap<DeviceId, V::Illustration>,
    view: V,
    publisher: P,
}

impl<V: View, P: EventPublisher> SpaceService<V, P> {
    /// Create an empty space drawn by `view` and reporting to `publisher`.
    pub fn new(settings: SpaceSettings, view: V, publisher: P) -> Self {
        Self {
            registry: DeviceRegistry::new(settings.index_policy),
            layout: LayoutTracker::new(settings.canvas, settings.footprint),
            pending: PendingConnection::default(),
            debouncer: ResizeDebouncer::new(settings.resize_debounce),
            illustrations: HashMap::new(),
            view,
            publisher,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutTracker {
        &self.layout
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.registry.get(id)
    }

    /// Connector geometry for the current links and layout.
    #[must_use]
    pub fn connectors(&self) -> Vec<Connector> {
        connector::compute_segments(&self.registry, &self.layout)
    }

    /// JSON rendering of the label card of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    pub fn label_view(&self, id: DeviceId) -> Result<Value, SpaceError> {
        self.registry.require(id).map(label::view)
    }

    /// Add a device of `kind` at the default position.
    pub fn add_device(&mut self, kind: DeviceKind) -> DeviceId {
        self.add_device_at(kind, Position::default())
    }

    /// Add a device of `kind` at `position` and draw it.
    #[tracing::instrument(skip(self))]
    pub fn add_device_at(&mut self, kind: DeviceKind, position: Position) -> DeviceId {
        let device = self.registry.add(kind, position);
        let id = device.id();
        let name = device.display_name().to_string();

        let mut illustration = self.view.create_illustration(device);
        illustration.set_visual_state(device.status());
        illustration.render();
        let origin = self.layout.place(device);
        self.illustrations.insert(id, illustration);
        self.view.place(id, origin);

        tracing::info!(device_id = %id, %name, "device added");
        self.publish(
            SpaceEventType::DeviceAdded,
            Some(id),
            json!({ "kind": kind, "name": name }),
        );
        self.refresh_affordances();
        id
    }

    /// Delete a device after cutting its links. Unknown ids are ignored
    /// and `false` is returned.
    #[tracing::instrument(skip(self))]
    pub fn delete_device(&mut self, id: DeviceId) -> bool {
        let Some(removal) = self.registry.remove(id) else {
            tracing::debug!(device_id = %id, "ignoring delete of unknown device");
            return false;
        };
        self.illustrations.remove(&id);
        self.layout.forget(id);
        self.view.remove(id);
        if self.pending.hub() == Some(id) {
            self.end_pending();
        }
        for link in &removal.severed {
            let survivor = if link.hub == id {
                link.peripheral
            } else {
                link.hub
            };
            self.touch(survivor);
        }

        tracing::info!(device_id = %id, severed = removal.severed.len(), "device deleted");
        self.publish(
            SpaceEventType::DeviceRemoved,
            Some(id),
            json!({ "severed": removal.severed }),
        );
        self.redraw();
        self.refresh_affordances();
        true
    }

    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] or [`SpaceError::InvalidStatus`].
    #[tracing::instrument(skip(self))]
    pub fn change_status(&mut self, id: DeviceId, status: DeviceStatus) -> Result<(), SpaceError> {
        let previous = self
            .registry
            .change_status(id, status)
            .inspect_err(log_rejection)?;
        if let Some(illustration) = self.illustrations.get_mut(&id) {
            illustration.set_visual_state(status);
        }
        self.touch(id);
        tracing::debug!(device_id = %id, %previous, %status, "status changed");
        self.publish(
            SpaceEventType::StatusChanged,
            Some(id),
            json!({ "from": previous, "to": status }),
        );
        Ok(())
    }

    /// Link a peripheral to a hub and redraw the connectors.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::connect`].
    #[tracing::instrument(skip(self))]
    pub fn connect(
        &mut self,
        hub: DeviceId,
        peripheral: DeviceId,
        slot: SlotRequest,
    ) -> Result<SlotNumber, SpaceError> {
        let slot = self
            .registry
            .connect(hub, peripheral, slot)
            .inspect_err(log_rejection)?;
        self.touch(hub);
        self.touch(peripheral);
        self.redraw();
        self.refresh_affordances();

        tracing::info!(hub_id = %hub, device_id = %peripheral, %slot, "devices connected");
        self.publish(
            SpaceEventType::Connected,
            Some(peripheral),
            json!({ "hub": hub, "slot": slot }),
        );
        Ok(slot)
    }

    /// Unlink a peripheral from a hub and redraw the connectors.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::disconnect`].
    #[tracing::instrument(skip(self))]
    pub fn disconnect(
        &mut self,
        hub: DeviceId,
        peripheral: DeviceId,
    ) -> Result<SlotNumber, SpaceError> {
        let slot = self
            .registry
            .disconnect(hub, peripheral)
            .inspect_err(log_rejection)?;
        self.touch(hub);
        self.touch(peripheral);
        self.redraw();
        self.refresh_affordances();

        tracing::info!(hub_id = %hub, device_id = %peripheral, %slot, "devices disconnected");
        self.publish(
            SpaceEventType::Disconnected,
            Some(peripheral),
            json!({ "hub": hub, "slot": slot }),
        );
        Ok(slot)
    }

    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    #[tracing::instrument(skip(self))]
    pub fn rename(&mut self, id: DeviceId, name: &str) -> Result<(), SpaceError> {
        self.registry.rename(id, name).inspect_err(log_rejection)?;
        self.label_changed(id, json!({ "name": name }));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    #[tracing::instrument(skip(self))]
    pub fn set_comment(&mut self, id: DeviceId, comment: &str) -> Result<(), SpaceError> {
        self.registry
            .set_comment(id, comment)
            .inspect_err(log_rejection)?;
        self.label_changed(id, json!({ "comment": comment }));
        Ok(())
    }

    /// Show `property` on the label card of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    #[tracing::instrument(skip(self))]
    pub fn watch(&mut self, id: DeviceId, property: WatchedProperty) -> Result<(), SpaceError> {
        self.registry.watch(id, property).inspect_err(log_rejection)?;
        self.label_changed(id, json!({ "watch": property }));
        Ok(())
    }

    #[must_use]
    pub fn is_pending_connection(&self) -> bool {
        self.pending.is_pending()
    }

    #[must_use]
    pub fn pending_hub_id(&self) -> Option<DeviceId> {
        self.pending.hub()
    }

    /// Enter pending-connection mode for `hub`. Any other pending hub is
    /// released first; re-entering for the pending hub changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] or [`SpaceError::NotAHub`].
    #[tracing::instrument(skip(self))]
    pub fn begin_pending(&mut self, hub: DeviceId) -> Result<(), SpaceError> {
        let device = self.registry.require(hub).inspect_err(log_rejection)?;
        if !device.is_hub() {
            let err = SpaceError::NotAHub {
                id: hub,
                kind: device.kind(),
            };
            log_rejection(&err);
            return Err(err);
        }
        if self.pending.hub() == Some(hub) {
            return Ok(());
        }
        self.end_pending();
        self.pending.begin(hub);
        self.refresh_affordances();

        tracing::debug!(hub_id = %hub, "pending connection started");
        self.publish(SpaceEventType::PendingStarted, Some(hub), json!({}));
        Ok(())
    }

    /// Leave pending-connection mode, clearing its decorations. Returns
    /// the hub that was pending.
    pub fn end_pending(&mut self) -> Option<DeviceId> {
        let hub = self.pending.end()?;
        self.view.show_affordances(&[]);
        tracing::debug!(hub_id = %hub, "pending connection ended");
        self.publish(SpaceEventType::PendingEnded, Some(hub), json!({}));
        Some(hub)
    }

    /// A tap on a device card. While a hub is pending, toggles the
    /// tapped device's link to it; tapping the pending hub exits.
    ///
    /// # Errors
    ///
    /// Returns the error of the connect or disconnect the tap triggered,
    /// e.g. [`SpaceError::AlreadyLinked`] for a device held by another hub.
    #[tracing::instrument(skip(self))]
    pub fn tap(&mut self, id: DeviceId) -> Result<TapOutcome, SpaceError> {
        let Some(hub) = self.pending.hub() else {
            return Ok(TapOutcome::Ignored);
        };
        if id == hub {
            self.end_pending();
            return Ok(TapOutcome::Exited);
        }
        let device = self.registry.require(id).inspect_err(log_rejection)?;
        match device.hub_link() {
            Some(link) if link.hub == hub => self.disconnect(hub, id).map(TapOutcome::Disconnected),
            _ => self
                .connect(hub, id, SlotRequest::Auto)
                .map(TapOutcome::Connected),
        }
    }

    /// A drag step: move the card by `(dx, dy)` pixels without touching
    /// the stored position.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    pub fn drag_move(&mut self, id: DeviceId, dx: i32, dy: i32) -> Result<Pixel, SpaceError> {
        let origin = self
            .layout
            .nudge(id, dx, dy)
            .ok_or(SpaceError::UnknownDevice { id })
            .inspect_err(log_rejection)?;
        self.view.place(id, origin);
        self.redraw();
        Ok(origin)
    }

    /// End of a drag: pin the card at `pixel` and store the matching
    /// normalized position.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::UnknownDevice`] when `id` is not on the space.
    #[tracing::instrument(skip(self))]
    pub fn drag_end(&mut self, id: DeviceId, pixel: Pixel) -> Result<Position, SpaceError> {
        self.registry.require(id).inspect_err(log_rejection)?;
        let position = self.layout.settle(id, pixel);
        self.registry.move_to(id, position)?;
        if let Some(origin) = self.layout.placement(id) {
            self.view.place(id, origin);
        }
        self.touch(id);
        self.redraw();

        tracing::debug!(device_id = %id, x = position.x(), y = position.y(), "device moved");
        self.publish(
            SpaceEventType::Moved,
            Some(id),
            json!({ "x": position.x(), "y": position.y() }),
        );
        Ok(position)
    }

    /// Re-place every card for a new canvas size, redraw connectors, and
    /// re-render every illustration. Sizes that cannot be drawn on are
    /// ignored and the current layout stays.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, canvas: CanvasSize) {
        if !canvas.is_drawable() {
            tracing::warn!(canvas.width, canvas.height, "ignoring undrawable canvas size");
            return;
        }
        self.layout.relayout(self.registry.iter(), canvas);
        for device in self.registry.iter() {
            if let Some(origin) = self.layout.placement(device.id()) {
                self.view.place(device.id(), origin);
            }
        }
        self.redraw();
        for illustration in self.illustrations.values_mut() {
            illustration.render();
        }
        self.publish(
            SpaceEventType::Relayout,
            None,
            json!({ "width": canvas.width, "height": canvas.height }),
        );
    }

    /// Note a canvas resize; the relayout waits for [`flush_resize`](Self::flush_resize).
    pub fn schedule_resize(&mut self, canvas: CanvasSize, now: Instant) {
        if !canvas.is_drawable() {
            tracing::warn!(canvas.width, canvas.height, "ignoring undrawable canvas size");
            return;
        }
        self.debouncer.record(canvas, now);
    }

    /// When a scheduled resize becomes due.
    #[must_use]
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Run the scheduled resize if its quiet window has elapsed.
    /// Returns whether a relayout happened.
    pub fn flush_resize(&mut self, now: Instant) -> bool {
        match self.debouncer.take_due(now) {
            Some(canvas) => {
                self.resize(canvas);
                true
            }
            None => false,
        }
    }

    fn label_changed(&mut self, id: DeviceId, data: Value) {
        self.touch(id);
        self.publish(SpaceEventType::LabelChanged, Some(id), data);
    }

    /// Re-render the illustration and label of `id` after a change.
    fn touch(&mut self, id: DeviceId) {
        if let Some(illustration) = self.illustrations.get_mut(&id) {
            illustration.render();
        }
        if let Some(device) = self.registry.get(id) {
            self.view.refresh_label(device);
        }
    }

    fn redraw(&mut self) {
        let connectors = connector::compute_segments(&self.registry, &self.layout);
        self.view.draw_connectors(&connectors);
    }

    fn refresh_affordances(&mut self) {
        if self.pending.is_pending() {
            let affordances = self.pending.affordances(&self.registry);
            self.view.show_affordances(&affordances);
        }
    }

    fn publish(&self, event_type: SpaceEventType, device_id: Option<DeviceId>, data: Value) {
        self.publisher
            .publish(SpaceEvent::new(event_type, device_id, data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::pending::Affordance;

    #[derive(Default)]
    struct Counters {
        renders: HashMap<DeviceId, usize>,
        states: HashMap<DeviceId, DeviceStatus>,
    }

    struct FakeIllustration {
        id: DeviceId,
        counters: Rc<RefCell<Counters>>,
    }

    impl Illustration for FakeIllustration {
        fn render(&mut self) {
            *self.counters.borrow_mut().renders.entry(self.id).or_default() += 1;
        }

        fn set_visual_state(&mut self, status: DeviceStatus) {
            self.counters.borrow_mut().states.insert(self.id, status);
        }
    }

    #[derive(Default)]
    struct FakeView {
        counters: Rc<RefCell<Counters>>,
        placements: HashMap<DeviceId, Pixel>,
        connectors: Vec<Connector>,
        affordances: Vec<(DeviceId, Affordance)>,
        removed: Vec<DeviceId>,
    }

    impl FakeView {
        fn renders(&self, id: DeviceId) -> usize {
            self.counters.borrow().renders.get(&id).copied().unwrap_or(0)
        }
    }

    impl View for FakeView {
        type Illustration = FakeIllustration;

        fn create_illustration(&mut self, device: &Device) -> FakeIllustration {
            FakeIllustration {
                id: device.id(),
                counters: Rc::clone(&self.counters),
            }
        }

        fn place(&mut self, id: DeviceId, origin: Pixel) {
            self.placements.insert(id, origin);
        }

        fn remove(&mut self, id: DeviceId) {
            self.placements.remove(&id);
            self.removed.push(id);
        }

        fn draw_connectors(&mut self, connectors: &[Connector]) {
            self.connectors = connectors.to_vec();
        }

        fn show_affordances(&mut self, affordances: &[(DeviceId, Affordance)]) {
            self.affordances = affordances.to_vec();
        }
    }

    #[derive(Default)]
    struct FakePublisher {
        events: RefCell<Vec<SpaceEvent>>,
    }

    impl FakePublisher {
        fn types(&self) -> Vec<SpaceEventType> {
            self.events.borrow().iter().map(|e| e.event_type).collect()
        }
    }

    impl EventPublisher for FakePublisher {
        fn publish(&self, event: SpaceEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    type Service = SpaceService<FakeView, Rc<FakePublisher>>;

    fn make_service() -> (Service, Rc<FakePublisher>) {
        let publisher = Rc::new(FakePublisher::default());
        let service = SpaceService::new(
            SpaceSettings::default(),
            FakeView::default(),
            Rc::clone(&publisher),
        );
        (service, publisher)
    }

    #[test]
    fn should_draw_and_place_added_device() {
        let (mut svc, publisher) = make_service();
        let id = svc.add_device_at(DeviceKind::Bulb, Position::new(0.5, 0.5));

        assert_eq!(id.to_string(), "BULB1");
        assert_eq!(svc.view().placements.get(&id), Some(&Pixel::new(400, 300)));
        assert_eq!(svc.view().renders(id), 1);
        assert_eq!(
            svc.view().counters.borrow().states.get(&id),
            Some(&DeviceStatus::Off)
        );
        assert_eq!(publisher.types(), vec![SpaceEventType::DeviceAdded]);
    }

    #[test]
    fn should_update_illustration_on_status_change() {
        let (mut svc, _) = make_service();
        let id = svc.add_device(DeviceKind::Lamp);
        svc.change_status(id, DeviceStatus::On).unwrap();

        assert_eq!(
            svc.view().counters.borrow().states.get(&id),
            Some(&DeviceStatus::On)
        );
        assert_eq!(svc.view().renders(id), 2);
    }

    #[test]
    fn should_publish_nothing_when_status_rejected() {
        let (mut svc, publisher) = make_service();
        let hub = svc.add_device(DeviceKind::RaspberryPi);
        let result = svc.change_status(hub, DeviceStatus::Off);

        assert!(matches!(result, Err(SpaceError::InvalidStatus { .. })));
        assert_eq!(publisher.types(), vec![SpaceEventType::DeviceAdded]);
    }

    #[test]
    fn should_redraw_connectors_on_connect_and_disconnect() {
        let (mut svc, _) = make_service();
        let hub = svc.add_device(DeviceKind::RaspberryPi);
        let led = svc.add_device_at(DeviceKind::Led, Position::new(0.5, 0.5));

        svc.connect(hub, led, SlotRequest::Auto).unwrap();
        assert_eq!(svc.view().connectors.len(), 1);
        assert_eq!(svc.view().connectors[0].peripheral, led);

        svc.disconnect(hub, led).unwrap();
        assert!(svc.view().connectors.is_empty());
    }

    #[test]
    fn should_clear_links_and_card_when_hub_deleted() {
        let (mut svc, publisher) = make_service();
        let hub = svc.add_device(DeviceKind::RaspberryPi);
        let led = svc.add_device(DeviceKind::Led);
        svc.connect(hub, led, SlotRequest::Auto).unwrap();

        assert!(svc.delete_device(hub));
        assert!(svc.device(led).unwrap().hub_link().is_none());
        assert!(svc.view().connectors.is_empty());
        assert_eq!(svc.view().removed, vec![hub]);
        assert!(svc.layout().placement(hub).is_none());
        assert_eq!(
            publisher.types().last(),
            Some(&SpaceEventType::DeviceRemoved)
        );
    }

    #[test]
    fn should_ignore_delete_of_unknown_device() {
        let (mut svc, publisher) = make_service();
        assert!(!svc.delete_device(DeviceId::new(DeviceKind::Led, 3)));
        assert!(publisher.types().is_empty());
    }

    #[test]
    fn should_follow_drag_and_store_position_on_drop() {
        let (mut svc, _) = make_service();
        let id = svc.add_device_at(DeviceKind::Thermometer, Position::new(0.0, 0.0));

        assert_eq!(svc.drag_move(id, 40, 30).unwrap(), Pixel::new(40, 30));
        assert_eq!(svc.device(id).unwrap().position(), Position::new(0.0, 0.0));

        let position = svc.drag_end(id, Pixel::new(200, 300)).unwrap();
        assert_eq!(position, Position::new(0.25, 0.5));
        assert_eq!(svc.device(id).unwrap().position(), position);
        assert_eq!(svc.view().placements.get(&id), Some(&Pixel::new(200, 300)));
    }

    #[test]
    fn should_reject_drag_of_unknown_device() {
        let (mut svc, _) = make_service();
        let ghost = DeviceId::new(DeviceKind::Led, 1);
        assert_eq!(
            svc.drag_move(ghost, 1, 1),
            Err(SpaceError::UnknownDevice { id: ghost })
        );
        assert!(svc.drag_end(ghost, Pixel::new(0, 0)).is_err());
    }

    #[test]
    fn should_relayout_and_rerender_on_resize() {
        let (mut svc, publisher) = make_service();
        let id = svc.add_device_at(DeviceKind::Led, Position::new(0.5, 0.5));

        svc.resize(CanvasSize::new(400, 200));
        assert_eq!(svc.view().placements.get(&id), Some(&Pixel::new(200, 100)));
        assert_eq!(svc.view().renders(id), 2);
        assert_eq!(publisher.types().last(), Some(&SpaceEventType::Relayout));
    }

    #[test]
    fn should_relayout_once_after_resize_burst() {
        let (mut svc, publisher) = make_service();
        let start = Instant::now();
        svc.schedule_resize(CanvasSize::new(300, 300), start);
        svc.schedule_resize(CanvasSize::new(400, 400), start + Duration::from_millis(20));

        assert!(!svc.flush_resize(start + Duration::from_millis(50)));
        assert!(svc.flush_resize(start + Duration::from_millis(70)));
        assert!(!svc.flush_resize(start + Duration::from_millis(200)));
        assert_eq!(svc.layout().canvas(), CanvasSize::new(400, 400));
        let relayouts = publisher
            .types()
            .into_iter()
            .filter(|t| *t == SpaceEventType::Relayout)
            .count();
        assert_eq!(relayouts, 1);
    }

    #[test]
    fn should_keep_layout_when_resized_to_nothing() {
        let (mut svc, publisher) = make_service();
        let id = svc.add_device_at(DeviceKind::Led, Position::new(0.5, 0.5));

        svc.resize(CanvasSize::new(0, 0));
        svc.schedule_resize(CanvasSize::new(800, 0), Instant::now());
        assert_eq!(svc.resize_deadline(), None);
        assert_eq!(svc.layout().canvas(), CanvasSize::new(800, 600));

        let position = svc.drag_end(id, Pixel::new(200, 150)).unwrap();
        assert_eq!(position, Position::new(0.25, 0.25));
        assert!(!publisher.types().contains(&SpaceEventType::Relayout));
    }

    #[test]
    fn should_not_overflow_connectors_on_huge_canvas() {
        let (mut svc, _) = make_service();
        let hub = svc.add_device(DeviceKind::RaspberryPi);
        let led = svc.add_device(DeviceKind::Led);
        svc.connect(hub, led, SlotRequest::Auto).unwrap();

        svc.resize(CanvasSize::new(u32::MAX, 600));
        assert_eq!(svc.layout().canvas(), CanvasSize::new(800, 600));

        let widest = CanvasSize::new(i32::MAX.unsigned_abs(), 600);
        svc.resize(widest);
        assert_eq!(svc.layout().canvas(), widest);
        svc.drag_end(led, Pixel::new(i32::MAX, 0)).unwrap();
        let connector = svc.view().connectors[0];
        assert_eq!(connector.peripheral, led);
        assert!(connector.end.x >= connector.avoid[1].origin.x);
    }

    #[test]
    fn should_toggle_links_by_tapping_while_pending() {
        let (mut svc, _) = make_service();
        let hub = svc.add_device(DeviceKind::RaspberryPi);
        let led = svc.add_device(DeviceKind::Led);

        svc.begin_pending(hub).unwrap();
        assert!(svc.is_pending_connection());
        assert_eq!(svc.pending_hub_id(), Some(hub));
        assert_eq!(svc.view().affordances, vec![(led, Affordance::Connectable)]);

        let slot = SlotNumber::new(1).unwrap();
        assert_eq!(svc.tap(led), Ok(TapOutcome::Connected(slot)));
        assert_eq!(svc.view().affordances, vec![(led, Affordance::Connected)]);
        assert_eq!(svc.tap(led), Ok(TapOutcome::Disconnected(slot)));
        assert!(svc.device(led).unwrap().hub_link().is_none());

        assert_eq!(svc.tap(hub), Ok(TapOutcome::Exited));
        assert!(!svc.is_pending_connection());
        assert!(svc.view().affordances.is_empty());
    }

    #[test]
    fn should_ignore_taps_when_nothing_pending() {
        let (mut svc, _) = make_service();
        let led = svc.add_device(DeviceKind::Led);
        assert_eq!(svc.tap(led), Ok(TapOutcome::Ignored));
    }

    #[test]
    fn should_refuse_pending_mode_for_peripheral() {
        let (mut svc, _) = make_service();
        let led = svc.add_device(DeviceKind::Led);
        assert!(matches!(
            svc.begin_pending(led),
            Err(SpaceError::NotAHub { .. })
        ));
        assert!(!svc.is_pending_connection());
    }

    #[test]
    fn should_release_previous_hub_when_another_becomes_pending() {
        let (mut svc, publisher) = make_service();
        let first = svc.add_device(DeviceKind::RaspberryPi);
        let second = svc.add_device(DeviceKind::RaspberryPi);

        svc.begin_pending(first).unwrap();
        svc.begin_pending(second).unwrap();

        assert_eq!(svc.pending_hub_id(), Some(second));
        assert_eq!(svc.view().affordances, vec![(first, Affordance::Connectable)]);
        let types = publisher.types();
        assert_eq!(
            &types[types.len() - 3..],
            &[
                SpaceEventType::PendingStarted,
                SpaceEventType::PendingEnded,
                SpaceEventType::PendingStarted
            ]
        );
    }

    #[test]
    fn should_end_pending_when_pending_hub_deleted() {
        let (mut svc, _) = make_service();
        let hub = svc.add_device(DeviceKind::RaspberryPi);
        svc.add_device(DeviceKind::Led);
        svc.begin_pending(hub).unwrap();

        svc.delete_device(hub);
        assert!(!svc.is_pending_connection());
        assert!(svc.view().affordances.is_empty());
    }

    #[test]
    fn should_rerender_on_label_changes() {
        let (mut svc, publisher) = make_service();
        let id = svc.add_device(DeviceKind::Led);
        svc.rename(id, "Porch").unwrap();
        svc.set_comment(id, "by the door").unwrap();
        svc.watch(id, WatchedProperty::Status).unwrap();

        let card = svc.label_view(id).unwrap();
        assert_eq!(card["name"], "Porch");
        assert_eq!(card["comment"], "by the door");
        assert_eq!(card["status"], "OFF");
        assert_eq!(svc.view().renders(id), 4);
        assert_eq!(
            publisher
                .types()
                .into_iter()
                .filter(|t| *t == SpaceEventType::LabelChanged)
                .count(),
            3
        );
    }
}
