//! Executes parsed commands against the space and formats the replies.

use std::fmt::Write as _;

use tokio::time::Instant;

use minispace_app::pending::{Affordance, TapOutcome};
use minispace_app::ports::EventPublisher;
use minispace_app::services::space_service::SpaceService;
use minispace_domain::device::Device;
use minispace_domain::error::SpaceError;

use crate::command::{self, Command};
use crate::view::TextView;

pub type Space<P> = SpaceService<TextView, P>;

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Run one command. Resizes are only scheduled; the caller flushes them
/// once the debounce window has passed.
///
/// # Errors
///
/// Returns the [`SpaceError`] the space rejected the command with.
pub fn execute<P: EventPublisher>(
    space: &mut Space<P>,
    command: Command,
    now: Instant,
) -> Result<Reply, SpaceError> {
    let text = match command {
        Command::Add(kind) => format!("added {}", space.add_device(kind)),
        Command::Delete(id) => {
            if space.delete_device(id) {
                format!("deleted {id}")
            } else {
                format!("{id} is not on the space")
            }
        }
        Command::Status(id, status) => {
            space.change_status(id, status)?;
            format!("{id} is {status}")
        }
        Command::Connect(hub, peripheral, slot) => {
            let slot = space.connect(hub, peripheral, slot)?;
            format!("connected {peripheral} to {hub} on slot {slot}")
        }
        Command::Disconnect(hub, peripheral) => {
            let slot = space.disconnect(hub, peripheral)?;
            format!("disconnected {peripheral} from slot {slot} of {hub}")
        }
        Command::Pending(hub) => {
            space.begin_pending(hub)?;
            format!("{hub} is waiting for taps")
        }
        Command::Tap(id) => match space.tap(id)? {
            TapOutcome::Ignored => "no hub is pending".to_string(),
            TapOutcome::Exited => format!("{id} stopped waiting"),
            TapOutcome::Connected(slot) => {
                let hub = space.pending_hub_id().map(|h| h.to_string()).unwrap_or_default();
                format!("connected {id} to {hub} on slot {slot}")
            }
            TapOutcome::Disconnected(slot) => {
                let hub = space.pending_hub_id().map(|h| h.to_string()).unwrap_or_default();
                format!("disconnected {id} from slot {slot} of {hub}")
            }
        },
        Command::Cancel => match space.end_pending() {
            Some(hub) => format!("{hub} stopped waiting"),
            None => "no hub is pending".to_string(),
        },
        Command::Drag(id, dx, dy) => {
            let origin = space.drag_move(id, dx, dy)?;
            format!("{id} at ({}, {})", origin.x, origin.y)
        }
        Command::Drop(id, pixel) => {
            let position = space.drag_end(id, pixel)?;
            format!("{id} dropped at ({:.2}, {:.2})", position.x(), position.y())
        }
        Command::Resize(canvas) => {
            space.schedule_resize(canvas, now);
            format!("resizing to {}x{}", canvas.width, canvas.height)
        }
        Command::Rename(id, name) => {
            space.rename(id, &name)?;
            format!("{id} renamed to {name:?}")
        }
        Command::Comment(id, text) => {
            space.set_comment(id, &text)?;
            format!("{id} comment updated")
        }
        Command::Watch(id, property) => {
            space.watch(id, property)?;
            format!("{id} label shows {property}")
        }
        Command::Label(id) => format!("{:#}", space.label_view(id)?),
        Command::List => list(space),
        Command::Lines => lines(space),
        Command::Help => command::HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(text.into())
}

fn describe(device: &Device, view: &TextView) -> String {
    let position = device.position();
    let mut line = format!(
        "{:<12} {:<20} {:<3} ({:.2}, {:.2})",
        device.id().to_string(),
        device.display_name(),
        device.status().to_string(),
        position.x(),
        position.y()
    );
    if let Some(origin) = view.card(device.id()) {
        let _ = write!(line, " @{},{}", origin.x, origin.y);
    }
    if let Some(link) = device.hub_link() {
        let _ = write!(line, "  -> {} slot {}", link.hub, link.slot);
    }
    if let Some(slots) = device.slots() {
        for (slot, peripheral) in slots.iter() {
            let _ = write!(line, "  [{slot}] {peripheral}");
        }
    }
    match view.affordance(device.id()) {
        Some(Affordance::Connectable) => line.push_str("  (+)"),
        Some(Affordance::Connected) => line.push_str("  (-)"),
        None => {}
    }
    line
}

fn list<P: EventPublisher>(space: &Space<P>) -> String {
    if space.registry().is_empty() {
        return "the space is empty".to_string();
    }
    space
        .registry()
        .iter()
        .map(|device| describe(device, space.view()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn lines<P: EventPublisher>(space: &Space<P>) -> String {
    let connectors = space.view().connectors();
    if connectors.is_empty() {
        return "no connectors".to_string();
    }
    connectors
        .iter()
        .map(|c| {
            format!(
                "{} -> {} slot {}: ({}, {}) -> ({}, {}) -> ({}, {})",
                c.hub,
                c.peripheral,
                c.slot,
                c.start.x,
                c.start.y,
                c.elbow.x,
                c.elbow.y,
                c.end.x,
                c.end.y
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
