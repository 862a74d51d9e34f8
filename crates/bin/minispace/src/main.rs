//! # minispace, the device space console
//!
//! Composition root: wires the space manager to a text view and an
//! in-process event bus, then drives it from commands read on stdin.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize tracing
//! - Construct the space service, injecting the view and the publisher
//! - Read commands line by line and print the replies
//! - Run debounced relayouts once a burst of resizes settles
//!
//! No domain logic belongs here.

mod command;
mod config;
mod console;
mod view;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use minispace_app::event_bus::InProcessEventBus;
use minispace_app::services::space_service::SpaceService;

use crate::command::Command;
use crate::config::Config;
use crate::console::Reply;
use crate::view::TextView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let mut events = event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(
                    event_id = %event.id,
                    event_type = ?event.event_type,
                    device_id = ?event.device_id.map(|id| id.to_string()),
                    data = %event.data,
                    "space event"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Service
    let mut space = SpaceService::new(config.space_settings(), TextView::default(), event_bus);
    tracing::info!(
        width = config.canvas.width,
        height = config.canvas.height,
        "space ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = space.resize_deadline();
        tokio::select! {
            () = sleep_until(deadline) => {
                space.flush_resize(Instant::now());
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        eprintln!("error: {err}");
                        continue;
                    }
                };
                match console::execute(&mut space, command, Instant::now()) {
                    Ok(Reply::Text(text)) => println!("{text}"),
                    Ok(Reply::Quit) => break,
                    Err(err) => eprintln!("error: {err}"),
                }
            }
        }
    }

    // a resize typed right before quitting still lands
    if let Some(deadline) = space.resize_deadline() {
        space.flush_resize(deadline);
    }
    tracing::info!(devices = space.registry().len(), "bye");
    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
