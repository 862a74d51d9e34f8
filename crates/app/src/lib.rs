//! # minispace-app
//!
//! Application layer — the space manager and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** the outside world implements:
//!   - `View` / `Illustration`: draw device cards, illustrations, connectors
//!   - `EventPublisher`: deliver change events
//! - Provide the **driving use-case** [`SpaceService`](services::space_service::SpaceService):
//!   add/delete devices, switch status, connect/disconnect, drag, resize,
//!   label editing, and the pending-connection protocol
//! - Provide **in-process infrastructure** that needs no IO (event bus,
//!   resize debouncer)
//!
//! ## Dependency rule
//! Depends on `minispace-domain` only (plus `tokio` for channels and instants).
//! Never imports the binary crate or a concrete view.

pub mod debounce;
pub mod event_bus;
pub mod pending;
pub mod ports;
pub mod services;
