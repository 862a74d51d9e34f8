//! # minispace-domain
//!
//! Pure domain model for the minispace smart-space editor.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error conventions, events
//! - Define **Devices** (placed hubs and peripherals with status and label)
//! - Allocate per-kind identities ([`identity`])
//! - Own the authoritative device collection ([`registry`])
//! - Enforce hub/peripheral link invariants ([`connection`])
//! - Translate between normalized and pixel positions ([`geometry`], [`layout`])
//! - Derive connector lines from links and layout ([`connector`])
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, the binary, or IO crates.
//! Rendering and event delivery are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod event;
pub mod id;

pub mod connection;
pub mod connector;
pub mod device;
pub mod geometry;
pub mod identity;
pub mod label;
pub mod layout;
pub mod registry;
