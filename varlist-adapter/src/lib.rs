//! Adapter utilities for the `varlist` crate.
//!
//! The `varlist` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides the framework-neutral pieces a host UI wires to its own scroll view:
//!
//! - [`ScrollContainer`]: owns the scroll offset, resolves the window on scroll events, and
//!   mounts/unmounts cells
//! - [`ItemCell`]: one mounted item that stays hidden until measured and reports its height once
//! - [`LayoutHost`]: the hook through which the host's layout engine supplies measured heights
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cell;
mod container;
mod host;

#[cfg(test)]
mod tests;

pub use cell::{CellVisibility, ItemCell};
pub use container::{OnChangeCallback, RenderedCell, ScrollContainer};
pub use host::{HeadlessHost, LayoutHost};
