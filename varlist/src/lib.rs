//! A headless engine for variable-height virtual scrolling lists.
//!
//! For the scroll container and measured item cells that drive this engine from a host UI, see
//! the `varlist-adapter` crate.
//!
//! Given `N` items whose rendered heights are unknown up front, this crate maintains:
//! - a [`HeightStore`] seeded with an estimate and refined as measurements arrive
//! - a [`PrefixHeightIndex`] (Fenwick tree) for cumulative offsets and the total scroll height
//! - a [`WindowResolver`] that maps a scroll offset to the minimal buffered window of items
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport height and scroll offset
//! - measured item heights once the host has laid items out
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod options;
mod prefix;
mod resolver;
mod store;
mod types;


pub use error::{ConfigError, Result};
pub use options::{
    DEFAULT_BUFFER_COUNT, DEFAULT_IS_SCROLLING_RESET_DELAY_MS, ListOptions, RawListConfig,
};
pub use prefix::PrefixHeightIndex;
pub use resolver::WindowResolver;
pub use store::{HeightSnapshot, HeightStore, MIN_ITEM_HEIGHT};
pub use types::{
    Align, Item, PositionedItem, ResolvePolicy, ScrollDirection, ScrollState, VisibleWindow,
};
