use core::ops::RangeInclusive;

/// One entry of the list: a stable identity plus an opaque payload.
///
/// `id` is the rendering key. The engine never inspects `content`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<K, T> {
    pub id: K,
    pub content: T,
}

impl<K, T> Item<K, T> {
    pub fn new(id: K, content: T) -> Self {
        Self { id, content }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The inclusive index range to materialize.
///
/// An empty list has no window at all (`Option::None` from the resolver), so a
/// `VisibleWindow` always holds at least one index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl VisibleWindow {
    /// Number of indexes in the window.
    pub fn count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// An item placed on the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedItem {
    pub index: usize,
    /// Cumulative height of every item before `index`.
    pub top: u64,
    pub height: u32,
}

impl PositionedItem {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// Scroll position as last reported by the host viewport.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_top: u64,
    pub is_scrolling: bool,
}

/// When a scroll container recomputes its window.
///
/// Scroll events and data identity changes always trigger a resolution. This only controls
/// what happens after height measurements arrive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvePolicy {
    /// Measurements only affect the next scroll-driven resolution.
    #[default]
    OnScrollOnly,
    /// Re-resolve once on the next tick after any measurement changed a height.
    AfterMeasurementsSettle,
}
