use alloc::vec::Vec;

use crate::{Align, HeightStore, PositionedItem, VisibleWindow};

/// Computes which items to materialize for a scroll position.
///
/// The resolver is a pure read over a [`HeightStore`] snapshot: it never mutates heights or
/// scroll state. Callers decide when to re-run it.
#[derive(Clone, Copy, Debug)]
pub struct WindowResolver<'a> {
    store: &'a HeightStore,
}

impl<'a> WindowResolver<'a> {
    pub fn new(store: &'a HeightStore) -> Self {
        Self { store }
    }

    /// Resolves the inclusive window for `scroll_top`.
    ///
    /// 1. The raw start is the item containing `scroll_top` (the first item whose bottom edge
    ///    is past it), clamped to the last item. The start index is that minus `buffer_count`.
    /// 2. Heights are accumulated forward from the start index until the running total reaches
    ///    (`>=`) `viewport_height + buffer_count * estimate`. The item where that happens is the
    ///    raw end. The raw end never stops short of the item holding the last visible pixel.
    /// 3. The end index is the raw end plus `buffer_count`, clamped to the last item.
    ///
    /// Returns `None` for an empty list.
    pub fn resolve(
        &self,
        scroll_top: u64,
        viewport_height: u32,
        buffer_count: usize,
    ) -> Option<VisibleWindow> {
        let prefix = self.store.prefix();
        let heights = self.store.heights();
        let last = heights.len().checked_sub(1)?;

        let raw_start = prefix.index_at_offset(scroll_top)?;
        let start_index = raw_start.saturating_sub(buffer_count);

        let estimate = self.store.estimate() as u64;
        let threshold = (viewport_height as u64)
            .saturating_add((buffer_count as u64).saturating_mul(estimate));
        let mut running = 0u64;
        let mut raw_end = last;
        for (i, &height) in heights[start_index..].iter().enumerate() {
            running = running.saturating_add(height as u64);
            if running >= threshold {
                raw_end = start_index + i;
                break;
            }
        }

        if viewport_height > 0 {
            let last_visible = scroll_top.saturating_add(viewport_height as u64 - 1);
            if let Some(bottom) = prefix.index_at_offset(last_visible) {
                raw_end = raw_end.max(bottom);
            }
        }

        let end_index = raw_end.saturating_add(buffer_count).min(last);
        vtrace!(
            scroll_top,
            viewport_height,
            buffer_count,
            start_index,
            end_index,
            "WindowResolver::resolve"
        );
        Some(VisibleWindow {
            start_index,
            end_index,
        })
    }

    pub fn item(&self, index: usize) -> Option<PositionedItem> {
        let height = self.store.get(index)?;
        Some(PositionedItem {
            index,
            top: self.store.cumulative_height(index),
            height,
        })
    }

    /// Visits every item of `window` in order with its current offset.
    ///
    /// Offsets are read from the store at call time, so they reflect every measurement applied
    /// so far even if the window itself was resolved earlier.
    pub fn for_each_item(&self, window: VisibleWindow, mut f: impl FnMut(PositionedItem)) {
        let heights = self.store.heights();
        let end = window.end_index.min(heights.len().saturating_sub(1));
        if heights.is_empty() || window.start_index > end {
            return;
        }
        let mut top = self.store.cumulative_height(window.start_index);
        for (i, &height) in heights[window.start_index..=end].iter().enumerate() {
            f(PositionedItem {
                index: window.start_index + i,
                top,
                height,
            });
            top = top.saturating_add(height as u64);
        }
    }

    /// Collects the items of `window` into `out` (clears `out` first).
    pub fn collect_items(&self, window: VisibleWindow, out: &mut Vec<PositionedItem>) {
        out.clear();
        self.for_each_item(window, |it| out.push(it));
    }

    pub fn max_scroll_top(&self, viewport_height: u32) -> u64 {
        self.store
            .total_height()
            .saturating_sub(viewport_height as u64)
    }

    /// Computes the scroll offset that brings `index` into view.
    ///
    /// The resolver never writes scroll state; hosts apply the returned offset to their
    /// viewport, which then reports it back as a regular scroll event.
    pub fn scroll_to_index_offset(
        &self,
        index: usize,
        align: Align,
        scroll_top: u64,
        viewport_height: u32,
    ) -> u64 {
        let Some(last) = self.store.len().checked_sub(1) else {
            return 0;
        };
        let Some(item) = self.item(index.min(last)) else {
            return 0;
        };
        let view = viewport_height as u64;

        let target = match align {
            Align::Start => item.top,
            Align::End => item.bottom().saturating_sub(view),
            Align::Center => {
                let center = item.top.saturating_add(item.height as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur_end = scroll_top.saturating_add(view);
                if item.top >= scroll_top && item.bottom() <= cur_end {
                    scroll_top
                } else if item.top < scroll_top {
                    item.top
                } else {
                    item.bottom().saturating_sub(view)
                }
            }
        };

        target.min(self.max_scroll_top(viewport_height))
    }
}
