use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp;

use varlist::{
    Align, ConfigError, HeightStore, Item, ListOptions, ResolvePolicy, Result, ScrollDirection,
    ScrollState, VisibleWindow, WindowResolver,
};

use crate::{CellVisibility, ItemCell, LayoutHost};

/// A callback fired after every window resolution.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback<K, T> = Arc<dyn Fn(&ScrollContainer<K, T>, bool) + Send + Sync>;

/// A cell as the host should render it.
#[derive(Debug)]
pub struct RenderedCell<'a, K, T> {
    pub index: usize,
    pub item: &'a Item<K, T>,
    /// Absolute offset inside the spacer.
    pub top: u64,
    pub height: u32,
    pub visibility: CellVisibility,
}

/// The scrollable viewport of a virtual list.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` when the host viewport reports a new offset
/// - `report_layout` / `measure_with` once mounted cells have been laid out
/// - `tick(now_ms)` each frame/timer tick (reveal timeouts, `is_scrolling` debouncing, and
///   settled re-resolution under [`ResolvePolicy::AfterMeasurementsSettle`])
///
/// The host renders a spacer of `spacer_height()` and then every cell from `for_each_cell`,
/// absolutely positioned at its `top`.
///
/// The window is re-resolved on scroll events, on data identity changes and on
/// reconfiguration. Measurements update the shared heights immediately, so offsets and the
/// spacer height are always current, but they never move the already resolved window.
pub struct ScrollContainer<K, T> {
    options: ListOptions,
    data: Arc<[Item<K, T>]>,
    store: HeightStore,

    scroll_top: u64,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    window: Option<VisibleWindow>,
    cells: Vec<ItemCell>, // ascending by index, one per window index
    heights_changed: bool,
    resolve_count: u64,

    on_change: Option<OnChangeCallback<K, T>>,
}

impl<K, T> ScrollContainer<K, T> {
    /// Creates a container and resolves its first window at `options.initial_scroll_top`.
    pub fn new(options: ListOptions, data: Arc<[Item<K, T>]>, now_ms: u64) -> Result<Self> {
        options.validate()?;
        vdebug!(
            count = data.len(),
            container_height = options.container_height,
            estimated_item_height = options.estimated_item_height,
            buffer_count = options.buffer_count,
            "ScrollContainer::new"
        );
        let store = HeightStore::new(data.len(), options.estimated_item_height);
        let mut c = Self {
            scroll_top: options.initial_scroll_top,
            options,
            data,
            store,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            window: None,
            cells: Vec::new(),
            heights_changed: false,
            resolve_count: 0,
            on_change: None,
        };
        c.resolve(now_ms);
        Ok(c)
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ScrollContainer<K, T>, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&ScrollContainer<K, T>, bool) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn data(&self) -> &Arc<[Item<K, T>]> {
        &self.data
    }

    pub fn store(&self) -> &HeightStore {
        &self.store
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            scroll_top: self.scroll_top,
            is_scrolling: self.is_scrolling,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// The window resolved by the most recent resolution. `None` for an empty list.
    pub fn window(&self) -> Option<VisibleWindow> {
        self.window
    }

    /// Height of the placeholder that gives the host scrollbar its full range.
    pub fn spacer_height(&self) -> u64 {
        self.store.total_height()
    }

    /// Number of window resolutions performed so far (one per render pass).
    pub fn resolve_count(&self) -> u64 {
        self.resolve_count
    }

    pub fn cells(&self) -> &[ItemCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&ItemCell> {
        self.cell_position(index).map(|pos| &self.cells[pos])
    }

    /// Applies a scroll notification from the host viewport.
    ///
    /// Resolves the window exactly once for this event, mounting cells that entered it and
    /// unmounting those that left. Out-of-range offsets are accepted as reported; the resolver
    /// clamps them internally.
    pub fn on_scroll(&mut self, scroll_top: u64, now_ms: u64) {
        vtrace!(scroll_top, now_ms, "ScrollContainer::on_scroll");
        let prev = self.scroll_top;
        self.scroll_top = scroll_top;
        self.scroll_direction = match scroll_top.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.is_scrolling = true;
        self.last_scroll_event_ms = Some(now_ms);
        self.resolve(now_ms);
    }

    /// Replaces the item collection.
    ///
    /// Only a new collection (by `Arc` identity) counts as a change: the height store is reset
    /// to the estimate for the new length, every cell is unmounted, and the window is resolved
    /// again. Passing the same `Arc` is a no-op and returns `false`.
    pub fn set_data(&mut self, data: Arc<[Item<K, T>]>, now_ms: u64) -> bool {
        if Arc::ptr_eq(&self.data, &data) {
            return false;
        }
        vdebug!(
            prev = self.data.len(),
            next = data.len(),
            "ScrollContainer::set_data"
        );
        self.data = data;
        self.reinitialize(now_ms);
        true
    }

    /// Changes the estimate, which discards every measurement.
    pub fn set_estimated_item_height(&mut self, estimate: u32, now_ms: u64) -> Result<()> {
        if estimate == 0 {
            return Err(ConfigError::NonPositiveEstimatedItemHeight(0));
        }
        if self.options.estimated_item_height == estimate {
            return Ok(());
        }
        self.options.estimated_item_height = estimate;
        self.reinitialize(now_ms);
        Ok(())
    }

    pub fn set_container_height(&mut self, container_height: u32, now_ms: u64) -> Result<()> {
        if container_height == 0 {
            return Err(ConfigError::NonPositiveContainerHeight(0));
        }
        if self.options.container_height == container_height {
            return Ok(());
        }
        self.options.container_height = container_height;
        self.resolve(now_ms);
        Ok(())
    }

    pub fn set_buffer_count(&mut self, buffer_count: usize, now_ms: u64) {
        if self.options.buffer_count == buffer_count {
            return;
        }
        self.options.buffer_count = buffer_count;
        self.resolve(now_ms);
    }

    /// Delivers the measured height of the mounted cell at `index`.
    ///
    /// Returns `true` if this was the cell's first measurement. Reports for indexes that are
    /// not mounted (e.g. scrolled away before layout finished) are ignored.
    pub fn report_layout(&mut self, index: usize, height: u32) -> bool {
        let Some(pos) = self.cell_position(index) else {
            vwarn!(index, height, "report_layout: no mounted cell at index");
            return false;
        };
        match self.cells[pos].on_layout(height, &mut self.store) {
            Some(delta) => {
                if delta != 0 {
                    self.heights_changed = true;
                }
                true
            }
            None => false,
        }
    }

    /// Asks `host` for the height of every mounted, unmeasured cell.
    ///
    /// Returns the number of cells measured. A headless host measures nothing and leaves every
    /// cell at its estimated height.
    pub fn measure_with(&mut self, host: &mut impl LayoutHost<K, T>) -> usize {
        let mut measured = 0usize;
        for cell in self.cells.iter_mut().filter(|c| !c.is_measured()) {
            let index = cell.index();
            let Some(item) = self.data.get(index) else {
                continue;
            };
            let Some(height) = host.measure(index, item) else {
                continue;
            };
            if let Some(delta) = cell.on_layout(height, &mut self.store) {
                measured += 1;
                if delta != 0 {
                    self.heights_changed = true;
                }
            }
        }
        vtrace!(measured, "measure_with");
        measured
    }

    /// Advances timers.
    ///
    /// - Reveals unmeasured cells whose `reveal_after_ms` timeout elapsed.
    /// - Resets `is_scrolling` after `is_scrolling_reset_delay_ms` without scroll events.
    /// - Under [`ResolvePolicy::AfterMeasurementsSettle`], re-resolves once if measurements
    ///   changed any height since the last resolution.
    ///
    /// Returns `true` if the window was re-resolved.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let reveal_after_ms = self.options.reveal_after_ms;
        for cell in &mut self.cells {
            cell.tick(now_ms, reveal_after_ms);
        }

        if let Some(last) = self.last_scroll_event_ms {
            if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
                self.is_scrolling = false;
                self.scroll_direction = None;
                self.last_scroll_event_ms = None;
            }
        }

        if self.options.resolve_policy == ResolvePolicy::AfterMeasurementsSettle
            && self.heights_changed
        {
            vtrace!(now_ms, "tick: re-resolving after measurements settled");
            self.resolve(now_ms);
            return true;
        }
        false
    }

    /// Visits every mounted cell in index order with its current offset and height.
    pub fn for_each_cell(&self, mut f: impl FnMut(RenderedCell<'_, K, T>)) {
        let Some(first) = self.cells.first() else {
            return;
        };
        let mut top = first.top(&self.store);
        for cell in &self.cells {
            let index = cell.index();
            let (Some(item), Some(height)) = (self.data.get(index), self.store.get(index)) else {
                continue;
            };
            f(RenderedCell {
                index,
                item,
                top,
                height,
                visibility: cell.visibility(),
            });
            top = top.saturating_add(height as u64);
        }
    }

    /// Computes the offset the host should scroll to in order to show `index`.
    ///
    /// The container does not scroll by itself: apply the offset to the host viewport and let
    /// it report back through `on_scroll`.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        WindowResolver::new(&self.store).scroll_to_index_offset(
            index,
            align,
            self.scroll_top,
            self.options.container_height,
        )
    }

    fn reinitialize(&mut self, now_ms: u64) {
        self.store
            .initialize(self.data.len(), self.options.estimated_item_height);
        self.cells.clear();
        self.resolve(now_ms);
    }

    fn resolve(&mut self, now_ms: u64) {
        self.window = WindowResolver::new(&self.store).resolve(
            self.scroll_top,
            self.options.container_height,
            self.options.buffer_count,
        );
        self.reconcile_cells(now_ms);
        self.heights_changed = false;
        self.resolve_count = self.resolve_count.saturating_add(1);
        self.notify();
    }

    fn reconcile_cells(&mut self, now_ms: u64) {
        let Some(window) = self.window else {
            self.cells.clear();
            return;
        };
        let mut kept = core::mem::take(&mut self.cells)
            .into_iter()
            .filter(|c| window.contains(c.index()))
            .peekable();
        let mut next = Vec::with_capacity(window.count());
        for index in window.indices() {
            let cell = kept
                .next_if(|c| c.index() == index)
                .unwrap_or_else(|| ItemCell::mount(index, now_ms));
            next.push(cell);
        }
        self.cells = next;
    }

    fn cell_position(&self, index: usize) -> Option<usize> {
        self.cells.binary_search_by_key(&index, ItemCell::index).ok()
    }

    fn notify(&self) {
        if let Some(cb) = &self.on_change {
            cb(self, self.is_scrolling);
        }
    }
}

impl<K, T> core::fmt::Debug for ScrollContainer<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollContainer")
            .field("options", &self.options)
            .field("count", &self.data.len())
            .field("scroll_top", &self.scroll_top)
            .field("is_scrolling", &self.is_scrolling)
            .field("window", &self.window)
            .field("cells", &self.cells.len())
            .field("resolve_count", &self.resolve_count)
            .finish_non_exhaustive()
    }
}
