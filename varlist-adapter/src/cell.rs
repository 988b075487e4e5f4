use varlist::HeightStore;

/// Whether a mounted cell should be painted.
///
/// A hidden cell still takes part in layout so the host can measure it; it just must not be
/// drawn, because its offset is still based on an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellVisibility {
    Hidden,
    Visible,
}

/// One materialized item of the list.
///
/// The "measured yet" flag lives here, per cell, and never in shared state: a cell settling only
/// changes itself. The only thing that crosses into the shared [`HeightStore`] is the committed
/// height, and only at this cell's own index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemCell {
    index: usize,
    mounted_at_ms: u64,
    measured: bool,
    visibility: CellVisibility,
}

impl ItemCell {
    /// Mounts a hidden, unmeasured cell for `index`.
    pub fn mount(index: usize, now_ms: u64) -> Self {
        Self {
            index,
            mounted_at_ms: now_ms,
            measured: false,
            visibility: CellVisibility::Hidden,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mounted_at_ms(&self) -> u64 {
        self.mounted_at_ms
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn visibility(&self) -> CellVisibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == CellVisibility::Visible
    }

    /// Called once the host has laid the cell out and knows its real height.
    ///
    /// The first call for this mount writes the height into `store` and reveals the cell,
    /// returning the applied height delta. Later calls return `None` and change nothing.
    pub fn on_layout(&mut self, measured: u32, store: &mut HeightStore) -> Option<i64> {
        if self.measured {
            vtrace!(index = self.index, measured, "ItemCell::on_layout: already measured");
            return None;
        }
        self.measured = true;
        self.visibility = CellVisibility::Visible;
        let delta = store.set(self.index, measured);
        vtrace!(index = self.index, measured, delta, "ItemCell::on_layout");
        Some(delta)
    }

    /// Reveals an unmeasured cell at its estimated height once `reveal_after_ms` has elapsed.
    ///
    /// Returns `true` if the cell became visible on this call. With no timeout configured the
    /// cell stays hidden until it is measured.
    pub fn tick(&mut self, now_ms: u64, reveal_after_ms: Option<u64>) -> bool {
        if self.visibility == CellVisibility::Visible {
            return false;
        }
        let Some(delay) = reveal_after_ms else {
            return false;
        };
        if now_ms.saturating_sub(self.mounted_at_ms) < delay {
            return false;
        }
        vdebug!(index = self.index, now_ms, "ItemCell: revealing unmeasured cell");
        self.visibility = CellVisibility::Visible;
        true
    }

    /// The cell's offset: the true cumulative height of everything before it.
    pub fn top(&self, store: &HeightStore) -> u64 {
        store.cumulative_height(self.index)
    }

    pub fn height(&self, store: &HeightStore) -> Option<u32> {
        store.get(self.index)
    }
}
