use alloc::vec::Vec;

use crate::prefix::PrefixHeightIndex;
use crate::{ConfigError, Result};

/// Smallest height the store will hold. Lower writes are clamped up to it.
pub const MIN_ITEM_HEIGHT: u32 = 1;

/// Per-item heights, seeded with an estimate and refined by measurements.
///
/// The store is index-aligned with the item collection. Every entry is at least
/// [`MIN_ITEM_HEIGHT`] at all times, and the derived [`PrefixHeightIndex`] is updated on every
/// write.
#[derive(Clone, Debug)]
pub struct HeightStore {
    heights: Vec<u32>,
    estimate: u32,
    prefix: PrefixHeightIndex,
}

impl HeightStore {
    pub fn new(count: usize, estimate: u32) -> Self {
        let mut store = Self {
            heights: Vec::new(),
            estimate: MIN_ITEM_HEIGHT,
            prefix: PrefixHeightIndex::default(),
        };
        store.initialize(count, estimate);
        store
    }

    /// Resets all `count` entries to `estimate`, discarding any measurements.
    pub fn initialize(&mut self, count: usize, estimate: u32) {
        let estimate = clamp_height(estimate);
        vdebug!(count, estimate, "HeightStore::initialize");
        self.estimate = estimate;
        self.heights.clear();
        self.heights.resize(count, estimate);
        self.rebuild_prefix();
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    /// Overwrites the height at `index` and returns the applied delta.
    ///
    /// Zero is clamped to [`MIN_ITEM_HEIGHT`]. Writing the current value again is a no-op
    /// returning 0, as is a write to an index past the end.
    pub fn set(&mut self, index: usize, height: u32) -> i64 {
        if index >= self.heights.len() {
            vwarn!(index, len = self.heights.len(), "HeightStore::set: index out of range");
            return 0;
        }
        if height < MIN_ITEM_HEIGHT {
            vwarn!(index, height, "HeightStore::set: clamping non-positive height");
        }
        let height = clamp_height(height);
        let cur = self.heights[index];
        if cur == height {
            return 0;
        }
        self.heights[index] = height;
        let delta = height as i64 - cur as i64;
        self.prefix.add(index, delta);
        vtrace!(index, height, delta, "HeightStore::set");
        delta
    }

    /// Applies several writes and returns the summed delta.
    pub fn set_many(&mut self, heights: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        heights
            .into_iter()
            .fold(0i64, |acc, (index, height)| {
                acc.saturating_add(self.set(index, height))
            })
    }

    pub fn prefix(&self) -> &PrefixHeightIndex {
        &self.prefix
    }

    pub fn cumulative_height(&self, index: usize) -> u64 {
        self.prefix.cumulative_height(index)
    }

    pub fn total_height(&self) -> u64 {
        self.prefix.total_height()
    }

    /// Captures every per-index height, e.g. to warm a remounted list.
    pub fn snapshot(&self) -> HeightSnapshot {
        HeightSnapshot {
            estimate: self.estimate,
            heights: self.heights.clone(),
        }
    }

    /// Replaces all heights with a previously captured snapshot.
    ///
    /// The snapshot must cover exactly as many items as the store. Entries are clamped like
    /// any other write.
    pub fn restore(&mut self, snapshot: &HeightSnapshot) -> Result<()> {
        if snapshot.heights.len() != self.heights.len() {
            return Err(ConfigError::SnapshotLengthMismatch {
                expected: self.heights.len(),
                actual: snapshot.heights.len(),
            });
        }
        self.estimate = clamp_height(snapshot.estimate);
        for (slot, &height) in self.heights.iter_mut().zip(&snapshot.heights) {
            *slot = clamp_height(height);
        }
        self.rebuild_prefix();
        vdebug!(len = self.heights.len(), "HeightStore::restore");
        Ok(())
    }

    fn rebuild_prefix(&mut self) {
        self.prefix = PrefixHeightIndex::from_heights(&self.heights);
    }
}

/// An exported copy of a [`HeightStore`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightSnapshot {
    pub estimate: u32,
    pub heights: Vec<u32>,
}

fn clamp_height(height: u32) -> u32 {
    height.max(MIN_ITEM_HEIGHT)
}
