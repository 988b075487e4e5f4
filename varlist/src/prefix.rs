use crate::fenwick::Fenwick;

/// Cumulative heights over a [`crate::HeightStore`].
///
/// Backed by a Fenwick tree that the store updates in place on every height write, so a
/// cumulative read is `O(log n)` and never observes a stale sum.
#[derive(Clone, Debug, Default)]
pub struct PrefixHeightIndex {
    sums: Fenwick,
}

impl PrefixHeightIndex {
    pub(crate) fn from_heights(heights: &[u32]) -> Self {
        Self {
            sums: Fenwick::from_heights(heights),
        }
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        self.sums.add(index, delta);
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the heights of items `0..index`.
    ///
    /// `cumulative_height(0)` is always 0; indexes past the end clamp to the total height.
    pub fn cumulative_height(&self, index: usize) -> u64 {
        self.sums.prefix_sum(index)
    }

    pub fn total_height(&self) -> u64 {
        self.sums.total()
    }

    /// Returns the item whose span `[top, bottom)` contains `offset`.
    ///
    /// Offsets at or past the total height map to the last item. Returns `None` for an empty
    /// list.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        Some(self.sums.lower_bound(offset).min(last))
    }
}
