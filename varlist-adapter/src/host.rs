use varlist::Item;

/// The host environment's layout engine, as seen by mounted cells.
///
/// `measure` is asked for the rendered height of an item after the host has inserted it. A
/// host without real layout returns `None`, and the item keeps its estimated height.
pub trait LayoutHost<K, T> {
    fn measure(&mut self, index: usize, item: &Item<K, T>) -> Option<u32>;
}

impl<K, T, F> LayoutHost<K, T> for F
where
    F: FnMut(usize, &Item<K, T>) -> Option<u32>,
{
    fn measure(&mut self, index: usize, item: &Item<K, T>) -> Option<u32> {
        self(index, item)
    }
}

/// A host with no layout engine (e.g. a non-visual test harness). Never measures anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessHost;

impl<K, T> LayoutHost<K, T> for HeadlessHost {
    fn measure(&mut self, _index: usize, _item: &Item<K, T>) -> Option<u32> {
        None
    }
}
