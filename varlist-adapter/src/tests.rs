use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use varlist::{
    ConfigError, Item, ListOptions, ResolvePolicy, ScrollDirection, VisibleWindow,
};

fn items(n: usize) -> Arc<[Item<u64, u32>]> {
    (0..n).map(|i| Item::new(i as u64, i as u32)).collect()
}

fn window(start_index: usize, end_index: usize) -> Option<VisibleWindow> {
    Some(VisibleWindow {
        start_index,
        end_index,
    })
}

fn rendered(c: &ScrollContainer<u64, u32>) -> Vec<(usize, u64, u32, CellVisibility)> {
    let mut out = Vec::new();
    c.for_each_cell(|cell| out.push((cell.index, cell.top, cell.height, cell.visibility)));
    out
}

#[test]
fn invalid_options_are_rejected_at_construction() {
    let err = ScrollContainer::new(ListOptions::new(0, 50), items(3), 0).unwrap_err();
    assert_eq!(err, ConfigError::NonPositiveContainerHeight(0));
    let err = ScrollContainer::new(ListOptions::new(100, 0), items(3), 0).unwrap_err();
    assert_eq!(err, ConfigError::NonPositiveEstimatedItemHeight(0));
}

#[test]
fn first_render_mounts_hidden_cells_over_spacer() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let c = ScrollContainer::new(opts, items(3), 0).unwrap();
    assert_eq!(c.spacer_height(), 150);
    assert_eq!(c.window(), window(0, 1));
    assert_eq!(
        rendered(&c),
        [
            (0, 0, 50, CellVisibility::Hidden),
            (1, 50, 50, CellVisibility::Hidden),
        ]
    );
    assert_eq!(c.resolve_count(), 1);
}

#[test]
fn empty_data_renders_nothing() {
    let c = ScrollContainer::new(ListOptions::new(100, 50), items(0), 0).unwrap();
    assert_eq!(c.window(), None);
    assert_eq!(c.spacer_height(), 0);
    assert!(c.cells().is_empty());
    assert!(rendered(&c).is_empty());
}

#[test]
fn measurement_reveals_cell_and_grows_spacer() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(3), 0).unwrap();

    assert!(c.report_layout(0, 80));
    assert_eq!(c.store().cumulative_height(1), 80);
    assert_eq!(c.spacer_height(), 180);
    assert_eq!(
        rendered(&c),
        [
            (0, 0, 80, CellVisibility::Visible),
            (1, 80, 50, CellVisibility::Hidden),
        ]
    );
}

#[test]
fn each_mount_reports_exactly_once() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(3), 0).unwrap();
    assert!(c.report_layout(1, 70));
    assert!(!c.report_layout(1, 90));
    assert_eq!(c.store().get(1), Some(70));
    assert_eq!(c.spacer_height(), 170);
}

#[test]
fn stale_report_for_unmounted_index_is_ignored() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(10), 0).unwrap();
    assert!(!c.report_layout(7, 10));
    assert_eq!(c.store().get(7), Some(50));
    assert_eq!(c.spacer_height(), 500);
}

#[test]
fn measurement_does_not_move_resolved_window() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(10), 0).unwrap();
    assert_eq!(c.window(), window(0, 1));

    // Item 0 shrinks so item 2 comes into view, but the window only changes on the next scroll.
    assert!(c.report_layout(0, 10));
    assert!(!c.tick(1));
    assert_eq!(c.window(), window(0, 1));
    assert_eq!(c.resolve_count(), 1);

    c.on_scroll(0, 2);
    assert_eq!(c.window(), window(0, 2));
    assert_eq!(c.resolve_count(), 2);
}

#[test]
fn settle_policy_re_resolves_once_after_measurements() {
    let opts = ListOptions::new(100, 50)
        .with_buffer_count(0)
        .with_resolve_policy(ResolvePolicy::AfterMeasurementsSettle);
    let mut c = ScrollContainer::new(opts, items(10), 0).unwrap();
    c.report_layout(0, 10);
    c.report_layout(1, 10);
    assert_eq!(c.resolve_count(), 1);

    assert!(c.tick(5));
    assert_eq!(c.resolve_count(), 2);
    // 10 + 10 + 50 + 50 >= 100 => items 0..=3.
    assert_eq!(c.window(), window(0, 3));

    // Nothing changed since: no further resolution.
    assert!(!c.tick(6));
    assert_eq!(c.resolve_count(), 2);

    // Re-measuring to the same value is idempotent and does not trigger another pass.
    c.report_layout(2, 50);
    assert!(!c.tick(7));
}

#[test]
fn cells_keep_local_state_across_scrolls() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(10), 0).unwrap();
    c.report_layout(1, 50);

    // Window [1, 3]: cell 1 stays mounted and measured, cells 2 and 3 are new.
    c.on_scroll(60, 10);
    assert_eq!(c.window(), window(1, 3));
    let cell1 = c.cell(1).unwrap();
    assert!(cell1.is_measured());
    assert_eq!(cell1.mounted_at_ms(), 0);
    let cell3 = c.cell(3).unwrap();
    assert!(!cell3.is_measured());
    assert_eq!(cell3.mounted_at_ms(), 10);
    assert!(c.cell(0).is_none());

    // Scroll away and back: cell 1 remounts fresh and may report again.
    c.on_scroll(400, 20);
    c.on_scroll(50, 30);
    assert!(!c.cell(1).unwrap().is_measured());
    assert!(c.report_layout(1, 60));
}

#[test]
fn one_resolution_per_scroll_event() {
    let notified = Arc::new(AtomicUsize::new(0));
    let opts = ListOptions::new(100, 20);
    let mut c = ScrollContainer::new(opts, items(1_000), 0)
        .unwrap()
        .with_on_change(Some({
            let notified = Arc::clone(&notified);
            move |_: &ScrollContainer<u64, u32>, _is_scrolling: bool| {
                notified.fetch_add(1, Ordering::Relaxed);
            }
        }));

    for (i, off) in [10u64, 200, 200, 5_000].into_iter().enumerate() {
        c.on_scroll(off, i as u64);
    }
    assert_eq!(notified.load(Ordering::Relaxed), 4);
    assert_eq!(c.resolve_count(), 5);

    // Measurements alone do not notify under the default policy.
    let first = c.window().unwrap().start_index;
    c.report_layout(first, 33);
    c.tick(10);
    assert_eq!(notified.load(Ordering::Relaxed), 4);
}

#[test]
fn buffered_window_after_scroll() {
    let opts = ListOptions::new(100, 50);
    let mut c = ScrollContainer::new(opts, items(20), 0).unwrap();
    c.on_scroll(500, 1);
    let w = c.window().unwrap();
    assert_eq!(w.start_index, 5);
    assert_eq!(c.cells().len(), w.count());
    assert_eq!(c.cells().first().map(ItemCell::index), Some(5));
}

#[test]
fn scroll_past_end_keeps_window_in_range() {
    let opts = ListOptions::new(100, 50).with_buffer_count(2);
    let mut c = ScrollContainer::new(opts, items(10), 0).unwrap();
    c.on_scroll(1_000_000, 1);
    assert_eq!(c.window(), window(7, 9));
    assert_eq!(c.scroll_top(), 1_000_000);
}

#[test]
fn headless_host_leaves_estimates_and_timeout_reveals() {
    let opts = ListOptions::new(100, 25)
        .with_buffer_count(1)
        .with_reveal_after_ms(Some(100));
    let mut c = ScrollContainer::new(opts, items(50), 0).unwrap();

    assert_eq!(c.measure_with(&mut HeadlessHost), 0);
    assert_eq!(c.spacer_height(), 50 * 25);
    assert!(c.cells().iter().all(|cell| !cell.is_visible()));

    c.tick(99);
    assert!(c.cells().iter().all(|cell| !cell.is_visible()));
    c.tick(100);
    assert!(c.cells().iter().all(ItemCell::is_visible));
    assert!(c.cells().iter().all(|cell| !cell.is_measured()));
    assert_eq!(c.spacer_height(), 50 * 25);
}

#[test]
fn headless_host_without_timeout_stays_hidden() {
    let mut c = ScrollContainer::new(ListOptions::new(100, 25), items(5), 0).unwrap();
    c.measure_with(&mut HeadlessHost);
    c.tick(1_000_000);
    assert!(c.cells().iter().all(|cell| !cell.is_visible()));
}

#[test]
fn closure_host_measures_every_unmeasured_cell_once() {
    let calls = AtomicUsize::new(0);
    let opts = ListOptions::new(100, 10).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(100), 0).unwrap();
    let mut host = |_index: usize, item: &Item<u64, u32>| {
        calls.fetch_add(1, Ordering::Relaxed);
        Some(10 + item.content % 3)
    };

    let mounted = c.cells().len();
    assert_eq!(c.measure_with(&mut host), mounted);
    assert_eq!(c.measure_with(&mut host), 0);
    assert_eq!(calls.load(Ordering::Relaxed), mounted);
    assert!(c.cells().iter().all(ItemCell::is_measured));

    let expected: u64 = (0..100u64)
        .map(|i| if i < mounted as u64 { 10 + i % 3 } else { 10 })
        .sum();
    assert_eq!(c.spacer_height(), expected);
}

#[test]
fn new_data_identity_resets_heights() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let data = items(4);
    let mut c = ScrollContainer::new(opts, Arc::clone(&data), 0).unwrap();
    c.report_layout(0, 90);
    assert_eq!(c.spacer_height(), 240);

    // Same collection: nothing happens.
    assert!(!c.set_data(Arc::clone(&data), 1));
    assert_eq!(c.spacer_height(), 240);
    assert_eq!(c.resolve_count(), 1);

    // Equal contents but a new collection: reset to the estimate for the new length.
    assert!(c.set_data(items(6), 2));
    assert_eq!(c.spacer_height(), 300);
    assert!(c.cells().iter().all(|cell| !cell.is_measured()));
    assert_eq!(c.resolve_count(), 2);

    assert!(c.set_data(items(0), 3));
    assert_eq!(c.window(), None);
    assert!(c.cells().is_empty());
}

#[test]
fn changing_estimate_reinitializes_store() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(4), 0).unwrap();
    c.report_layout(0, 90);

    assert_eq!(
        c.set_estimated_item_height(0, 1),
        Err(ConfigError::NonPositiveEstimatedItemHeight(0))
    );
    assert_eq!(c.spacer_height(), 240);

    c.set_estimated_item_height(20, 2).unwrap();
    assert_eq!(c.spacer_height(), 80);
    assert_eq!(c.window(), window(0, 3));
}

#[test]
fn container_height_and_buffer_reconfigure_window() {
    let opts = ListOptions::new(100, 50).with_buffer_count(0);
    let mut c = ScrollContainer::new(opts, items(10), 0).unwrap();
    assert_eq!(
        c.set_container_height(0, 1),
        Err(ConfigError::NonPositiveContainerHeight(0))
    );
    c.set_container_height(200, 1).unwrap();
    assert_eq!(c.window(), window(0, 3));
    c.set_buffer_count(1, 2);
    // start stays at 0; accumulate until >= 200 + 50 => raw end 4; +1 => 5.
    assert_eq!(c.window(), window(0, 5));
}

#[test]
fn is_scrolling_debounces_and_tracks_direction() {
    let opts = ListOptions::new(100, 10).with_is_scrolling_reset_delay_ms(50);
    let mut c = ScrollContainer::new(opts, items(100), 0).unwrap();
    assert!(!c.is_scrolling());

    c.on_scroll(30, 100);
    assert!(c.scroll_state().is_scrolling);
    assert_eq!(c.scroll_direction(), Some(ScrollDirection::Forward));
    c.on_scroll(20, 120);
    assert_eq!(c.scroll_direction(), Some(ScrollDirection::Backward));

    c.tick(160);
    assert!(c.is_scrolling());
    c.tick(170);
    assert!(!c.is_scrolling());
    assert_eq!(c.scroll_direction(), None);
    assert_eq!(c.scroll_state().scroll_top, 20);
}

#[test]
fn cell_offsets_follow_measurements_above_them() {
    let opts = ListOptions::new(100, 50).with_buffer_count(2);
    let mut c = ScrollContainer::new(opts, items(20), 0).unwrap();
    c.on_scroll(500, 1);
    let first = c.window().unwrap().start_index;
    assert_eq!(first, 8);

    c.report_layout(first, 10);
    let cells = rendered(&c);
    assert_eq!(cells[0].1, 8 * 50);
    assert_eq!(cells[1].1, 8 * 50 + 10);
    for (index, top, _, _) in &cells {
        assert_eq!(*top, c.store().cumulative_height(*index));
    }
}

#[test]
fn scroll_to_index_offset_uses_container_height() {
    let opts = ListOptions::new(100, 10);
    let c = ScrollContainer::new(opts, items(50), 0).unwrap();
    assert_eq!(c.scroll_to_index_offset(20, varlist::Align::Start), 200);
    assert_eq!(c.scroll_to_index_offset(20, varlist::Align::End), 110);
    assert_eq!(c.scroll_to_index_offset(49, varlist::Align::Start), 400);
}

#[test]
fn item_cell_writes_only_its_own_index() {
    let mut store = varlist::HeightStore::new(3, 10);
    let mut cell = ItemCell::mount(1, 0);
    assert_eq!(cell.visibility(), CellVisibility::Hidden);
    assert_eq!(cell.on_layout(0, &mut store), Some(1 - 10));
    assert_eq!(store.heights(), &[10, 1, 10]);
    assert_eq!(cell.on_layout(40, &mut store), None);
    assert_eq!(store.heights(), &[10, 1, 10]);
    assert_eq!(cell.top(&store), 10);
    assert_eq!(cell.height(&store), Some(1));
    assert!(!cell.tick(1_000, Some(1)));
}
