// Example: a host whose layout engine reports real heights after mount.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use varlist::{Align, Item, ListOptions, ResolvePolicy};
use varlist_adapter::ScrollContainer;

fn main() {
    let data: Arc<[Item<u64, String>]> = (0..1_000u64)
        .map(|i| Item::new(i, "word ".repeat(1 + (i % 7) as usize)))
        .collect();

    let renders = Arc::new(AtomicUsize::new(0));
    let opts = ListOptions::new(300, 20)
        .with_buffer_count(3)
        .with_resolve_policy(ResolvePolicy::AfterMeasurementsSettle);
    let Ok(list) = ScrollContainer::new(opts, data, 0) else {
        return;
    };
    let mut list = list.with_on_change(Some({
        let renders = Arc::clone(&renders);
        move |_: &ScrollContainer<u64, String>, _is_scrolling: bool| {
            renders.fetch_add(1, Ordering::Relaxed);
        }
    }));

    // Pretend each line of text wraps every 30 bytes, 18px per line.
    let mut layout = |_index: usize, item: &Item<u64, String>| {
        let lines = item.content.len().div_ceil(30).max(1) as u32;
        Some(lines * 18)
    };

    let mut now_ms = 0;
    for scroll_top in [0u64, 250, 900, 2_000] {
        now_ms += 16;
        list.on_scroll(scroll_top, now_ms);
        let measured = list.measure_with(&mut layout);
        let re_resolved = list.tick(now_ms);
        println!(
            "scroll_top={scroll_top} window={:?} measured={measured} re_resolved={re_resolved}",
            list.window()
        );
    }

    let target = list.scroll_to_index_offset(500, Align::Center);
    list.on_scroll(target, now_ms + 16);
    println!(
        "centered 500 at offset {target}: window={:?} renders={}",
        list.window(),
        renders.load(Ordering::Relaxed)
    );
}
