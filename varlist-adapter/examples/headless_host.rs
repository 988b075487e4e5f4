// Example: driving a scroll container without a layout engine.
use std::sync::Arc;

use varlist::{Item, ListOptions};
use varlist_adapter::{HeadlessHost, ScrollContainer};

fn main() {
    let data: Arc<[Item<u32, String>]> = (0..10_000)
        .map(|i| Item::new(i, format!("row {i}")))
        .collect();

    let opts = ListOptions::new(400, 32).with_reveal_after_ms(Some(50));
    let Ok(mut list) = ScrollContainer::new(opts, data, 0) else {
        return;
    };

    list.on_scroll(6_400, 16);
    let measured = list.measure_with(&mut HeadlessHost);
    println!(
        "window={:?} measured={measured} spacer={}",
        list.window(),
        list.spacer_height()
    );

    // Nothing was measured, so cells only appear once the reveal timeout elapses.
    list.tick(100);
    list.for_each_cell(|cell| {
        println!(
            "{:>5} top={:>6} height={} {:?} {}",
            cell.index, cell.top, cell.height, cell.visibility, cell.item.content
        );
    });
}
