// Example: resolve the visible window for a large list.
use varlist::{Align, DEFAULT_BUFFER_COUNT, HeightStore, WindowResolver};

fn main() {
    let store = HeightStore::new(1_000_000, 24);
    let resolver = WindowResolver::new(&store);

    let window = resolver.resolve(123_456, 600, DEFAULT_BUFFER_COUNT);
    println!("total_height={}", store.total_height());
    println!("window={window:?}");

    if let Some(window) = window {
        let mut items = Vec::new();
        resolver.collect_items(window, &mut items);
        println!("first_rendered={:?}", items.first());
    }

    let off = resolver.scroll_to_index_offset(999_999, Align::End, 123_456, 600);
    println!("scroll_to_index(999_999, End) => offset={off}");
}
