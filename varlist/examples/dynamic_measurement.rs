// Example: measurements refine offsets and the total height.
use varlist::{HeightStore, WindowResolver};

fn main() {
    let mut store = HeightStore::new(100, 50);
    let before = WindowResolver::new(&store).resolve(0, 100, 0);
    println!(
        "before: total={} cumulative(1)={} window={before:?}",
        store.total_height(),
        store.cumulative_height(1)
    );

    // Item 0 turned out taller than estimated.
    let delta = store.set(0, 80);
    println!(
        "set(0, 80): delta={delta} total={} cumulative(1)={}",
        store.total_height(),
        store.cumulative_height(1)
    );

    // Zero is clamped to the minimum height instead of collapsing the item.
    store.set(1, 0);
    println!("set(1, 0): height={:?}", store.get(1));

    let after = WindowResolver::new(&store).resolve(0, 100, 0);
    println!("after: window={after:?}");

    let snapshot = store.snapshot();
    let mut remounted = HeightStore::new(100, 50);
    if remounted.restore(&snapshot).is_ok() {
        println!("restored total={}", remounted.total_height());
    }
}
