// Example: range math and scroll-to helper on a million rows.
use vlist::{Align, ViewportState, Window, WindowOptions};

fn main() {
    let mut w = Window::new(WindowOptions::new(60).with_overscan(2)).expect("valid options");
    w.set_count(1_000_000);
    w.set_viewport(ViewportState::new(123_456, 400));

    let mut items = Vec::new();
    w.collect_visible_items(&mut items);
    println!("total_extent={}", w.total_extent());
    println!("visible_range={:?}", w.visible_range());
    println!("capacity={}", w.capacity());
    println!("first_visible={:?}", items.first());

    let off = w.scroll_to_index(999_999, Align::End);
    println!("after scroll_to_index: offset={off} range={:?}", w.visible_range());
}
