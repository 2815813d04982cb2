use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::{
    Align, ConfigError, ScrollDirection, ViewportState, VisibleItem, VisibleRange, WindowOptions,
};

/// A headless, fixed-extent list window.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects or items, only their count.
/// - Your adapter drives it by providing viewport geometry and scroll offsets.
/// - Rendering is exposed via iteration APIs (`for_each_visible_item`) and ranges.
///
/// For node recycling on top of the window, see the `vlist-recycler` crate.
#[derive(Clone, Debug)]
pub struct Window {
    options: WindowOptions,
    count: usize,
    viewport: ViewportState,
    scroll_direction: Option<ScrollDirection>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Window {
    /// Creates a new, empty window from options.
    ///
    /// If `options.initial_viewport` is set, it is applied immediately.
    pub fn new(options: WindowOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        vdebug!(
            item_extent = options.item_extent,
            overscan = options.overscan,
            "Window::new"
        );
        Ok(Self {
            viewport: options.initial_viewport.unwrap_or_default(),
            count: 0,
            scroll_direction: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Replaces the options. Count and viewport are kept.
    ///
    /// Invalid options are rejected and leave the window unchanged.
    pub fn set_options(&mut self, options: WindowOptions) -> Result<(), ConfigError> {
        if let Err(err) = options.validate() {
            vwarn!(?err, "Window::set_options rejected");
            return Err(err);
        }
        self.options = options;
        vtrace!(
            item_extent = self.options.item_extent,
            overscan = self.options.overscan,
            "Window::set_options"
        );
        self.notify();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut WindowOptions),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Window) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// On a typical frame an adapter updates the viewport extent, the scroll offset and the
    /// count together. Without batching each setter fires `on_change` on its own.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        let out = f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
        out
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        if self.count == count {
            return;
        }
        vtrace!(from = self.count, to = count, "Window::set_count");
        self.count = count;
        self.notify();
    }

    pub fn item_extent(&self) -> u32 {
        self.options.item_extent
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.viewport.scroll_offset
    }

    pub fn viewport_extent(&self) -> u32 {
        self.viewport.extent
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_viewport(&mut self, viewport: ViewportState) {
        if self.viewport == viewport {
            return;
        }
        self.batch_update(|w| {
            w.set_viewport_extent(viewport.extent);
            w.set_scroll_offset(viewport.scroll_offset);
        });
    }

    pub fn set_viewport_extent(&mut self, extent: u32) {
        if self.viewport.extent == extent {
            return;
        }
        self.viewport.extent = extent;
        self.notify();
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        let prev = self.viewport.scroll_offset;
        if prev == offset {
            return;
        }
        self.viewport.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Pulls the scroll offset back inside `[0, max_scroll_offset]`.
    ///
    /// Returns `true` when the offset had to move.
    pub fn clamp_to_content(&mut self) -> bool {
        let max = self.max_scroll_offset();
        if self.viewport.scroll_offset <= max {
            return false;
        }
        vdebug!(
            offset = self.viewport.scroll_offset,
            max,
            "Window::clamp_to_content"
        );
        self.set_scroll_offset(max);
        true
    }

    /// Total content extent: `count * item_extent`.
    pub fn total_extent(&self) -> u64 {
        (self.count as u64).saturating_mul(self.options.item_extent as u64)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_extent()
            .saturating_sub(self.viewport.extent as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Upper bound on the number of items any overscanned range can hold for the current
    /// viewport extent, independent of `count`.
    ///
    /// A viewport whose top edge falls inside an item intersects one more row than an aligned
    /// one, hence the `+ 1`.
    pub fn capacity(&self) -> usize {
        if self.viewport.extent == 0 {
            return 0;
        }
        let rows = (self.viewport.extent as u64).div_ceil(self.options.item_extent as u64);
        to_index(rows)
            .saturating_add(1)
            .saturating_add(self.options.overscan.saturating_mul(2))
    }

    /// The overscanned range for the current viewport.
    pub fn visible_range(&self) -> VisibleRange {
        self.compute_range(self.viewport, self.options.overscan)
    }

    pub fn visible_range_for(&self, viewport: ViewportState) -> VisibleRange {
        self.compute_range(viewport, self.options.overscan)
    }

    /// The items that actually intersect the viewport (no overscan).
    pub fn viewport_range(&self) -> VisibleRange {
        self.compute_range(self.viewport, 0)
    }

    pub fn viewport_range_for(&self, viewport: ViewportState) -> VisibleRange {
        self.compute_range(viewport, 0)
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let index = to_index(offset / self.options.item_extent as u64);
        Some(index.min(self.count - 1))
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.count).then(|| self.start_of(index))
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        self.item(index).map(|it| it.end())
    }

    pub fn item(&self, index: usize) -> Option<VisibleItem> {
        (index < self.count).then(|| VisibleItem {
            index,
            start: self.start_of(index),
            size: self.options.item_extent,
        })
    }

    pub fn for_each_visible_item(&self, f: impl FnMut(VisibleItem)) {
        self.for_each_visible_item_for(self.viewport, f);
    }

    pub fn for_each_visible_item_for(
        &self,
        viewport: ViewportState,
        mut f: impl FnMut(VisibleItem),
    ) {
        let range = self.visible_range_for(viewport);
        let size = self.options.item_extent;
        for index in range.indices() {
            f(VisibleItem {
                index,
                start: self.start_of(index),
                size,
            });
        }
    }

    /// Collects visible items into `out` (clears `out` first).
    pub fn collect_visible_items(&self, out: &mut Vec<VisibleItem>) {
        out.clear();
        self.for_each_visible_item(|it| out.push(it));
    }

    /// Programmatically scrolls to an index (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.count == 0 {
            return 0;
        }
        let index = index.min(self.count - 1);
        let start = self.start_of(index);
        let end = start.saturating_add(self.options.item_extent as u64);
        let view = self.viewport.extent as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add(self.options.item_extent as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.viewport.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    fn start_of(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.options.item_extent as u64)
    }

    fn compute_range(&self, viewport: ViewportState, overscan: usize) -> VisibleRange {
        let count = self.count;
        if count == 0 || viewport.extent == 0 {
            return VisibleRange::EMPTY;
        }

        let extent = self.options.item_extent as u64;
        // An offset on an exact boundary belongs to the item starting there.
        let first = to_index(viewport.scroll_offset / extent);
        let last = to_index(viewport.end().div_ceil(extent));

        let start = first.saturating_sub(overscan).min(count);
        let end = last.saturating_add(overscan).min(count);
        VisibleRange::new(start, end)
    }
}

fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
