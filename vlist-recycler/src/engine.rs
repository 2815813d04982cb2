use alloc::vec::Vec;

use vlist::{Align, ViewportState, VisibleRange, Window, WindowOptions};

use crate::key::KeyIndexMap;
use crate::pool::RenderPool;
use crate::{
    Binding, BuildError, Container, Error, ItemRenderer, ListItem, ListenerId, PoolStats,
};

/// A virtual list: a large item collection rendered through a small pool of recycled nodes.
///
/// The engine owns the collection, a [`Window`] over it, the container it renders into and
/// the renderer. Only the overscanned visible range is ever bound to nodes. Nodes leaving
/// the range are parked and reused for positions entering it.
///
/// Every operation runs to completion before returning. Between operations each bound node
/// shows its item's current content at `index * item_extent`, and nothing else is visible.
///
/// The container listener registered at construction is removed by [`Self::destroy`], or
/// by `Drop` if the engine goes away some other way.
pub struct ListEngine<T, C, R>
where
    T: ListItem,
    R: ItemRenderer<T>,
    C: Container<R::Node>,
{
    window: Window,
    items: Vec<T>,
    container: C,
    renderer: R,
    pool: RenderPool<R::Node, T>,
    listener: Option<ListenerId>,
    sync_pending: bool,
    content_extent: Option<u64>,
}

/// Builder for [`ListEngine`].
///
/// Container, item extent and renderer are required.
pub struct ListEngineBuilder<C, R> {
    container: Option<C>,
    renderer: Option<R>,
    options: WindowOptions,
}

impl<C, R> Default for ListEngineBuilder<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R> ListEngineBuilder<C, R> {
    pub fn new() -> Self {
        Self {
            container: None,
            renderer: None,
            // A zero extent is rejected by `build` until `item_extent` is called.
            options: WindowOptions::new(0),
        }
    }

    pub fn container(mut self, container: C) -> Self {
        self.container = Some(container);
        self
    }

    pub fn renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn item_extent(mut self, item_extent: u32) -> Self {
        self.options.item_extent = item_extent;
        self
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.options.overscan = overscan;
        self
    }

    /// Replaces all window options at once (item extent included).
    ///
    /// An `initial_viewport` contributes its scroll offset: `build` scrolls the container
    /// there. The viewport extent always comes from the container.
    pub fn window_options(mut self, options: WindowOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the configuration, registers the viewport listener and adopts the
    /// container's current geometry. Nothing is rendered until [`ListEngine::set_data`].
    pub fn build<T>(self) -> Result<ListEngine<T, C, R>, BuildError>
    where
        T: ListItem,
        R: ItemRenderer<T>,
        C: Container<R::Node>,
    {
        let mut window = Window::new(self.options)?;
        let mut container = self.container.ok_or(BuildError::MissingContainer)?;
        let renderer = self.renderer.ok_or(BuildError::MissingRenderer)?;

        let reported = container.viewport();
        let viewport = match window.options().initial_viewport {
            // Not clamped: the collection is still empty here, `set_data` clamps.
            Some(initial) if initial.scroll_offset != reported.scroll_offset => {
                container.scroll_to(initial.scroll_offset);
                ViewportState::new(initial.scroll_offset, reported.extent)
            }
            _ => reported,
        };
        window.set_viewport(viewport);
        let listener = container.listen();
        vdebug!(
            item_extent = window.item_extent(),
            overscan = window.overscan(),
            listener = listener.0,
            "ListEngine::build"
        );

        let mut engine = ListEngine {
            window,
            items: Vec::new(),
            container,
            renderer,
            pool: RenderPool::new(),
            listener: Some(listener),
            sync_pending: false,
            content_extent: None,
        };
        engine.sync_content_extent();
        Ok(engine)
    }
}

impl<T, C, R> ListEngine<T, C, R>
where
    T: ListItem,
    R: ItemRenderer<T>,
    C: Container<R::Node>,
{
    pub fn builder() -> ListEngineBuilder<C, R> {
        ListEngineBuilder::new()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn viewport(&self) -> ViewportState {
        self.window.viewport()
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.window.visible_range()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable access to the container, e.g. to apply user scrolling before [`Self::on_scroll`].
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Bound nodes in position order.
    pub fn bindings(&self) -> impl Iterator<Item = Binding<T::Key>> + '_ {
        self.pool.bindings()
    }

    /// The node currently bound to `index`, if any.
    pub fn node_at(&self, index: usize) -> Option<&R::Node> {
        self.pool.node_at(index)
    }

    /// Replaces the whole collection.
    ///
    /// The scroll offset is kept unless it now points past the end, in which case it is
    /// clamped to `max(0, total_extent - viewport_extent)` and the container is scrolled
    /// there. Positions whose item is unchanged keep their nodes untouched; an item edited
    /// under the same key is rebound.
    ///
    /// Duplicate keys are rejected before anything changes.
    pub fn set_data(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), Error<R::Error>> {
        let items: Vec<T> = items.into_iter().collect();
        check_unique_keys::<T, R::Error>(&items)?;

        let count = items.len();
        self.items = items;

        let clamped = self.window.batch_update(|w| {
            w.set_count(count);
            w.clamp_to_content()
        });
        vdebug!(count, clamped, "ListEngine::set_data");
        if clamped {
            self.container.scroll_to(self.window.scroll_offset());
        }
        self.sync_content_extent();
        self.reconcile()
    }

    /// Handles a scroll/resize notification by reading the container's geometry.
    pub fn on_scroll(&mut self) -> Result<(), Error<R::Error>> {
        let viewport = self.container.viewport();
        self.set_viewport(viewport)
    }

    /// Applies a caller-reported viewport.
    ///
    /// Repeating the current viewport touches no node and calls no renderer method.
    pub fn set_viewport(&mut self, viewport: ViewportState) -> Result<(), Error<R::Error>> {
        self.sync_pending = false;
        self.window.set_viewport(viewport);
        self.reconcile()
    }

    /// Marks the viewport dirty without handling it yet. See [`Self::flush`].
    pub fn request_sync(&mut self) {
        self.sync_pending = true;
    }

    pub fn is_sync_pending(&self) -> bool {
        self.sync_pending
    }

    /// Handles pending viewport notifications once, e.g. at the start of a redraw.
    ///
    /// Returns `true` if there was anything to handle.
    pub fn flush(&mut self) -> Result<bool, Error<R::Error>> {
        if !self.sync_pending {
            return Ok(false);
        }
        self.on_scroll()?;
        Ok(true)
    }

    pub fn set_overscan(&mut self, overscan: usize) -> Result<(), Error<R::Error>> {
        self.window.set_overscan(overscan);
        self.reconcile()
    }

    /// Scrolls the container so that `index` is shown according to `align`.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Result<u64, Error<R::Error>> {
        let offset = self.window.scroll_to_index(index, align);
        self.container.scroll_to(offset);
        self.reconcile()?;
        Ok(offset)
    }

    /// Unmounts every node and removes the viewport listener.
    pub fn destroy(mut self) {
        self.teardown();
    }

    /// Runs once: `destroy` takes the listener, so the `Drop` that follows returns early.
    fn teardown(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        self.container.unlisten(listener);
        self.pool.drain(&mut self.container);
        vdebug!(listener = listener.0, "ListEngine::teardown");
    }

    fn sync_content_extent(&mut self) {
        let extent = self.window.total_extent();
        if self.content_extent == Some(extent) {
            return;
        }
        self.content_extent = Some(extent);
        self.container.set_content_extent(extent);
    }

    /// Brings the pool in line with the current range and collection.
    fn reconcile(&mut self) -> Result<(), Error<R::Error>> {
        let range = self.window.visible_range();
        let items = &self.items;
        self.pool.release_unless(&mut self.container, |index, shown| {
            range.contains(index) && items.get(index) == Some(shown)
        });

        // Trim even when binding fails so the pool bound holds between operations.
        let bound = self.bind_range(range);
        self.pool.trim(self.window.capacity(), &mut self.container);
        vtrace!(
            start = range.start_index,
            end = range.end_index,
            stats = ?self.pool.stats(),
            "ListEngine::reconcile"
        );
        bound
    }

    fn bind_range(&mut self, range: VisibleRange) -> Result<(), Error<R::Error>> {
        for index in range.indices() {
            if self.pool.is_bound(index) {
                continue;
            }
            let (Some(item), Some(placement)) = (self.items.get(index), self.window.item(index))
            else {
                vwarn!(index, count = self.items.len(), "range index outside collection");
                continue;
            };
            self.pool
                .acquire(
                    index,
                    placement.start,
                    item,
                    &mut self.renderer,
                    &mut self.container,
                )
                .map_err(|source| {
                    vwarn!(index, "renderer failed");
                    Error::Render { index, source }
                })?;
        }
        Ok(())
    }
}

impl<T, C, R> Drop for ListEngine<T, C, R>
where
    T: ListItem,
    R: ItemRenderer<T>,
    C: Container<R::Node>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

fn check_unique_keys<T: ListItem, E>(items: &[T]) -> Result<(), Error<E>> {
    let mut seen = KeyIndexMap::<T::Key>::new();
    for (index, item) in items.iter().enumerate() {
        if let Some(first) = seen.insert(item.key(), index) {
            return Err(Error::DuplicateKey { index, first });
        }
    }
    Ok(())
}
