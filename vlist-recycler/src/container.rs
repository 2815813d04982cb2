use vlist::ViewportState;

/// Identifies one node of the render pool for the lifetime of that node.
///
/// Ids of unmounted nodes may be handed out again to later nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn get(self) -> usize {
        self.0
    }
}

/// A viewport listener registration, issued by [`Container::listen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The scroll region a [`crate::ListEngine`] renders into.
///
/// Every call is a mutation request from the engine; the engine never reads nodes back.
/// Between two engine operations the container's visible nodes are exactly the pool's
/// bound nodes, each placed at its item's offset.
pub trait Container<N> {
    /// The container's own report of its scroll offset and visible extent.
    fn viewport(&self) -> ViewportState;

    /// Moves the scroll position (after clamping or a scroll-to-index request).
    fn scroll_to(&mut self, offset: u64);

    /// Resizes the scrollable content to `extent`.
    fn set_content_extent(&mut self, extent: u64);

    /// A freshly rendered node joins the pool. It stays hidden until placed.
    fn mount(&mut self, slot: SlotId, node: &N);

    /// Shows `node` at `offset`. Its content may have changed since it was last shown.
    fn place(&mut self, slot: SlotId, node: &N, offset: u64);

    /// Hides a node that went back to the pool. It may be placed again later.
    fn park(&mut self, slot: SlotId, node: &N);

    /// Removes a node for good.
    fn unmount(&mut self, slot: SlotId, node: N);

    /// Starts delivering scroll/resize notifications for the engine.
    fn listen(&mut self) -> ListenerId;

    fn unlisten(&mut self, listener: ListenerId);
}
