/// A lightweight, serializable snapshot of the viewport geometry.
///
/// `scroll_offset` is the distance from the top of the scrollable content; `extent` is the
/// visible size along the scroll axis. An `extent` of zero means the container has not been
/// laid out yet and nothing is considered visible.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: u64,
    pub extent: u32,
}

impl ViewportState {
    pub fn new(scroll_offset: u64, extent: u32) -> Self {
        Self {
            scroll_offset,
            extent,
        }
    }

    /// The first offset past the bottom edge of the viewport.
    pub fn end(&self) -> u64 {
        self.scroll_offset.saturating_add(self.extent as u64)
    }
}
