use alloc::sync::Arc;

use crate::window::Window;
use crate::{ConfigError, ViewportState};

/// Rows rendered beyond each edge of the viewport unless configured otherwise.
pub const DEFAULT_OVERSCAN: usize = 2;

/// A callback fired when the window's geometry or count changes.
pub type OnChangeCallback = Arc<dyn Fn(&Window) + Send + Sync>;

/// Configuration for [`crate::Window`].
///
/// Cheap to clone: the callback lives behind an `Arc`, so callers can tweak a field and hand
/// the result to `Window::set_options` without reallocating closures.
#[derive(Clone)]
pub struct WindowOptions {
    /// Size of every item along the scroll axis. Must be positive.
    pub item_extent: u32,

    /// Extra rows rendered before and after the strict viewport intersection.
    pub overscan: usize,

    /// Geometry applied by `Window::new`.
    pub initial_viewport: Option<ViewportState>,

    /// Optional callback fired when the window's state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl WindowOptions {
    pub fn new(item_extent: u32) -> Self {
        Self {
            item_extent,
            overscan: DEFAULT_OVERSCAN,
            initial_viewport: None,
            on_change: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: Option<ViewportState>) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Window) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_extent == 0 {
            return Err(ConfigError::ZeroItemExtent);
        }
        Ok(())
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("item_extent", &self.item_extent)
            .field("overscan", &self.overscan)
            .field("initial_viewport", &self.initial_viewport)
            .finish_non_exhaustive()
    }
}
