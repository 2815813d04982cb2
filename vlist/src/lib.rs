//! Fixed-extent windowing math for virtualized lists.
//!
//! For the recycling engine that turns a visible range into a bounded pool of rendered
//! nodes, see the `vlist-recycler` crate.
//!
//! Every item in a [`Window`] has the same extent along the scroll axis, so layout is plain
//! arithmetic: item `i` starts at `i * item_extent` and the content is
//! `count * item_extent` long. The window answers the questions a renderer asks each frame:
//! which half-open index range intersects the viewport (plus overscan), how far the list
//! may scroll, and where to scroll to reveal a given index.
//!
//! It is UI-agnostic. The caller provides:
//! - the viewport extent (e.g. height for a vertical list)
//! - the scroll offset
//! - the item count
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod options;
mod state;
mod types;
mod window;


pub use error::ConfigError;
pub use options::{DEFAULT_OVERSCAN, OnChangeCallback, WindowOptions};
pub use state::ViewportState;
pub use types::{Align, ScrollDirection, VisibleItem, VisibleRange};
pub use window::Window;
