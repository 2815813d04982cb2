//! A recycling virtual list engine on top of the `vlist` window.
//!
//! The `vlist` crate computes which index range of a fixed-extent list intersects the
//! viewport. This crate keeps that range rendered:
//!
//! - [`ListEngine`] owns the item collection and a bounded pool of view nodes
//! - nodes leaving the range are parked and reused for positions entering it
//! - [`ListEngine::set_data`] replaces the collection without losing the scroll position and
//!   re-renders only the positions whose item identity changed
//!
//! The engine is framework-neutral. A UI layer supplies a [`Container`] (the scroll region
//! and the mutations applied to it) and an [`ItemRenderer`] (how items become nodes).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod container;
mod engine;
mod error;
mod item;
mod key;
mod pool;
mod render;


pub use container::{Container, ListenerId, SlotId};
pub use engine::{ListEngine, ListEngineBuilder};
pub use error::{BuildError, Error};
pub use item::ListItem;
pub use key::ItemKey;
pub use pool::{Binding, PoolStats};
pub use render::{FnRenderer, ItemRenderer, renderer_fn};

pub use vlist::{Align, ViewportState, VisibleRange, Window, WindowOptions};
