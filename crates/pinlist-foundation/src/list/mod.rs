//! Virtualized list container.
//!
//! The engine decides which items exist and where they go; the container
//! owns the child views it is handed and keeps them in sync with the
//! platform surface.
//!
//! # Architecture
//!
//! - [`ListContainer`] - entry point driven by the engine and the platform
//! - [`DiffSnapshot`] / [`ItemKeyIndex`] - item keys and sticky ordinals of
//!   the latest diff
//! - [`StickyStrategy`] - sticky registrations, by ordinal or by item key
//! - [`ChildLifecycle`] - deferred attach until a child has a layout
//! - [`ScrollSync`] - keeps engine-caused offset changes from echoing back
//! - [`ListNodeInfoFetcher`] / [`ListEventEmitter`] - seams to the engine
//!   and the script side

mod auto_scroller;
mod config;
mod container;
mod engine;
mod events;
mod gesture;
mod item_key_index;
mod lifecycle;
mod methods;
mod node;
mod scroll_sync;
mod smooth_scroll;
mod snap;
mod snapshot;
pub mod sticky;
mod surface;

pub use auto_scroller::{parse_rate, AutoScroller};
pub use config::*;
pub use container::*;
pub use engine::*;
pub use events::*;
pub use gesture::*;
pub use item_key_index::*;
pub use lifecycle::*;
pub use methods::*;
pub use node::*;
pub use scroll_sync::*;
pub use smooth_scroll::*;
pub use snap::*;
pub use snapshot::*;
pub use sticky::{
    EvictedNodes, IndexStickyTracker, KeyStickyTracker, StickyContext, StickyEdge, StickyMode,
    StickyResolution, StickyStrategy, STICKY_ELEVATION,
};
pub use surface::*;
