//! Shared building blocks for the pinlist list container: identifiers,
//! geometry, density units, orientation and the platform hooks the container
//! calls back into.

pub mod collections;
mod geometry;
mod ids;
mod item_key;
mod orientation;
pub mod platform;
mod unit;

pub use geometry::{Point, Rect, Size};
pub use ids::{ListSign, NodeId, OperationId};
pub use item_key::ItemKey;
pub use orientation::Orientation;
pub use platform::{FrameScheduler, ThreadStrategy};
pub use unit::Dp;
