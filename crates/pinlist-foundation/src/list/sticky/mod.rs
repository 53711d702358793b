//! Sticky top/bottom tracking.
//!
//! A [`StickyStrategy`] remembers which live node hosts each sticky item; the
//! resolver then walks the sticky ordinals on every scroll or layout tick and
//! decides which single node is pinned to each edge.
//!
//! Two strategies exist. [`IndexStickyTracker`] keys registrations by ordinal
//! and migrates them when a node moves; [`KeyStickyTracker`] keys them by item
//! key, which survives reordering diffs without migration. Both resolve to the
//! same pinned node for the same snapshot, bounds and offset.

mod index_strategy;
mod key_strategy;
mod resolver;

use smallvec::SmallVec;

use pinlist_core::{ItemKey, NodeId};

use super::item_key_index::ItemKeyIndex;
use super::node::NodeStore;
use super::snapshot::DiffSnapshot;

pub use index_strategy::IndexStickyTracker;
pub use key_strategy::KeyStickyTracker;
pub use resolver::{resolve_bottom, resolve_top, ActiveSticky, StickyResolution, STICKY_ELEVATION};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StickyEdge {
    Top,
    Bottom,
}

impl StickyEdge {
    pub const ALL: [StickyEdge; 2] = [StickyEdge::Top, StickyEdge::Bottom];
}

/// Which registration scheme a container uses. Chosen once per container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StickyMode {
    Index,
    #[default]
    ItemKey,
}

impl StickyMode {
    pub fn create_tracker(self) -> Box<dyn StickyStrategy> {
        match self {
            StickyMode::Index => Box::new(IndexStickyTracker::new()),
            StickyMode::ItemKey => Box::new(KeyStickyTracker::new()),
        }
    }
}

/// Read-only view of the latest snapshot handed to strategies.
#[derive(Clone, Copy)]
pub struct StickyContext<'a> {
    pub snapshot: &'a DiffSnapshot,
    pub key_index: &'a ItemKeyIndex,
}

/// Nodes that lost their sticky registration during a call and need their
/// transform reset.
pub type EvictedNodes = SmallVec<[NodeId; 4]>;

pub trait StickyStrategy {
    fn mode(&self) -> StickyMode;

    /// Refreshes the sticky sets from a new snapshot and drops registrations
    /// that are no longer sticky.
    fn apply_snapshot(&mut self, ctx: StickyContext<'_>) -> EvictedNodes;

    /// The node was inserted into the container.
    fn register_inserted(
        &mut self,
        node: NodeId,
        key: Option<&ItemKey>,
        ctx: StickyContext<'_>,
    ) -> EvictedNodes;

    /// The node finished layout and was (re)attached.
    fn register_updated(
        &mut self,
        node: NodeId,
        key: Option<&ItemKey>,
        ctx: StickyContext<'_>,
    ) -> EvictedNodes;

    /// The node learned its item key, possibly a different one than before.
    fn register_node_ready(
        &mut self,
        node: NodeId,
        key: &ItemKey,
        ctx: StickyContext<'_>,
    ) -> EvictedNodes;

    /// Forgets every registration of `node`; returns whether it had one.
    fn register_removed(&mut self, node: NodeId) -> bool;

    /// Node currently hosting the sticky item at `ordinal`, if any.
    fn node_at(&self, edge: StickyEdge, ordinal: usize, ctx: StickyContext<'_>) -> Option<NodeId>;

    /// Number of nodes registered for `edge`.
    fn registered(&self, edge: StickyEdge) -> usize;

    fn clear(&mut self);

    fn resolve_top(
        &self,
        ctx: StickyContext<'_>,
        nodes: &NodeStore,
        offset_top: f32,
        sticky_offset: f32,
    ) -> StickyResolution {
        resolver::resolve_top(self, ctx, nodes, offset_top, sticky_offset)
    }

    fn resolve_bottom(
        &self,
        ctx: StickyContext<'_>,
        nodes: &NodeStore,
        offset_top: f32,
        viewport_height: f32,
        sticky_offset: f32,
    ) -> StickyResolution {
        resolver::resolve_bottom(self, ctx, nodes, offset_top, viewport_height, sticky_offset)
    }
}
