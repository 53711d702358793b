use pinlist_core::collections::map::HashMap;
use pinlist_core::{ItemKey, NodeId};

use super::{EvictedNodes, StickyContext, StickyEdge, StickyMode, StickyStrategy};
use crate::list::snapshot::StickyKeySet;

/// Sticky registrations keyed by item key.
///
/// The sticky key sets are derived once per snapshot. Membership of a node is
/// re-evaluated whenever it learns its key, so a recycled view that now hosts
/// a different item drops out of (or joins) the maps on its own.
#[derive(Debug, Default)]
pub struct KeyStickyTracker {
    top_keys: StickyKeySet,
    bottom_keys: StickyKeySet,
    top: HashMap<ItemKey, NodeId>,
    bottom: HashMap<ItemKey, NodeId>,
}

impl KeyStickyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, edge: StickyEdge) -> &HashMap<ItemKey, NodeId> {
        match edge {
            StickyEdge::Top => &self.top,
            StickyEdge::Bottom => &self.bottom,
        }
    }

    fn forget(&mut self, node: NodeId) -> bool {
        let before = self.top.len() + self.bottom.len();
        self.top.retain(|_, registered| *registered != node);
        self.bottom.retain(|_, registered| *registered != node);
        before != self.top.len() + self.bottom.len()
    }

    fn register(&mut self, node: NodeId, key: Option<&ItemKey>) -> EvictedNodes {
        let mut evicted = EvictedNodes::new();
        let was_registered = self.forget(node);

        let target = key.and_then(|key| {
            if self.top_keys.contains(key.as_str()) {
                Some((StickyEdge::Top, key))
            } else if self.bottom_keys.contains(key.as_str()) {
                Some((StickyEdge::Bottom, key))
            } else {
                None
            }
        });

        if let Some((edge, key)) = target {
            let map = match edge {
                StickyEdge::Top => &mut self.top,
                StickyEdge::Bottom => &mut self.bottom,
            };
            if let Some(previous) = map.insert(key.clone(), node) {
                if previous != node {
                    evicted.push(previous);
                }
            }
        } else if was_registered {
            evicted.push(node);
        }
        evicted
    }
}

impl StickyStrategy for KeyStickyTracker {
    fn mode(&self) -> StickyMode {
        StickyMode::ItemKey
    }

    fn apply_snapshot(&mut self, ctx: StickyContext<'_>) -> EvictedNodes {
        self.top_keys = ctx.snapshot.sticky_key_set(StickyEdge::Top);
        self.bottom_keys = ctx.snapshot.sticky_key_set(StickyEdge::Bottom);

        let mut evicted = EvictedNodes::new();
        let top_keys = &self.top_keys;
        self.top.retain(|key, node| {
            let keep = top_keys.contains(key.as_str());
            if !keep {
                evicted.push(*node);
            }
            keep
        });
        let bottom_keys = &self.bottom_keys;
        self.bottom.retain(|key, node| {
            let keep = bottom_keys.contains(key.as_str());
            if !keep {
                evicted.push(*node);
            }
            keep
        });
        evicted
    }

    fn register_inserted(
        &mut self,
        _node: NodeId,
        _key: Option<&ItemKey>,
        _ctx: StickyContext<'_>,
    ) -> EvictedNodes {
        // Keyed registrations wait for layout or node-ready; an inserted view
        // has no bounds to pin yet.
        EvictedNodes::new()
    }

    fn register_updated(
        &mut self,
        node: NodeId,
        key: Option<&ItemKey>,
        _ctx: StickyContext<'_>,
    ) -> EvictedNodes {
        self.register(node, key)
    }

    fn register_node_ready(
        &mut self,
        node: NodeId,
        key: &ItemKey,
        _ctx: StickyContext<'_>,
    ) -> EvictedNodes {
        self.register(node, Some(key))
    }

    fn register_removed(&mut self, node: NodeId) -> bool {
        self.forget(node)
    }

    fn node_at(&self, edge: StickyEdge, ordinal: usize, ctx: StickyContext<'_>) -> Option<NodeId> {
        let key = ctx.snapshot.item_keys.get(ordinal)?;
        self.map(edge).get(key.as_str()).copied()
    }

    fn registered(&self, edge: StickyEdge) -> usize {
        self.map(edge).len()
    }

    fn clear(&mut self) {
        self.top.clear();
        self.bottom.clear();
        self.top_keys = StickyKeySet::default();
        self.bottom_keys = StickyKeySet::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::item_key_index::ItemKeyIndex;
    use crate::list::snapshot::DiffSnapshot;

    fn tracker_for(snapshot: &DiffSnapshot, index: &ItemKeyIndex) -> KeyStickyTracker {
        let mut tracker = KeyStickyTracker::new();
        tracker.apply_snapshot(StickyContext {
            snapshot,
            key_index: index,
        });
        tracker
    }

    #[test]
    fn test_reorder_keeps_registration() {
        let snapshot = DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_top([1]);
        let index = ItemKeyIndex::from_keys(snapshot.item_keys.clone());
        let mut tracker = tracker_for(&snapshot, &index);
        let ctx = StickyContext {
            snapshot: &snapshot,
            key_index: &index,
        };
        tracker.register_node_ready(NodeId(4), &ItemKey::from("b"), ctx);

        let moved = DiffSnapshot::from_keys(["b", "a", "c"]).with_sticky_top([0]);
        let moved_index = ItemKeyIndex::from_keys(moved.item_keys.clone());
        let moved_ctx = StickyContext {
            snapshot: &moved,
            key_index: &moved_index,
        };
        assert!(tracker.apply_snapshot(moved_ctx).is_empty());
        assert_eq!(tracker.node_at(StickyEdge::Top, 0, moved_ctx), Some(NodeId(4)));
    }

    #[test]
    fn test_recycled_view_swaps_key() {
        let snapshot = DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_top([0]).with_sticky_bottom([2]);
        let index = ItemKeyIndex::from_keys(snapshot.item_keys.clone());
        let mut tracker = tracker_for(&snapshot, &index);
        let ctx = StickyContext {
            snapshot: &snapshot,
            key_index: &index,
        };
        tracker.register_node_ready(NodeId(1), &ItemKey::from("a"), ctx);
        let evicted = tracker.register_node_ready(NodeId(1), &ItemKey::from("c"), ctx);
        assert!(evicted.is_empty());
        assert_eq!(tracker.registered(StickyEdge::Top), 0);
        assert_eq!(tracker.node_at(StickyEdge::Bottom, 2, ctx), Some(NodeId(1)));
    }

    #[test]
    fn test_second_node_with_same_key_displaces_first() {
        let snapshot = DiffSnapshot::from_keys(["a"]).with_sticky_top([0]);
        let index = ItemKeyIndex::from_keys(snapshot.item_keys.clone());
        let mut tracker = tracker_for(&snapshot, &index);
        let ctx = StickyContext {
            snapshot: &snapshot,
            key_index: &index,
        };
        tracker.register_updated(NodeId(1), Some(&ItemKey::from("a")), ctx);
        let evicted = tracker.register_updated(NodeId(2), Some(&ItemKey::from("a")), ctx);
        assert_eq!(evicted.as_slice(), &[NodeId(1)]);
        assert!(tracker.register_removed(NodeId(2)));
        assert_eq!(tracker.registered(StickyEdge::Top), 0);
    }
}
