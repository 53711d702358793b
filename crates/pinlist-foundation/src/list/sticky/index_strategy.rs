use pinlist_core::collections::map::HashMap;
use pinlist_core::{ItemKey, NodeId};

use super::{EvictedNodes, StickyContext, StickyEdge, StickyMode, StickyStrategy};

/// Sticky registrations keyed by ordinal.
///
/// A node is looked up through the item-key index to find its ordinal; when
/// the ordinal changes, the old registration is migrated instead of left
/// behind.
#[derive(Debug, Default)]
pub struct IndexStickyTracker {
    top: HashMap<usize, NodeId>,
    bottom: HashMap<usize, NodeId>,
}

impl IndexStickyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, edge: StickyEdge) -> &HashMap<usize, NodeId> {
        match edge {
            StickyEdge::Top => &self.top,
            StickyEdge::Bottom => &self.bottom,
        }
    }

    fn map_mut(&mut self, edge: StickyEdge) -> &mut HashMap<usize, NodeId> {
        match edge {
            StickyEdge::Top => &mut self.top,
            StickyEdge::Bottom => &mut self.bottom,
        }
    }

    fn forget(&mut self, node: NodeId) -> bool {
        let before = self.top.len() + self.bottom.len();
        self.top.retain(|_, registered| *registered != node);
        self.bottom.retain(|_, registered| *registered != node);
        before != self.top.len() + self.bottom.len()
    }

    fn register(&mut self, node: NodeId, key: Option<&ItemKey>, ctx: StickyContext<'_>) -> EvictedNodes {
        let mut evicted = EvictedNodes::new();
        let was_registered = self.forget(node);
        let ordinal = key.and_then(|key| ctx.key_index.position_of(key.as_str()));
        let mut is_registered = false;

        if let Some(ordinal) = ordinal {
            for edge in StickyEdge::ALL {
                if !ctx.snapshot.sticky_ordinals(edge).contains(&ordinal) {
                    continue;
                }
                if let Some(previous) = self.map_mut(edge).insert(ordinal, node) {
                    if previous != node {
                        evicted.push(previous);
                    }
                }
                is_registered = true;
                break;
            }
        }

        if was_registered && !is_registered {
            evicted.push(node);
        }
        evicted
    }
}

impl StickyStrategy for IndexStickyTracker {
    fn mode(&self) -> StickyMode {
        StickyMode::Index
    }

    fn apply_snapshot(&mut self, ctx: StickyContext<'_>) -> EvictedNodes {
        let mut evicted = EvictedNodes::new();
        for edge in StickyEdge::ALL {
            let ordinals = ctx.snapshot.sticky_ordinals(edge);
            self.map_mut(edge).retain(|ordinal, node| {
                let keep = ordinals.contains(ordinal);
                if !keep {
                    evicted.push(*node);
                }
                keep
            });
        }
        evicted
    }

    fn register_inserted(
        &mut self,
        node: NodeId,
        key: Option<&ItemKey>,
        ctx: StickyContext<'_>,
    ) -> EvictedNodes {
        self.register(node, key, ctx)
    }

    fn register_updated(
        &mut self,
        node: NodeId,
        key: Option<&ItemKey>,
        ctx: StickyContext<'_>,
    ) -> EvictedNodes {
        self.register(node, key, ctx)
    }

    fn register_node_ready(
        &mut self,
        node: NodeId,
        key: &ItemKey,
        ctx: StickyContext<'_>,
    ) -> EvictedNodes {
        self.register(node, Some(key), ctx)
    }

    fn register_removed(&mut self, node: NodeId) -> bool {
        self.forget(node)
    }

    fn node_at(&self, edge: StickyEdge, ordinal: usize, _ctx: StickyContext<'_>) -> Option<NodeId> {
        self.map(edge).get(&ordinal).copied()
    }

    fn registered(&self, edge: StickyEdge) -> usize {
        self.map(edge).len()
    }

    fn clear(&mut self) {
        self.top.clear();
        self.bottom.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::item_key_index::ItemKeyIndex;
    use crate::list::snapshot::DiffSnapshot;

    fn ctx<'a>(snapshot: &'a DiffSnapshot, index: &'a ItemKeyIndex) -> StickyContext<'a> {
        StickyContext {
            snapshot,
            key_index: index,
        }
    }

    #[test]
    fn test_registration_migrates_with_ordinal() {
        let first = DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_top([1, 2]);
        let first_index = ItemKeyIndex::from_keys(first.item_keys.clone());
        let mut tracker = IndexStickyTracker::new();
        let key = ItemKey::from("b");
        tracker.register_inserted(NodeId(7), Some(&key), ctx(&first, &first_index));
        assert_eq!(tracker.node_at(StickyEdge::Top, 1, ctx(&first, &first_index)), Some(NodeId(7)));

        let second = DiffSnapshot::from_keys(["x", "a", "b", "c"]).with_sticky_top([1, 2]);
        let second_index = ItemKeyIndex::from_keys(second.item_keys.clone());
        let evicted = tracker.apply_snapshot(ctx(&second, &second_index));
        assert!(evicted.is_empty());

        let evicted = tracker.register_updated(NodeId(7), Some(&key), ctx(&second, &second_index));
        assert!(evicted.is_empty());
        assert_eq!(tracker.node_at(StickyEdge::Top, 1, ctx(&second, &second_index)), None);
        assert_eq!(tracker.node_at(StickyEdge::Top, 2, ctx(&second, &second_index)), Some(NodeId(7)));
        assert_eq!(tracker.registered(StickyEdge::Top), 1);
    }

    #[test]
    fn test_node_that_is_no_longer_sticky_is_evicted() {
        let snapshot = DiffSnapshot::from_keys(["a", "b"]).with_sticky_top([0]);
        let index = ItemKeyIndex::from_keys(snapshot.item_keys.clone());
        let mut tracker = IndexStickyTracker::new();
        tracker.register_node_ready(NodeId(1), &ItemKey::from("a"), ctx(&snapshot, &index));

        let evicted = tracker.register_node_ready(NodeId(1), &ItemKey::from("b"), ctx(&snapshot, &index));
        assert_eq!(evicted.as_slice(), &[NodeId(1)]);
        assert_eq!(tracker.registered(StickyEdge::Top), 0);
    }

    #[test]
    fn test_removed_sticky_ordinal_is_evicted_on_snapshot() {
        let snapshot = DiffSnapshot::from_keys(["a", "b"]).with_sticky_bottom([1]);
        let index = ItemKeyIndex::from_keys(snapshot.item_keys.clone());
        let mut tracker = IndexStickyTracker::new();
        tracker.register_inserted(NodeId(2), Some(&ItemKey::from("b")), ctx(&snapshot, &index));
        assert_eq!(tracker.registered(StickyEdge::Bottom), 1);

        let next = DiffSnapshot::from_keys(["a", "b"]);
        let evicted = tracker.apply_snapshot(ctx(&next, &index));
        assert_eq!(evicted.as_slice(), &[NodeId(2)]);
        assert!(!tracker.register_removed(NodeId(2)));
    }
}
