//! Decides which sticky node is pinned to each edge for a scroll offset.

use smallvec::SmallVec;

use pinlist_core::{NodeId, Rect};

use super::{StickyContext, StickyEdge, StickyStrategy};
use crate::list::node::NodeStore;

/// Z translation given to the pinned node so it draws above its siblings.
pub const STICKY_ELEVATION: f32 = f32::MAX;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveSticky {
    pub node: NodeId,
    /// Offset to apply to the node so it sits on the sticky line.
    pub translation_y: f32,
    /// How far the following sticky item pushes the pinned one off the line.
    pub squash: f32,
}

/// Outcome of one resolution pass over an edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StickyResolution {
    pub active: Option<ActiveSticky>,
    /// Candidates that must drop any sticky transform.
    pub reset: SmallVec<[NodeId; 4]>,
    /// Candidates skipped because they have not been laid out yet.
    pub skipped: SmallVec<[NodeId; 2]>,
}

impl StickyResolution {
    pub fn active_node(&self) -> Option<NodeId> {
        self.active.map(|active| active.node)
    }
}

enum Candidate {
    Missing,
    Unmeasured(NodeId),
    Measured(NodeId, Rect),
}

fn candidate<S: StickyStrategy + ?Sized>(
    strategy: &S,
    edge: StickyEdge,
    ordinal: usize,
    ctx: StickyContext<'_>,
    nodes: &NodeStore,
) -> Candidate {
    let Some(id) = strategy.node_at(edge, ordinal, ctx) else {
        return Candidate::Missing;
    };
    match nodes.get(id).and_then(|node| node.laid_out_bounds()) {
        Some(bounds) => Candidate::Measured(id, bounds),
        None => {
            log::warn!("sticky {edge:?} candidate {id} at ordinal {ordinal} has no layout yet");
            Candidate::Unmeasured(id)
        }
    }
}

/// Pins the last sticky-top item whose top has scrolled past
/// `offset_top + sticky_offset`.
///
/// Ordinals are scanned from last to first. The first laid-out node at or
/// above the line becomes active; the nearest one below it pushes it up when
/// the two would overlap.
pub fn resolve_top<S: StickyStrategy + ?Sized>(
    strategy: &S,
    ctx: StickyContext<'_>,
    nodes: &NodeStore,
    offset_top: f32,
    sticky_offset: f32,
) -> StickyResolution {
    let line = offset_top + sticky_offset;
    let mut resolution = StickyResolution::default();
    let mut active: Option<(NodeId, Rect)> = None;
    let mut next: Option<Rect> = None;

    for &ordinal in ctx.snapshot.sticky_top.iter().rev() {
        let (id, bounds) = match candidate(strategy, StickyEdge::Top, ordinal, ctx, nodes) {
            Candidate::Missing => continue,
            Candidate::Unmeasured(id) => {
                resolution.skipped.push(id);
                continue;
            }
            Candidate::Measured(id, bounds) => (id, bounds),
        };
        if bounds.top() > line {
            next = Some(bounds);
            resolution.reset.push(id);
        } else if active.is_some() {
            resolution.reset.push(id);
        } else {
            active = Some((id, bounds));
        }
    }

    if let Some((node, bounds)) = active {
        let squash = next
            .map(|next| bounds.height - (next.top() - line))
            .unwrap_or(0.0)
            .max(0.0);
        let target = line - squash;
        resolution.active = Some(ActiveSticky {
            node,
            translation_y: target - bounds.top(),
            squash,
        });
    }
    resolution
}

/// Mirror of [`resolve_top`] for the bottom edge: the sticky line is
/// `viewport_height - sticky_offset` below `offset_top`, ordinals are scanned
/// first to last and squash pushes the pinned node downward.
pub fn resolve_bottom<S: StickyStrategy + ?Sized>(
    strategy: &S,
    ctx: StickyContext<'_>,
    nodes: &NodeStore,
    offset_top: f32,
    viewport_height: f32,
    sticky_offset: f32,
) -> StickyResolution {
    let line = offset_top + viewport_height - sticky_offset;
    let mut resolution = StickyResolution::default();
    let mut active: Option<(NodeId, Rect)> = None;
    let mut next: Option<Rect> = None;

    for &ordinal in ctx.snapshot.sticky_bottom.iter() {
        let (id, bounds) = match candidate(strategy, StickyEdge::Bottom, ordinal, ctx, nodes) {
            Candidate::Missing => continue,
            Candidate::Unmeasured(id) => {
                resolution.skipped.push(id);
                continue;
            }
            Candidate::Measured(id, bounds) => (id, bounds),
        };
        if bounds.bottom() < line {
            next = Some(bounds);
            resolution.reset.push(id);
        } else if active.is_some() {
            resolution.reset.push(id);
        } else {
            active = Some((id, bounds));
        }
    }

    if let Some((node, bounds)) = active {
        let squash = next
            .map(|next| bounds.height - (line - next.bottom()))
            .unwrap_or(0.0)
            .max(0.0);
        let target = line - bounds.height + squash;
        resolution.active = Some(ActiveSticky {
            node,
            translation_y: target - bounds.top(),
            squash,
        });
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::item_key_index::ItemKeyIndex;
    use crate::list::node::ComponentNode;
    use crate::list::snapshot::DiffSnapshot;
    use crate::list::sticky::KeyStickyTracker;
    use pinlist_core::ItemKey;

    struct Fixture {
        snapshot: DiffSnapshot,
        index: ItemKeyIndex,
        nodes: NodeStore,
        tracker: KeyStickyTracker,
    }

    impl Fixture {
        fn new(snapshot: DiffSnapshot) -> Self {
            let index = ItemKeyIndex::from_keys(snapshot.item_keys.clone());
            let mut tracker = KeyStickyTracker::new();
            tracker.apply_snapshot(StickyContext {
                snapshot: &snapshot,
                key_index: &index,
            });
            Self {
                snapshot,
                index,
                nodes: NodeStore::new(),
                tracker,
            }
        }

        fn ctx(&self) -> StickyContext<'_> {
            StickyContext {
                snapshot: &self.snapshot,
                key_index: &self.index,
            }
        }

        fn add(&mut self, id: u32, key: &str, top: f32, height: f32) -> NodeId {
            let id = NodeId(id);
            let mut node = ComponentNode::new(id).with_item_key(key);
            if height > 0.0 {
                node = node.with_bounds(Rect::new(0.0, top, 100.0, height));
            }
            self.nodes.insert(node);
            let key = ItemKey::from(key);
            let ctx = StickyContext {
                snapshot: &self.snapshot,
                key_index: &self.index,
            };
            self.tracker.register_node_ready(id, &key, ctx);
            id
        }
    }

    #[test]
    fn test_empty_sets_resolve_nothing() {
        let fixture = Fixture::new(DiffSnapshot::from_keys(["a", "b"]));
        let top = resolve_top(&fixture.tracker, fixture.ctx(), &fixture.nodes, 50.0, 0.0);
        assert_eq!(top, StickyResolution::default());
        let bottom = resolve_bottom(&fixture.tracker, fixture.ctx(), &fixture.nodes, 0.0, 100.0, 0.0);
        assert_eq!(bottom, StickyResolution::default());
    }

    #[test]
    fn test_top_squash_amount() {
        let mut fixture = Fixture::new(DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_top([0, 2]));
        let a = fixture.add(1, "a", 0.0, 40.0);
        let c = fixture.add(3, "c", 100.0, 40.0);

        let resolution = resolve_top(&fixture.tracker, fixture.ctx(), &fixture.nodes, 70.0, 0.0);
        let active = resolution.active.unwrap();
        assert_eq!(active.node, a);
        assert_eq!(active.squash, 10.0);
        assert_eq!(active.translation_y, 60.0);
        assert_eq!(resolution.reset.as_slice(), &[c]);
    }

    #[test]
    fn test_unmeasured_candidate_is_skipped() {
        let mut fixture = Fixture::new(DiffSnapshot::from_keys(["a", "b"]).with_sticky_top([0, 1]));
        let a = fixture.add(1, "a", 0.0, 40.0);
        let b = fixture.add(2, "b", 0.0, 0.0);

        let resolution = resolve_top(&fixture.tracker, fixture.ctx(), &fixture.nodes, 10.0, 0.0);
        assert_eq!(resolution.active_node(), Some(a));
        assert_eq!(resolution.skipped.as_slice(), &[b]);
    }

    #[test]
    fn test_bottom_pins_item_below_the_viewport() {
        let mut fixture = Fixture::new(DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_bottom([1, 2]));
        let b = fixture.add(2, "b", 300.0, 40.0);
        let c = fixture.add(3, "c", 500.0, 40.0);

        // Line at 200: both are below it, the first one in order wins.
        let resolution = resolve_bottom(&fixture.tracker, fixture.ctx(), &fixture.nodes, 0.0, 200.0, 0.0);
        let active = resolution.active.unwrap();
        assert_eq!(active.node, b);
        assert_eq!(active.translation_y, 160.0 - 300.0);
        assert_eq!(resolution.reset.as_slice(), &[c]);
    }

    #[test]
    fn test_bottom_squash_pushes_down() {
        let mut fixture = Fixture::new(DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_bottom([1, 2]));
        let b = fixture.add(2, "b", 300.0, 40.0);
        let c = fixture.add(3, "c", 500.0, 40.0);

        // Line at 370: b is fully above, c is pinned and pushed by 10.
        let resolution = resolve_bottom(&fixture.tracker, fixture.ctx(), &fixture.nodes, 170.0, 200.0, 0.0);
        let active = resolution.active.unwrap();
        assert_eq!(active.node, c);
        assert_eq!(active.squash, 10.0);
        assert_eq!(active.translation_y, 340.0 - 500.0);
        assert_eq!(resolution.reset.as_slice(), &[b]);
    }
}
