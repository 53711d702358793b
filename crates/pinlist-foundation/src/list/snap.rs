//! Item snapping.
//!
//! Snap target computation belongs to a [`SnapHelper`] supplied by the host.
//! The container only exposes what the helper needs through [`SnapHooks`] and
//! reports the chosen target as a `snap` event.

use pinlist_core::{NodeId, Rect};

use super::item_key_index::ItemKeyIndex;
use super::node::NodeStore;
use super::surface::ContainerSurface;

/// Parsed `item-snap` prop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSnap {
    /// Where in the viewport items align, 0 = start, 1 = end.
    pub factor: f32,
    /// Extra offset in pixels added to the aligned position.
    pub offset: f32,
}

impl ItemSnap {
    /// A factor outside `[0, 1]` is reported and replaced by 0.
    pub fn sanitized(factor: f32, offset: f32) -> Self {
        let factor = if (0.0..=1.0).contains(&factor) {
            factor
        } else {
            log::warn!("item-snap factor {factor} is outside [0, 1]; using 0");
            0.0
        };
        Self { factor, offset }
    }
}

/// Chosen snap destination, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTarget {
    pub position: usize,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Read access to the list for snap computation.
pub trait SnapHooks {
    fn scroll_x(&self) -> f32;
    fn scroll_y(&self) -> f32;
    fn scroll_width(&self) -> f32;
    fn scroll_height(&self) -> f32;
    /// Attached child views.
    fn children_count(&self) -> usize;
    /// Items in the data source, attached or not.
    fn virtual_children_count(&self) -> usize;
    fn child_at_index(&self, index: usize) -> Option<NodeId>;
    /// Attached view currently hosting the item at `position`.
    fn view_at_position(&self, position: usize) -> Option<NodeId>;
    /// Item position hosted by `view`.
    fn index_from_view(&self, view: NodeId) -> Option<usize>;
    fn child_bounds(&self, view: NodeId) -> Option<Rect>;
}

pub trait SnapHelper {
    fn find_snap_target(
        &self,
        snap: &ItemSnap,
        hooks: &dyn SnapHooks,
        velocity_x: f32,
        velocity_y: f32,
    ) -> Option<SnapTarget>;
}

/// [`SnapHooks`] backed by a container's surface, nodes and key index.
pub struct ContainerSnapHooks<'a> {
    pub(crate) surface: &'a ContainerSurface,
    pub(crate) nodes: &'a NodeStore,
    pub(crate) key_index: &'a ItemKeyIndex,
}

impl SnapHooks for ContainerSnapHooks<'_> {
    fn scroll_x(&self) -> f32 {
        self.surface.scroll_x()
    }

    fn scroll_y(&self) -> f32 {
        self.surface.scroll_y()
    }

    fn scroll_width(&self) -> f32 {
        self.surface.viewport_size().width
    }

    fn scroll_height(&self) -> f32 {
        self.surface.viewport_size().height
    }

    fn children_count(&self) -> usize {
        self.surface.child_count()
    }

    fn virtual_children_count(&self) -> usize {
        self.key_index.len()
    }

    fn child_at_index(&self, index: usize) -> Option<NodeId> {
        self.surface.children().get(index).copied()
    }

    fn view_at_position(&self, position: usize) -> Option<NodeId> {
        let key = self.key_index.key_at(position)?;
        self.surface.children().iter().copied().find(|id| {
            self.nodes
                .get(*id)
                .and_then(|node| node.item_key())
                .is_some_and(|bound| bound == key)
        })
    }

    fn index_from_view(&self, view: NodeId) -> Option<usize> {
        let key = self.nodes.get(view)?.item_key()?;
        self.key_index.position_of(key.as_str())
    }

    fn child_bounds(&self, view: NodeId) -> Option<Rect> {
        self.nodes.get(view)?.laid_out_bounds()
    }
}
