//! Child views hosted by the list container.

use pinlist_core::collections::map::HashMap;
use pinlist_core::{ItemKey, NodeId, Rect};

/// Attach state of a child view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeLifecycle {
    /// Known to the container but not part of the surface.
    #[default]
    Detached,
    /// Waiting for a non-empty layout result before it is attached.
    PendingLayout,
    /// Added to the surface.
    Attached,
}

/// A native child view bound to at most one item key at a time.
#[derive(Clone, Debug)]
pub struct ComponentNode {
    id: NodeId,
    item_key: Option<ItemKey>,
    id_selector: Option<String>,
    bounds: Option<Rect>,
    z_index: f32,
    translation_y: f32,
    translation_z: f32,
    lifecycle: NodeLifecycle,
    fade_in_running: bool,
    reuse_count: u32,
}

impl ComponentNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            item_key: None,
            id_selector: None,
            bounds: None,
            z_index: 0.0,
            translation_y: 0.0,
            translation_z: 0.0,
            lifecycle: NodeLifecycle::Detached,
            fade_in_running: false,
            reuse_count: 0,
        }
    }

    pub fn with_item_key(mut self, key: impl Into<ItemKey>) -> Self {
        self.item_key = Some(key.into());
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_z_index(mut self, z_index: f32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_id_selector(mut self, selector: impl Into<String>) -> Self {
        self.id_selector = Some(selector.into());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn item_key(&self) -> Option<&ItemKey> {
        self.item_key.as_ref()
    }

    pub fn id_selector(&self) -> Option<&str> {
        self.id_selector.as_deref()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Bounds of a child that has actually been through layout.
    pub fn laid_out_bounds(&self) -> Option<Rect> {
        self.bounds.filter(Rect::has_area_or_extent)
    }

    pub fn has_layout(&self) -> bool {
        self.laid_out_bounds().is_some()
    }

    pub fn z_index(&self) -> f32 {
        self.z_index
    }

    pub fn translation_y(&self) -> f32 {
        self.translation_y
    }

    pub fn translation_z(&self) -> f32 {
        self.translation_z
    }

    pub fn lifecycle(&self) -> NodeLifecycle {
        self.lifecycle
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == NodeLifecycle::Attached
    }

    pub fn fade_in_running(&self) -> bool {
        self.fade_in_running
    }

    /// How many times a pool handed this node out again.
    pub fn reuse_count(&self) -> u32 {
        self.reuse_count
    }

    pub(crate) fn set_item_key(&mut self, key: Option<ItemKey>) {
        self.item_key = key;
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    pub(crate) fn set_lifecycle(&mut self, lifecycle: NodeLifecycle) {
        self.lifecycle = lifecycle;
    }

    pub(crate) fn set_translation_y(&mut self, translation_y: f32) {
        self.translation_y = translation_y;
    }

    pub(crate) fn set_translation_z(&mut self, translation_z: f32) {
        self.translation_z = translation_z;
    }

    /// Drops any sticky override: no offset, declared z-order.
    pub(crate) fn reset_sticky_transform(&mut self) {
        self.translation_y = 0.0;
        self.translation_z = self.z_index;
    }

    pub(crate) fn start_fade_in(&mut self) {
        self.fade_in_running = true;
    }

    /// Returns whether a fade-in was running.
    pub(crate) fn cancel_fade_in(&mut self) -> bool {
        std::mem::take(&mut self.fade_in_running)
    }

    /// Clears everything bound to the previous item so the view can host
    /// another one.
    pub(crate) fn reset_for_reuse(&mut self) {
        self.item_key = None;
        self.bounds = None;
        self.translation_y = 0.0;
        self.translation_z = 0.0;
        self.lifecycle = NodeLifecycle::Detached;
        self.fade_in_running = false;
    }

    pub(crate) fn mark_reused(&mut self) {
        self.reuse_count = self.reuse_count.saturating_add(1);
    }
}

/// Nodes currently owned by a list container.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: HashMap<NodeId, ComponentNode>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node`, handing back a node that was already stored under
    /// the same id.
    pub fn insert(&mut self, node: ComponentNode) -> Option<ComponentNode> {
        self.nodes.insert(node.id(), node)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<ComponentNode> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&ComponentNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ComponentNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentNode> {
        self.nodes.values()
    }

    /// Node ids in ascending order, for passes that must be deterministic.
    pub fn sorted_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = ComponentNode> + '_ {
        self.nodes.drain().map(|(_, node)| node)
    }
}
