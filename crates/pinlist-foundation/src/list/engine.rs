//! Contracts with the layout engine and the view recycler.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use pinlist_core::{ListSign, NodeId, OperationId};

use super::methods::ScrollAlign;
use super::node::ComponentNode;

/// The layout/diff engine behind a list. The container only holds it weakly.
pub trait ListNodeInfoFetcher {
    fn render_child(&self, list: ListSign, index: usize, operation: OperationId);

    fn update_child(&self, list: ListSign, old_child: NodeId, new_index: usize, operation: OperationId);

    fn remove_child(&self, list: ListSign, child: NodeId);

    /// Hands out a child for `index`, reusing a recycled one when possible.
    fn obtain_child(
        &self,
        list: ListSign,
        index: usize,
        operation: OperationId,
        reuse_notify: bool,
    ) -> Option<NodeId>;

    fn recycle_child(&self, list: ListSign, child: NodeId);

    fn obtain_child_async(&self, list: ListSign, index: usize, operation: OperationId);

    fn recycle_child_async(&self, list: ListSign, child: NodeId);

    /// Reports the realized scroll offset. `x` is RTL corrected; the
    /// originals are the raw surface offsets.
    fn scroll_by_list_container(&self, list: ListSign, x: f32, y: f32, original_x: f32, original_y: f32);

    /// Asks the engine to bring `position` into view. `offset` is in pixels.
    fn scroll_to_position(&self, list: ListSign, position: usize, offset: f32, align: ScrollAlign, smooth: bool);

    fn scroll_stopped(&self, list: ListSign);
}

/// Receives nodes the container no longer needs.
pub trait NodeRecycler {
    fn recycle(&mut self, node: ComponentNode);
}

impl<R: NodeRecycler> NodeRecycler for Rc<RefCell<R>> {
    fn recycle(&mut self, node: ComponentNode) {
        self.borrow_mut().recycle(node);
    }
}

/// In-memory pool of detached nodes, handed out again in release order.
#[derive(Debug, Default)]
pub struct NodePool {
    pool: VecDeque<ComponentNode>,
    recycled: u64,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest pooled node, cleared of its previous item.
    pub fn obtain(&mut self) -> Option<ComponentNode> {
        let mut node = self.pool.pop_front()?;
        node.mark_reused();
        Some(node)
    }

    /// Takes a specific pooled node.
    pub fn obtain_by_id(&mut self, id: NodeId) -> Option<ComponentNode> {
        let index = self.pool.iter().position(|node| node.id() == id)?;
        let mut node = self.pool.remove(index)?;
        node.mark_reused();
        Some(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.pool.iter().any(|node| node.id() == id)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Total nodes ever released into the pool.
    pub fn recycled_count(&self) -> u64 {
        self.recycled
    }
}

impl NodeRecycler for NodePool {
    fn recycle(&mut self, mut node: ComponentNode) {
        node.reset_for_reuse();
        self.recycled += 1;
        self.pool.push_back(node);
    }
}

/// Hands removed nodes back to the engine, which owns the element side.
pub struct EngineRecycler {
    engine: Weak<dyn ListNodeInfoFetcher>,
    list: ListSign,
    async_recycle: bool,
}

impl EngineRecycler {
    pub fn new<E: ListNodeInfoFetcher + 'static>(engine: &Rc<E>, list: ListSign, async_recycle: bool) -> Self {
        let engine = Rc::downgrade(engine) as Weak<dyn ListNodeInfoFetcher>;
        Self {
            engine,
            list,
            async_recycle,
        }
    }
}

impl NodeRecycler for EngineRecycler {
    fn recycle(&mut self, node: ComponentNode) {
        let Some(engine) = self.engine.upgrade() else {
            log::debug!("engine gone; dropping {}", node.id());
            return;
        };
        if self.async_recycle {
            engine.recycle_child_async(self.list, node.id());
        } else {
            engine.recycle_child(self.list, node.id());
        }
    }
}
