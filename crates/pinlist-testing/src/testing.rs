use std::cell::{Ref, RefCell};
use std::rc::Rc;

use pinlist_core::{ItemKey, NodeId, OperationId, Point, Rect, Size};
use pinlist_foundation::{
    AttachOutcome, ComponentNode, DiffSnapshot, ListContainer, ListContainerConfig, NodePool,
};

use crate::fakes::{FakeListEngine, ManualFrameScheduler, RecordingEventEmitter};

/// Nominal frame interval at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Headless harness around one [`ListContainer`].
///
/// The rule plays the engine's part: it hands children over, delivers their
/// layout results and item keys, and moves the surface like the platform
/// would. Removed children land in an in-memory [`NodePool`] and are reused
/// by later inserts.
pub struct ListContainerTestRule {
    container: ListContainer,
    engine: Rc<FakeListEngine>,
    events: Rc<RecordingEventEmitter>,
    scheduler: Rc<ManualFrameScheduler>,
    pool: Rc<RefCell<NodePool>>,
    next_id: u32,
    next_operation: u64,
    frame_time_nanos: u64,
}

impl ListContainerTestRule {
    /// A container with a 400x300 viewport.
    pub fn new(config: ListContainerConfig) -> Self {
        Self::with_viewport(config, Size::new(400.0, 300.0))
    }

    pub fn with_viewport(config: ListContainerConfig, viewport: Size) -> Self {
        let pool = Rc::new(RefCell::new(NodePool::new()));
        let mut container = ListContainer::new(config, pool.clone());
        let engine = Rc::new(FakeListEngine::new());
        let events = Rc::new(RecordingEventEmitter::new());
        let scheduler = Rc::new(ManualFrameScheduler::new());
        container.attach_engine(&engine);
        container.set_event_emitter(events.clone());
        container.set_frame_scheduler(scheduler.clone());
        container.on_layout_updated(viewport);
        Self {
            container,
            engine,
            events,
            scheduler,
            pool,
            next_id: 1,
            next_operation: 1,
            frame_time_nanos: 0,
        }
    }

    pub fn container(&self) -> &ListContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ListContainer {
        &mut self.container
    }

    pub fn engine(&self) -> &FakeListEngine {
        &self.engine
    }

    /// Drops the rule's engine handle; the container only holds it weakly.
    pub fn drop_engine(&mut self) {
        self.engine = Rc::new(FakeListEngine::new());
    }

    pub fn events(&self) -> &RecordingEventEmitter {
        &self.events
    }

    pub fn scheduler(&self) -> &ManualFrameScheduler {
        &self.scheduler
    }

    pub fn pool(&self) -> Ref<'_, NodePool> {
        self.pool.borrow()
    }

    /// Applies a snapshot and sets the main-axis content size.
    pub fn set_items(&mut self, snapshot: DiffSnapshot, content_size: f32) {
        self.container.apply_snapshot(snapshot);
        self.container
            .update_content_size_and_offset(content_size, 0.0, 0.0);
    }

    /// Hands over a child for `key`, lays it out at `top` and reports its
    /// key. Reuses a pooled node when one is available.
    pub fn insert_item(&mut self, key: &str, top: f32, height: f32) -> NodeId {
        let id = self.insert_pending(key);
        let width = self.container.surface().viewport_size().width;
        self.layout(id, Rect::new(0.0, top, width, height));
        self.container.on_item_node_ready(id, key);
        id
    }

    /// Hands over a child and finishes its operation without a layout
    /// result, leaving it parked.
    pub fn insert_pending(&mut self, key: &str) -> NodeId {
        let node = match self.pool.borrow_mut().obtain() {
            Some(node) => node.with_item_key(key),
            None => {
                let id = NodeId(self.next_id);
                self.next_id += 1;
                ComponentNode::new(id).with_item_key(key)
            }
        };
        let id = node.id();
        assert!(self.container.insert_child(node), "{id} inserted twice");
        let operation = OperationId(self.next_operation);
        self.next_operation += 1;
        self.container.on_layout_finish(operation, id);
        id
    }

    /// Delivers a layout result.
    pub fn layout(&mut self, id: NodeId, bounds: Rect) -> Option<AttachOutcome> {
        self.container.on_child_layout_updated(id, bounds)
    }

    /// Rebinds a live child to another item, as the engine does on reuse.
    pub fn rebind(&mut self, id: NodeId, key: &str, top: f32, height: f32) {
        let width = self.container.surface().viewport_size().width;
        self.container.on_item_node_ready(id, ItemKey::from(key));
        self.layout(id, Rect::new(0.0, top, width, height));
        self.container.on_node_ready();
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        self.container.remove_child(id)
    }

    /// Moves the surface to `y` the way a drag or fling would.
    pub fn scroll_to(&mut self, y: f32) {
        let x = self.container.surface().scroll_x();
        self.container.on_native_scroll(Point::new(x, y));
    }

    pub fn scroll_to_x(&mut self, x: f32) {
        let y = self.container.surface().scroll_y();
        self.container.on_native_scroll(Point::new(x, y));
    }

    /// Runs one frame if the container asked for one. Returns whether it did.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) -> bool {
        self.frame_time_nanos = frame_time_nanos;
        if !self.scheduler.take_request() {
            return false;
        }
        self.container.on_frame(frame_time_nanos);
        true
    }

    /// Runs frames at 60 Hz until none is requested or `max_frames` ran.
    pub fn pump_frames(&mut self, max_frames: usize) -> usize {
        let mut ran = 0;
        while ran < max_frames {
            let next = self.frame_time_nanos + FRAME_NANOS;
            if !self.advance_frame(next) {
                break;
            }
            ran += 1;
        }
        ran
    }

    pub fn translation_y(&self, id: NodeId) -> f32 {
        self.container
            .node(id)
            .map(ComponentNode::translation_y)
            .unwrap_or_else(|| panic!("{id} is not a child"))
    }

    pub fn translation_z(&self, id: NodeId) -> f32 {
        self.container
            .node(id)
            .map(ComponentNode::translation_z)
            .unwrap_or_else(|| panic!("{id} is not a child"))
    }
}
