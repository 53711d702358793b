//! The list container.
//!
//! [`ListContainer`] hosts the child views of one virtualized list. The
//! engine tells it which items exist (a [`DiffSnapshot`]), hands it child
//! nodes and their layout results, and adjusts content size and offset while
//! items are laid out lazily. The container attaches children to its
//! [`ContainerSurface`], pins sticky items on every scroll or layout tick,
//! reports realized scroll offsets back to the engine and serves the
//! list-control methods scripts call.

use std::rc::{Rc, Weak};

use pinlist_core::{Dp, FrameScheduler, ItemKey, ListSign, NodeId, OperationId, Point, Rect, Size};

use super::auto_scroller::{self, AutoScroller};
use super::config::{ListContainerConfig, PropValue};
use super::engine::{ListNodeInfoFetcher, NodeRecycler};
use super::events::{EventSubscriptions, ListEvent, ListEventEmitter, ScrollEventDetail};
use super::gesture::{DispatchOutcome, TouchAction, TouchDecision, TouchOutcome};
use super::item_key_index::ItemKeyIndex;
use super::lifecycle::{AttachOutcome, ChildLifecycle};
use super::methods::{
    AutoScrollParams, MethodStatus, ScrollByParams, ScrollDelta, ScrollInfo, ScrollToCallback,
    ScrollToPositionParams, VisibleCell,
};
use super::node::{ComponentNode, NodeStore};
use super::scroll_sync::{ScrollChange, ScrollSync};
use super::smooth_scroll::EstimatedScrollHook;
use super::snap::{ContainerSnapHooks, SnapHelper, SnapTarget};
use super::snapshot::DiffSnapshot;
use super::sticky::{
    EvictedNodes, StickyContext, StickyEdge, StickyResolution, StickyStrategy, STICKY_ELEVATION,
};
use super::surface::{ContainerSurface, ScrollState};
use crate::ListError;

const PROP_CONTAINER_INFO: &str = "list-container-info";

pub struct ListContainer {
    config: ListContainerConfig,
    engine: Option<Weak<dyn ListNodeInfoFetcher>>,
    emitter: Option<Rc<dyn ListEventEmitter>>,
    frame_scheduler: Option<Rc<dyn FrameScheduler>>,
    recycler: Box<dyn NodeRecycler>,
    snap_helper: Option<Box<dyn SnapHelper>>,
    snapshot: DiffSnapshot,
    key_index: ItemKeyIndex,
    nodes: NodeStore,
    sticky: Box<dyn StickyStrategy>,
    last_sticky_top: Option<(NodeId, ItemKey)>,
    last_sticky_bottom: Option<(NodeId, ItemKey)>,
    lifecycle: ChildLifecycle,
    scroll_sync: ScrollSync,
    surface: ContainerSurface,
    smooth_scroll: EstimatedScrollHook,
    auto_scroller: AutoScroller,
    subscriptions: EventSubscriptions,
    pending_scroll_to: Option<ScrollToCallback>,
    destroyed: bool,
}

impl ListContainer {
    pub fn new(config: ListContainerConfig, recycler: impl NodeRecycler + 'static) -> Self {
        log::info!("create list container {}", config.list_sign);
        Self {
            engine: None,
            emitter: None,
            frame_scheduler: None,
            recycler: Box::new(recycler),
            snap_helper: None,
            snapshot: DiffSnapshot::default(),
            key_index: ItemKeyIndex::new(),
            nodes: NodeStore::new(),
            sticky: config.sticky_mode.create_tracker(),
            last_sticky_top: None,
            last_sticky_bottom: None,
            lifecycle: ChildLifecycle::new(&config),
            scroll_sync: ScrollSync::new(),
            surface: ContainerSurface::from_config(&config),
            smooth_scroll: EstimatedScrollHook::new(config.orientation),
            auto_scroller: AutoScroller::new(),
            subscriptions: EventSubscriptions::default(),
            pending_scroll_to: None,
            destroyed: false,
            config,
        }
    }

    /// Connects the engine. Only a weak handle is kept.
    pub fn attach_engine<E: ListNodeInfoFetcher + 'static>(&mut self, engine: &Rc<E>) {
        let engine = Rc::downgrade(engine) as Weak<dyn ListNodeInfoFetcher>;
        self.engine = Some(engine);
    }

    pub fn set_event_emitter(&mut self, emitter: Rc<dyn ListEventEmitter>) {
        self.emitter = Some(emitter);
    }

    pub fn set_frame_scheduler(&mut self, scheduler: Rc<dyn FrameScheduler>) {
        self.frame_scheduler = Some(scheduler);
    }

    pub fn set_snap_helper(&mut self, helper: Option<Box<dyn SnapHelper>>) {
        self.snap_helper = helper;
    }

    /// Records which optional events the script side listens to.
    pub fn set_events<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.subscriptions = EventSubscriptions::from_names(names);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn list_sign(&self) -> ListSign {
        self.config.list_sign
    }

    pub fn config(&self) -> &ListContainerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &DiffSnapshot {
        &self.snapshot
    }

    pub fn key_index(&self) -> &ItemKeyIndex {
        &self.key_index
    }

    pub fn node(&self, id: NodeId) -> Option<&ComponentNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn surface(&self) -> &ContainerSurface {
        &self.surface
    }

    pub fn scroll_sync(&self) -> &ScrollSync {
        &self.scroll_sync
    }

    pub fn sticky_strategy(&self) -> &dyn StickyStrategy {
        self.sticky.as_ref()
    }

    /// Node pinned to `edge` by the most recent resolution that pinned one.
    pub fn last_sticky(&self, edge: StickyEdge) -> Option<NodeId> {
        let last = match edge {
            StickyEdge::Top => &self.last_sticky_top,
            StickyEdge::Bottom => &self.last_sticky_bottom,
        };
        last.as_ref().map(|(id, _)| *id)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroller.is_running()
    }

    fn engine(&self) -> Option<Rc<dyn ListNodeInfoFetcher>> {
        self.engine.as_ref()?.upgrade()
    }

    fn ensure_alive(&self) -> Result<Rc<dyn ListNodeInfoFetcher>, ListError> {
        if self.destroyed {
            return Err(ListError::Destroyed);
        }
        self.engine().ok_or(ListError::Destroyed)
    }

    fn emit(&self, event: ListEvent) {
        if let Some(emitter) = &self.emitter {
            log::trace!("{} sends {}", self.config.list_sign, event.name());
            emitter.send(event);
        }
    }

    fn request_frame(&self) {
        if let Some(scheduler) = &self.frame_scheduler {
            scheduler.schedule_frame();
        }
    }

    fn sticky_enabled(&self) -> bool {
        self.config.enable_sticky && self.surface.is_vertical()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Props and diff snapshots
    // ─────────────────────────────────────────────────────────────────────

    /// Applies a prop from the script side. `list-container-info` carries a
    /// diff snapshot; every other prop goes to [`ListContainerConfig`].
    pub fn apply_prop(&mut self, name: &str, value: &PropValue) -> Result<(), ListError> {
        if name == PROP_CONTAINER_INFO {
            let snapshot = self.snapshot.merged_with_prop(value)?;
            self.apply_snapshot(snapshot);
            return Ok(());
        }

        let mode = self.config.sticky_mode;
        let was_sticky = self.sticky_enabled();
        self.config.apply_prop(name, value)?;

        if self.config.sticky_mode != mode {
            if self.nodes.is_empty() {
                self.sticky = self.config.sticky_mode.create_tracker();
                let ctx = StickyContext {
                    snapshot: &self.snapshot,
                    key_index: &self.key_index,
                };
                self.sticky.apply_snapshot(ctx);
            } else {
                log::warn!(
                    "{}: sticky mode cannot change once children exist; keeping {mode:?}",
                    self.config.list_sign
                );
                self.config.sticky_mode = mode;
            }
        }

        self.surface.configure(&self.config);
        self.lifecycle.configure(&self.config);
        self.smooth_scroll.set_orientation(self.config.orientation);

        if was_sticky && !self.sticky_enabled() {
            self.release_pinned();
        }
        Ok(())
    }

    /// Replaces the item keys and sticky ordinals.
    ///
    /// Registrations whose item is no longer sticky are dropped and their
    /// nodes lose any sticky transform; nodes still alive are re-registered
    /// against the new ordinals.
    pub fn apply_snapshot(&mut self, snapshot: DiffSnapshot) {
        log::debug!(
            "{} snapshot: {} items, {} sticky top, {} sticky bottom",
            self.config.list_sign,
            snapshot.item_count(),
            snapshot.sticky_top.len(),
            snapshot.sticky_bottom.len()
        );
        self.key_index.rebuild(snapshot.item_keys.clone());
        self.snapshot = snapshot;

        let ctx = StickyContext {
            snapshot: &self.snapshot,
            key_index: &self.key_index,
        };
        let mut evicted = self.sticky.apply_snapshot(ctx);
        for id in self.nodes.sorted_ids() {
            let Some(key) = self.nodes.get(id).and_then(|node| node.item_key()).cloned() else {
                continue;
            };
            let ctx = StickyContext {
                snapshot: &self.snapshot,
                key_index: &self.key_index,
            };
            evicted.extend(self.sticky.register_updated(id, Some(&key), ctx));
        }
        self.reset_nodes(&evicted);
        self.update_stickies();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Child lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Takes ownership of a child handed over by the diff-apply step. The
    /// view is attached later, once layout for it finishes.
    pub fn insert_child(&mut self, node: ComponentNode) -> bool {
        let id = node.id();
        if self.destroyed {
            log::warn!("{} is destroyed; dropping child {id}", self.config.list_sign);
            return false;
        }
        if self.nodes.contains(id) {
            log::warn!("{id} is already a child of {}", self.config.list_sign);
            return false;
        }
        let key = node.item_key().cloned();
        self.nodes.insert(node);
        let ctx = StickyContext {
            snapshot: &self.snapshot,
            key_index: &self.key_index,
        };
        let evicted = self.sticky.register_inserted(id, key.as_ref(), ctx);
        self.reset_nodes(&evicted);
        true
    }

    /// Detaches a child and releases it to the recycler.
    pub fn remove_child(&mut self, id: NodeId) -> bool {
        let Some(mut node) = self.nodes.remove(id) else {
            return false;
        };
        self.lifecycle.detach(&mut node, &mut self.surface);
        if self.sticky.register_removed(id) && self.config.recycle_sticky_item {
            node.reset_sticky_transform();
        }
        for last in [&mut self.last_sticky_top, &mut self.last_sticky_bottom] {
            if last.as_ref().is_some_and(|(pinned, _)| *pinned == id) {
                *last = None;
            }
        }
        log::debug!("released {id} from {}", self.config.list_sign);
        self.recycler.recycle(node);
        true
    }

    pub fn on_layout_finish(&mut self, operation: OperationId, id: NodeId) {
        log::trace!("layout finished for {id} in operation {}", operation.raw());
        if !self.lifecycle.batch_render() {
            self.insert_list_item_node(id);
        }
    }

    /// Attaches `id` now, or parks it until its layout arrives, and refreshes
    /// its sticky registration.
    pub fn insert_list_item_node(&mut self, id: NodeId) -> Option<AttachOutcome> {
        if self.destroyed {
            log::warn!("{} is destroyed; not attaching {id}", self.config.list_sign);
            return None;
        }
        let node = self.nodes.get_mut(id)?;
        let outcome = self.lifecycle.insert_list_item_node(node, &mut self.surface);
        let key = node.item_key().cloned();
        let ctx = StickyContext {
            snapshot: &self.snapshot,
            key_index: &self.key_index,
        };
        let evicted = self.sticky.register_updated(id, key.as_ref(), ctx);
        self.reset_nodes(&evicted);
        Some(outcome)
    }

    /// A layout result reached a child. Parked children get attached.
    pub fn on_child_layout_updated(&mut self, id: NodeId, bounds: Rect) -> Option<AttachOutcome> {
        let node = self.nodes.get_mut(id)?;
        node.set_bounds(bounds);
        self.lifecycle.on_layout_updated(node, &mut self.surface)
    }

    /// The child learned its item key, possibly a new one after reuse.
    pub fn on_item_node_ready(&mut self, id: NodeId, key: impl Into<ItemKey>) {
        let Some(node) = self.nodes.get_mut(id) else {
            log::debug!("node ready for unknown child {id}");
            return;
        };
        let key = key.into();
        node.set_item_key(Some(key.clone()));
        let ctx = StickyContext {
            snapshot: &self.snapshot,
            key_index: &self.key_index,
        };
        let evicted = self.sticky.register_node_ready(id, &key, ctx);
        self.reset_nodes(&evicted);
    }

    /// The engine finished a batch of updates.
    pub fn on_node_ready(&mut self) {
        self.update_stickies();
    }

    /// The container itself was laid out with `size`.
    pub fn on_layout_updated(&mut self, size: Size) {
        self.surface.set_viewport_size(size);
        self.surface.sync_cross_axis(size);
    }

    fn reset_nodes(&mut self, ids: &[NodeId]) {
        for id in ids {
            if let Some(node) = self.nodes.get_mut(*id) {
                node.reset_sticky_transform();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sticky items
    // ─────────────────────────────────────────────────────────────────────

    pub fn update_stickies(&mut self) {
        let offset = self.surface.scroll_y();
        self.update_sticky_tops(offset);
        self.update_sticky_bottoms(offset);
    }

    pub fn update_sticky_tops(&mut self, offset_top: f32) -> StickyResolution {
        if !self.sticky_enabled() {
            return StickyResolution::default();
        }
        let ctx = StickyContext {
            snapshot: &self.snapshot,
            key_index: &self.key_index,
        };
        let resolution =
            self.sticky
                .resolve_top(ctx, &self.nodes, offset_top, self.config.sticky_offset_px());
        self.apply_resolution(StickyEdge::Top, &resolution);
        resolution
    }

    pub fn update_sticky_bottoms(&mut self, offset_top: f32) -> StickyResolution {
        if !self.sticky_enabled() {
            return StickyResolution::default();
        }
        let ctx = StickyContext {
            snapshot: &self.snapshot,
            key_index: &self.key_index,
        };
        let resolution = self.sticky.resolve_bottom(
            ctx,
            &self.nodes,
            offset_top,
            self.surface.viewport_size().height,
            self.config.sticky_offset_px(),
        );
        self.apply_resolution(StickyEdge::Bottom, &resolution);
        resolution
    }

    fn apply_resolution(&mut self, edge: StickyEdge, resolution: &StickyResolution) {
        self.reset_nodes(&resolution.reset);
        let Some(active) = resolution.active else {
            return;
        };
        let Some(node) = self.nodes.get_mut(active.node) else {
            return;
        };
        node.set_translation_y(active.translation_y);
        node.set_translation_z(STICKY_ELEVATION);
        let current = node.item_key().cloned().map(|key| (active.node, key));
        self.surface.bring_to_front(active.node);

        let last = match edge {
            StickyEdge::Top => &mut self.last_sticky_top,
            StickyEdge::Bottom => &mut self.last_sticky_bottom,
        };
        let Some(current) = current else {
            return;
        };
        if last.as_ref() == Some(&current) {
            return;
        }
        let key = current.1.clone();
        *last = Some(current);
        let list = self.config.list_sign;
        self.emit(match edge {
            StickyEdge::Top => ListEvent::StickyTopChanged { list, key },
            StickyEdge::Bottom => ListEvent::StickyBottomChanged { list, key },
        });
    }

    /// Drops the sticky override of whatever is pinned right now.
    fn release_pinned(&mut self) {
        let pinned: EvictedNodes = [self.last_sticky_top.take(), self.last_sticky_bottom.take()]
            .into_iter()
            .flatten()
            .map(|(id, _)| id)
            .collect();
        self.reset_nodes(&pinned);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scroll sync
    // ─────────────────────────────────────────────────────────────────────

    fn on_scroll_changed(&mut self, change: ScrollChange) {
        if self.scroll_sync.is_blocking() {
            self.scroll_sync.note_suppressed();
            self.update_stickies();
            return;
        }
        let Some(engine) = self.engine() else {
            log::error!("{}: scroll changed but the engine is gone", self.config.list_sign);
            return;
        };
        let x = if self.surface.is_rtl() {
            self.surface.content_offset_x_rtl(change.x)
        } else {
            change.x
        };
        let realized = self.scroll_sync.record_realized(x, change.y);
        engine.scroll_by_list_container(self.config.list_sign, realized.x, realized.y, change.x, change.y);
        self.update_stickies();
    }

    /// The platform moved the surface (drag, fling or an animation step).
    pub fn on_native_scroll(&mut self, offset: Point) {
        if let Some(change) = self.surface.scroll_to(offset) {
            self.on_scroll_changed(change);
        }
    }

    /// Engine-originated update: grows the scrollable extent and shifts the
    /// offset by the engine's delta without echoing it back.
    pub fn update_content_size_and_offset(&mut self, content_size: f32, delta_x: f32, delta_y: f32) {
        log::debug!(
            "{} content size {content_size}, delta ({delta_x}, {delta_y})",
            self.config.list_sign
        );
        self.surface.update_content_extent(content_size);
        self.scroll_sync.begin_engine_update();
        let change = if self.surface.is_vertical() {
            let offset = self.scroll_sync.accumulate(0.0, delta_y);
            self.surface.set_scroll_y(offset.y)
        } else {
            let offset = self.scroll_sync.accumulate(delta_x, 0.0);
            let x = if self.surface.is_rtl() {
                self.surface.content_offset_x_rtl(offset.x)
            } else {
                offset.x
            };
            self.surface.set_scroll_x(x)
        };
        if let Some(change) = change {
            self.on_scroll_changed(change);
        }
        self.scroll_sync.end_engine_update();
    }

    /// The engine starts (`scrolling == false`) or refines a smooth scroll
    /// toward an estimated offset.
    pub fn update_scroll_info(&mut self, smooth: bool, estimated_offset: f32, scrolling: bool) {
        log::trace!("scroll info: smooth={smooth} estimated={estimated_offset} scrolling={scrolling}");
        let estimated = estimated_offset.trunc();
        self.smooth_scroll.set_estimated_offset(estimated);
        if !scrolling {
            let target = if self.surface.is_vertical() {
                Point::new(0.0, estimated)
            } else {
                Point::new(estimated, 0.0)
            };
            self.surface.smooth_scroll_to(target);
        }
    }

    pub fn on_smooth_scroll_start(&mut self, last: Point, target: Point) {
        self.smooth_scroll.on_smooth_scroll_start(last, target);
    }

    /// Maps one animation step onto the engine's latest estimate.
    pub fn on_smooth_scroll(&self, current: Point) -> Point {
        self.smooth_scroll.on_smooth_scroll(current)
    }

    pub fn on_smooth_scroll_end(&mut self) {
        self.surface.take_smooth_scroll_target();
        if let Some(engine) = self.engine() {
            engine.scroll_stopped(self.config.list_sign);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scroll state and events
    // ─────────────────────────────────────────────────────────────────────

    pub fn on_scroll_state_change(&mut self, state: ScrollState) {
        if !self.surface.set_scroll_state(state) {
            return;
        }
        match state {
            ScrollState::Idle => {
                self.finish_pending_scroll(Ok(()));
                if self.subscriptions.scroll_end {
                    self.emit_scroll_end();
                }
            }
            ScrollState::Dragging => self.finish_pending_scroll(Err(ListError::ScrollInterrupted {
                status: MethodStatus::Unknown,
                reason: "the scroll has stopped, triggered by dragging events",
            })),
            ScrollState::Fling | ScrollState::ScrollAnimation => {}
        }
        if self.subscriptions.scroll_state_change {
            let attached_cells = self
                .config
                .need_visible_item_info
                .then(|| self.visible_cells());
            self.emit(ListEvent::ScrollStateChange {
                list: self.config.list_sign,
                state,
                attached_cells,
            });
        }
    }

    fn emit_scroll_end(&self) {
        let scroll = self.surface.scroll_offset();
        let content = self.surface.content_size();
        self.emit(ListEvent::ScrollEnd {
            list: self.config.list_sign,
            detail: ScrollEventDetail {
                scroll_left: scroll.x,
                scroll_top: scroll.y,
                scroll_height: content.height,
                scroll_width: content.width,
                delta_x: 0.0,
                delta_y: 0.0,
            },
        });
    }

    fn finish_pending_scroll(&mut self, result: Result<(), ListError>) {
        if let Some(callback) = self.pending_scroll_to.take() {
            callback(result);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // List-control methods
    // ─────────────────────────────────────────────────────────────────────

    pub fn get_scroll_info(&self) -> Result<ScrollInfo, ListError> {
        self.ensure_alive()?;
        let density = self.config.density;
        Ok(ScrollInfo {
            scroll_x: Dp::from_px(self.member_scroll_x(), density).round_to_int(),
            scroll_y: Dp::from_px(self.member_scroll_y(), density).round_to_int(),
        })
    }

    /// Scrolls so that `params.position` is in view.
    ///
    /// A non-smooth request completes right away. A smooth one completes when
    /// scrolling goes idle, or fails when dragging, another request or
    /// auto-scroll interrupts it.
    pub fn scroll_to_position(
        &mut self,
        params: ScrollToPositionParams,
        callback: impl FnOnce(Result<(), ListError>) + 'static,
    ) {
        if self.destroyed {
            callback(Err(ListError::Destroyed));
            return;
        }
        let in_range = usize::try_from(params.position)
            .ok()
            .filter(|position| *position < self.key_index.len());
        let Some(position) = in_range else {
            callback(Err(ListError::invalid_argument(
                "position < 0 or position >= data count",
            )));
            return;
        };

        self.finish_pending_scroll(Err(ListError::ScrollInterrupted {
            status: MethodStatus::Unknown,
            reason: "the scroll has stopped, triggered by a new scrolling request",
        }));
        if !params.smooth {
            self.surface.stop_fling();
        }
        let Some(engine) = self.engine() else {
            callback(Err(ListError::Destroyed));
            return;
        };

        let offset = Dp(params.offset).to_px(self.config.density).trunc();
        if params.smooth {
            self.pending_scroll_to = Some(Box::new(callback));
            engine.scroll_to_position(self.config.list_sign, position, offset, params.align_to, true);
        } else {
            engine.scroll_to_position(self.config.list_sign, position, offset, params.align_to, false);
            self.emit_scroll_end();
            callback(Ok(()));
        }
    }

    /// Scrolls the main axis by `params.offset` dp. The result is in whole dp.
    pub fn scroll_by(&mut self, params: ScrollByParams) -> Result<ScrollDelta, ListError> {
        self.ensure_alive()?;
        let Some(offset) = params.offset else {
            return Err(ListError::invalid_argument(
                "Invoke scrollBy failed due to index param is null",
            ));
        };
        let px = Dp(offset).to_px(self.config.density);
        Ok(self.scroll_by_px(px, px).to_dp(self.config.density))
    }

    /// Scrolls the main axis by a pixel delta; the cross-axis delta is
    /// reported back unconsumed.
    pub fn scroll_by_px(&mut self, delta_x: f32, delta_y: f32) -> ScrollDelta {
        let last = self.surface.scroll_offset();
        let vertical = self.surface.is_vertical();
        let change = if vertical {
            self.surface.scroll_by(0.0, delta_y)
        } else {
            self.surface.scroll_by(delta_x, 0.0)
        };
        if let Some(change) = change {
            self.on_scroll_changed(change);
        }
        let now = self.surface.scroll_offset();
        if vertical {
            let consumed_y = now.y - last.y;
            ScrollDelta {
                consumed_x: 0.0,
                consumed_y,
                unconsumed_x: delta_x,
                unconsumed_y: delta_y - consumed_y,
            }
        } else {
            let consumed_x = now.x - last.x;
            ScrollDelta {
                consumed_x,
                consumed_y: 0.0,
                unconsumed_x: delta_x - consumed_x,
                unconsumed_y: delta_y,
            }
        }
    }

    pub fn get_visible_cells(&self) -> Result<Vec<VisibleCell>, ListError> {
        self.ensure_alive()?;
        Ok(self.visible_cells())
    }

    fn visible_cells(&self) -> Vec<VisibleCell> {
        let density = self.config.density;
        let scroll = self.surface.scroll_offset();
        let viewport = self.surface.viewport_size();
        let vertical = self.surface.is_vertical();
        let (start, extent) = if vertical {
            (scroll.y, viewport.height)
        } else {
            (scroll.x, viewport.width)
        };
        let end = start + extent;

        let mut cells: Vec<VisibleCell> = self
            .surface
            .children()
            .iter()
            .filter_map(|id| {
                let node = self.nodes.get(*id)?;
                let bounds = node.bounds()?;
                let (min, max) = if vertical {
                    (bounds.top(), bounds.bottom())
                } else {
                    (bounds.left(), bounds.right())
                };
                let visible = (min <= start && max >= start)
                    || (min <= end && max >= end)
                    || (min >= start && max <= end);
                if !visible {
                    return None;
                }
                let item_key = node.item_key().cloned();
                let dp = |px: f32| Dp::from_px(px, density).0;
                Some(VisibleCell {
                    id: node.id_selector().map(str::to_owned),
                    position: item_key
                        .as_ref()
                        .and_then(|key| self.key_index.position_of(key.as_str())),
                    item_key,
                    top: dp(bounds.top() - scroll.y),
                    bottom: dp(bounds.bottom() - scroll.y),
                    left: dp(bounds.left() - scroll.x),
                    right: dp(bounds.right() - scroll.x),
                })
            })
            .collect();
        cells.sort_by_key(|cell| cell.position);
        cells
    }

    /// Starts or stops scrolling at a constant rate, one step per frame.
    pub fn auto_scroll(&mut self, params: AutoScrollParams) -> Result<(), ListError> {
        self.ensure_alive()?;
        if !params.start {
            self.stop_auto_scroll();
            return Ok(());
        }
        let rate = auto_scroller::parse_rate(&params.rate, self.config.density)?;

        self.surface.set_during_auto_scroll(true);
        self.finish_pending_scroll(Err(ListError::ScrollInterrupted {
            status: MethodStatus::ParamInvalid,
            reason: "the scroll has stopped, triggered by auto scroll",
        }));
        self.auto_scroller.start(rate, params.auto_stop);
        if self.surface.can_scroll_by(self.auto_scroller.rate_per_frame()) {
            self.on_scroll_state_change(ScrollState::ScrollAnimation);
        }
        self.request_frame();
        Ok(())
    }

    fn stop_auto_scroll(&mut self) {
        if self.auto_scroller.stop() {
            self.surface.set_during_auto_scroll(false);
            self.on_scroll_state_change(ScrollState::Idle);
        }
    }

    /// Frame callback from the host; drives auto-scroll.
    pub fn on_frame(&mut self, frame_time_nanos: u64) {
        let Some(distance) = self.auto_scroller.step(frame_time_nanos) else {
            return;
        };
        if distance != 0.0 {
            if self.surface.can_scroll_by(distance) {
                let (dx, dy) = if self.surface.is_vertical() {
                    (0.0, distance)
                } else {
                    (distance, 0.0)
                };
                self.scroll_by_px(dx, dy);
            } else if self.auto_scroller.auto_stop() {
                log::debug!("{} auto scroll reached the border", self.config.list_sign);
                self.stop_auto_scroll();
                return;
            }
        }
        self.request_frame();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Gestures
    // ─────────────────────────────────────────────────────────────────────

    pub fn consume_gesture(&mut self, consume: bool) {
        self.surface.gesture_mut().set_consume_gesture(consume);
    }

    pub fn intercept_gesture(&mut self, intercept: bool) {
        self.surface.gesture_mut().set_intercept_gesture(intercept);
    }

    pub fn on_intercept_touch_event(&self, action: TouchAction) -> TouchDecision {
        self.surface.gesture().on_intercept_touch_event(action)
    }

    pub fn dispatch_touch_event(&mut self, action: TouchAction) -> DispatchOutcome {
        self.surface.gesture_mut().dispatch_touch_event(action)
    }

    pub fn on_touch_event(&mut self, action: TouchAction) -> TouchOutcome {
        self.surface.gesture_mut().on_touch_event(action)
    }

    pub fn is_at_border(&self, start: bool) -> bool {
        if !self.surface.gesture().is_enabled() {
            return false;
        }
        let direction = if start { -1.0 } else { 1.0 };
        !self.surface.can_scroll_by(direction)
    }

    pub fn can_consume_gesture(&self, delta_x: f32, delta_y: f32) -> bool {
        if !self.surface.gesture().is_enabled() {
            return false;
        }
        let delta = self.surface.orientation().main(delta_x, delta_y);
        !((self.is_at_border(true) && delta < 0.0) || (self.is_at_border(false) && delta > 0.0))
    }

    pub fn on_gesture_scroll_by(&mut self, x: f32, y: f32) {
        if !self.surface.gesture().is_enabled() {
            return;
        }
        let change = if self.surface.is_vertical() {
            self.surface.scroll_by(0.0, y)
        } else {
            self.surface.scroll_by(x, 0.0)
        };
        if let Some(change) = change {
            self.on_scroll_changed(change);
        }
    }

    pub fn member_scroll_x(&self) -> f32 {
        if self.surface.is_vertical() {
            0.0
        } else {
            self.surface.scroll_x()
        }
    }

    pub fn member_scroll_y(&self) -> f32 {
        if self.surface.is_vertical() {
            self.surface.scroll_y()
        } else {
            0.0
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Snapping
    // ─────────────────────────────────────────────────────────────────────

    pub fn snap_hooks(&self) -> ContainerSnapHooks<'_> {
        ContainerSnapHooks {
            surface: &self.surface,
            nodes: &self.nodes,
            key_index: &self.key_index,
        }
    }

    /// Asks the snap helper where a fling should settle and starts scrolling
    /// there. Does nothing unless `item-snap` is set and a helper exists.
    pub fn fling_snap(&mut self, velocity_x: f32, velocity_y: f32) -> Option<SnapTarget> {
        let snap = self.config.item_snap?;
        let helper = self.snap_helper.as_ref()?;
        let target = helper.find_snap_target(&snap, &self.snap_hooks(), velocity_x, velocity_y)?;
        let destination = Point::new(target.offset_x, target.offset_y);
        self.will_snap_to(target.position, self.surface.scroll_offset(), destination);
        self.surface.smooth_scroll_to(destination);
        Some(target)
    }

    pub fn will_snap_to(&self, position: usize, current: Point, target: Point) {
        let density = self.config.density;
        let dp = |px: f32| Dp::from_px(px, density).0;
        self.emit(ListEvent::Snap {
            list: self.config.list_sign,
            position,
            current_scroll_left: dp(current.x),
            current_scroll_top: dp(current.y),
            target_scroll_left: dp(target.x),
            target_scroll_top: dp(target.y),
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Teardown
    // ─────────────────────────────────────────────────────────────────────

    /// Detaches every child, drops sticky state and external handles, and
    /// fails a pending scroll request. Later method calls report
    /// [`ListError::Destroyed`].
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        log::info!("destroy list container {}", self.config.list_sign);
        self.destroyed = true;
        self.auto_scroller.stop();
        self.surface.set_during_auto_scroll(false);
        self.sticky.clear();
        self.last_sticky_top = None;
        self.last_sticky_bottom = None;

        let released: Vec<ComponentNode> = self.nodes.drain().collect();
        for mut node in released {
            self.lifecycle.detach(&mut node, &mut self.surface);
            node.reset_sticky_transform();
            self.recycler.recycle(node);
        }
        self.surface.clear_views();

        self.finish_pending_scroll(Err(ListError::Destroyed));
        self.engine = None;
        self.emitter = None;
        self.frame_scheduler = None;
        self.snap_helper = None;
    }
}

impl Drop for ListContainer {
    fn drop(&mut self) {
        self.finish_pending_scroll(Err(ListError::Destroyed));
    }
}
