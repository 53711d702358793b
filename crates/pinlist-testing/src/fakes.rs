use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use pinlist_core::{FrameScheduler, ListSign, NodeId, OperationId};
use pinlist_foundation::{ListEvent, ListEventEmitter, ListNodeInfoFetcher, ScrollAlign, StickyEdge};

/// One call received by [`FakeListEngine`].
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    RenderChild {
        index: usize,
        operation: OperationId,
    },
    UpdateChild {
        old_child: NodeId,
        new_index: usize,
        operation: OperationId,
    },
    RemoveChild(NodeId),
    ObtainChild {
        index: usize,
        operation: OperationId,
        reuse_notify: bool,
        async_request: bool,
    },
    RecycleChild {
        child: NodeId,
        async_request: bool,
    },
    ScrollBy {
        x: f32,
        y: f32,
        original_x: f32,
        original_y: f32,
    },
    ScrollToPosition {
        position: usize,
        offset: f32,
        align: ScrollAlign,
        smooth: bool,
    },
    ScrollStopped,
}

/// Engine stand-in that records every call. `obtain_child` hands out the ids
/// queued with [`FakeListEngine::queue_child`].
#[derive(Default)]
pub struct FakeListEngine {
    calls: RefCell<Vec<(ListSign, EngineCall)>>,
    children: RefCell<VecDeque<NodeId>>,
}

impl FakeListEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_child(&self, id: NodeId) {
        self.children.borrow_mut().push_back(id);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().iter().map(|(_, call)| call.clone()).collect()
    }

    /// Drains the recorded calls.
    pub fn take_calls(&self) -> Vec<EngineCall> {
        self.calls.borrow_mut().drain(..).map(|(_, call)| call).collect()
    }

    /// Offsets reported through `scroll_by_list_container`, as `(x, y)`.
    pub fn reported_offsets(&self) -> Vec<(f32, f32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|(_, call)| match call {
                EngineCall::ScrollBy { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn lists(&self) -> Vec<ListSign> {
        self.calls.borrow().iter().map(|(list, _)| *list).collect()
    }

    fn record(&self, list: ListSign, call: EngineCall) {
        log::trace!("engine call for {list}: {call:?}");
        self.calls.borrow_mut().push((list, call));
    }
}

impl ListNodeInfoFetcher for FakeListEngine {
    fn render_child(&self, list: ListSign, index: usize, operation: OperationId) {
        self.record(list, EngineCall::RenderChild { index, operation });
    }

    fn update_child(&self, list: ListSign, old_child: NodeId, new_index: usize, operation: OperationId) {
        self.record(
            list,
            EngineCall::UpdateChild {
                old_child,
                new_index,
                operation,
            },
        );
    }

    fn remove_child(&self, list: ListSign, child: NodeId) {
        self.record(list, EngineCall::RemoveChild(child));
    }

    fn obtain_child(
        &self,
        list: ListSign,
        index: usize,
        operation: OperationId,
        reuse_notify: bool,
    ) -> Option<NodeId> {
        self.record(
            list,
            EngineCall::ObtainChild {
                index,
                operation,
                reuse_notify,
                async_request: false,
            },
        );
        self.children.borrow_mut().pop_front()
    }

    fn recycle_child(&self, list: ListSign, child: NodeId) {
        self.record(
            list,
            EngineCall::RecycleChild {
                child,
                async_request: false,
            },
        );
    }

    fn obtain_child_async(&self, list: ListSign, index: usize, operation: OperationId) {
        self.record(
            list,
            EngineCall::ObtainChild {
                index,
                operation,
                reuse_notify: false,
                async_request: true,
            },
        );
    }

    fn recycle_child_async(&self, list: ListSign, child: NodeId) {
        self.record(
            list,
            EngineCall::RecycleChild {
                child,
                async_request: true,
            },
        );
    }

    fn scroll_by_list_container(&self, list: ListSign, x: f32, y: f32, original_x: f32, original_y: f32) {
        self.record(
            list,
            EngineCall::ScrollBy {
                x,
                y,
                original_x,
                original_y,
            },
        );
    }

    fn scroll_to_position(&self, list: ListSign, position: usize, offset: f32, align: ScrollAlign, smooth: bool) {
        self.record(
            list,
            EngineCall::ScrollToPosition {
                position,
                offset,
                align,
                smooth,
            },
        );
    }

    fn scroll_stopped(&self, list: ListSign) {
        self.record(list, EngineCall::ScrollStopped);
    }
}

/// Collects events sent by a container.
#[derive(Default)]
pub struct RecordingEventEmitter {
    events: RefCell<Vec<ListEvent>>,
}

impl RecordingEventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ListEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<ListEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(ListEvent::name).collect()
    }

    /// Keys announced for `edge`, in order.
    pub fn sticky_keys(&self, edge: StickyEdge) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match (edge, event) {
                (StickyEdge::Top, ListEvent::StickyTopChanged { key, .. })
                | (StickyEdge::Bottom, ListEvent::StickyBottomChanged { key, .. }) => {
                    Some(key.to_string())
                }
                _ => None,
            })
            .collect()
    }
}

impl ListEventEmitter for RecordingEventEmitter {
    fn send(&self, event: ListEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Counts frame requests until a test decides to run a frame.
#[derive(Default)]
pub struct ManualFrameScheduler {
    requested: Cell<u32>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.requested.get() > 0
    }

    /// Returns whether a frame was requested and clears the request.
    pub fn take_request(&self) -> bool {
        self.requested.replace(0) > 0
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule_frame(&self) {
        self.requested.set(self.requested.get() + 1);
    }
}
