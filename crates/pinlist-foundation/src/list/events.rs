//! Events the container sends to the script side.

use pinlist_core::{ItemKey, ListSign};

use super::methods::VisibleCell;
use super::surface::ScrollState;

pub const EVENT_SCROLL_END: &str = "scrollend";
pub const EVENT_SCROLL_STATE_CHANGE: &str = "scrollstatechange";

/// Scroll position carried by scroll events, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollEventDetail {
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub scroll_width: f32,
    pub delta_x: f32,
    pub delta_y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListEvent {
    StickyTopChanged {
        list: ListSign,
        key: ItemKey,
    },
    StickyBottomChanged {
        list: ListSign,
        key: ItemKey,
    },
    ScrollEnd {
        list: ListSign,
        detail: ScrollEventDetail,
    },
    ScrollStateChange {
        list: ListSign,
        state: ScrollState,
        attached_cells: Option<Vec<VisibleCell>>,
    },
    /// Offsets are in dp.
    Snap {
        list: ListSign,
        position: usize,
        current_scroll_left: f32,
        current_scroll_top: f32,
        target_scroll_left: f32,
        target_scroll_top: f32,
    },
}

impl ListEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ListEvent::StickyTopChanged { .. } => "stickytop",
            ListEvent::StickyBottomChanged { .. } => "stickybottom",
            ListEvent::ScrollEnd { .. } => EVENT_SCROLL_END,
            ListEvent::ScrollStateChange { .. } => EVENT_SCROLL_STATE_CHANGE,
            ListEvent::Snap { .. } => "snap",
        }
    }
}

/// Receives events for delivery to the script side.
pub trait ListEventEmitter {
    fn send(&self, event: ListEvent);
}

/// Optional events the script side has bound handlers for. Sticky and snap
/// events are always sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventSubscriptions {
    pub scroll_end: bool,
    pub scroll_state_change: bool,
}

impl EventSubscriptions {
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut subscriptions = Self::default();
        for name in names {
            match name {
                EVENT_SCROLL_END => subscriptions.scroll_end = true,
                EVENT_SCROLL_STATE_CHANGE => subscriptions.scroll_state_change = true,
                _ => {}
            }
        }
        subscriptions
    }
}
