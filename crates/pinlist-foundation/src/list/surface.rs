//! The scrollable surface hosting the child views.
//!
//! Tracks what the native scroll view would: scroll offset, viewport and
//! content extent, draw order of attached children and the current scroll
//! state. Offsets are in pixels. Content extent of zero on an axis means "same
//! as the viewport".

use pinlist_core::{NodeId, Orientation, Point, Size};

use super::config::{FlingDistanceRatio, ListContainerConfig};
use super::gesture::GestureGate;
use super::scroll_sync::ScrollChange;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollState {
    #[default]
    Idle,
    Dragging,
    Fling,
    ScrollAnimation,
}

impl ScrollState {
    /// Numeric state reported in `scrollstatechange` events.
    pub fn code(self) -> i32 {
        match self {
            ScrollState::Idle => 1,
            ScrollState::Dragging => 2,
            ScrollState::Fling => 3,
            ScrollState::ScrollAnimation => 4,
        }
    }
}

#[derive(Debug)]
pub struct ContainerSurface {
    orientation: Orientation,
    rtl: bool,
    viewport: Size,
    content: Size,
    scroll: Point,
    children: Vec<NodeId>,
    enable_scroll: bool,
    force_can_scroll: bool,
    nested_scroll: bool,
    max_fling_distance_ratio: Option<FlingDistanceRatio>,
    scroll_state: ScrollState,
    during_auto_scroll: bool,
    smooth_scroll_target: Option<Point>,
    gesture: GestureGate,
}

impl ContainerSurface {
    pub fn new(orientation: Orientation, rtl: bool) -> Self {
        Self {
            orientation,
            rtl,
            viewport: Size::ZERO,
            content: Size::ZERO,
            scroll: Point::ZERO,
            children: Vec::new(),
            enable_scroll: true,
            force_can_scroll: false,
            nested_scroll: false,
            max_fling_distance_ratio: None,
            scroll_state: ScrollState::Idle,
            during_auto_scroll: false,
            smooth_scroll_target: None,
            gesture: GestureGate::default(),
        }
    }

    pub fn from_config(config: &ListContainerConfig) -> Self {
        let mut surface = Self::new(config.orientation, config.rtl);
        surface.configure(config);
        surface
    }

    pub fn configure(&mut self, config: &ListContainerConfig) {
        self.orientation = config.orientation;
        self.rtl = config.rtl;
        self.enable_scroll = config.enable_scroll;
        self.force_can_scroll = config.force_can_scroll;
        self.nested_scroll = config.enable_nested_scroll;
        self.max_fling_distance_ratio = config.max_fling_distance_ratio;
        self.gesture
            .configure(config.enable_new_gesture, config.include_native_gesture);
    }

    // ─── Geometry ───────────────────────────────────────────────────────

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation.is_vertical()
    }

    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Scrollable extent; an unset axis falls back to the viewport.
    pub fn content_size(&self) -> Size {
        Size::new(
            if self.content.width > 0.0 { self.content.width } else { self.viewport.width },
            if self.content.height > 0.0 { self.content.height } else { self.viewport.height },
        )
    }

    /// Returns whether the stored extent changed.
    pub fn set_measured_size(&mut self, size: Size) -> bool {
        if self.content == size {
            return false;
        }
        self.content = size;
        true
    }

    /// Grows or shrinks the main-axis extent to `content_size`, never below
    /// the viewport.
    pub fn update_content_extent(&mut self, content_size: f32) -> bool {
        if self.is_vertical() {
            if content_size == self.content.height {
                return false;
            }
            let height = content_size.max(self.viewport.height);
            self.set_measured_size(Size::new(self.content.width, height))
        } else {
            if content_size == self.content.width {
                return false;
            }
            let width = content_size.max(self.viewport.width);
            self.set_measured_size(Size::new(width, self.content.height))
        }
    }

    /// Keeps the cross-axis extent in step with the container's own size.
    pub fn sync_cross_axis(&mut self, container: Size) -> bool {
        if self.is_vertical() && self.content.width != container.width {
            self.set_measured_size(Size::new(container.width, self.content.height))
        } else if !self.is_vertical() && self.content.height != container.height {
            self.set_measured_size(Size::new(self.content.width, container.height))
        } else {
            false
        }
    }

    pub fn max_scroll(&self) -> Point {
        let content = self.content_size();
        Point::new(
            (content.width - self.viewport.width).max(0.0),
            (content.height - self.viewport.height).max(0.0),
        )
    }

    /// Mirrors a horizontal offset between left-to-right and right-to-left
    /// coordinates.
    pub fn content_offset_x_rtl(&self, x: f32) -> f32 {
        (self.content_size().width - x - self.viewport.width).max(0.0)
    }

    // ─── Scrolling ──────────────────────────────────────────────────────

    pub fn scroll_x(&self) -> f32 {
        self.scroll.x
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll.y
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Moves to `offset` without clamping, like a direct `setScroll` on the
    /// native view. Returns the change when the offset actually moved.
    pub fn scroll_to(&mut self, offset: Point) -> Option<ScrollChange> {
        if offset == self.scroll {
            return None;
        }
        let old = self.scroll;
        self.scroll = offset;
        Some(ScrollChange {
            x: offset.x,
            y: offset.y,
            old_x: old.x,
            old_y: old.y,
        })
    }

    pub fn set_scroll_x(&mut self, x: f32) -> Option<ScrollChange> {
        self.scroll_to(Point::new(x, self.scroll.y))
    }

    pub fn set_scroll_y(&mut self, y: f32) -> Option<ScrollChange> {
        self.scroll_to(Point::new(self.scroll.x, y))
    }

    /// Scrolls by a delta, clamped to the scrollable range.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) -> Option<ScrollChange> {
        let max = self.max_scroll();
        let target = Point::new(
            (self.scroll.x + dx).clamp(0.0, max.x),
            (self.scroll.y + dy).clamp(0.0, max.y),
        );
        self.scroll_to(target)
    }

    /// Whether scrolling along the main axis in `direction` (sign only)
    /// would move the surface.
    pub fn can_scroll_by(&self, direction: f32) -> bool {
        if self.force_can_scroll {
            return true;
        }
        if !self.enable_scroll {
            return false;
        }
        let offset = self.orientation.main(self.scroll.x, self.scroll.y);
        let max = self.max_scroll();
        let max = self.orientation.main(max.x, max.y);
        if direction < 0.0 {
            offset > 0.0
        } else if direction > 0.0 {
            offset < max
        } else {
            false
        }
    }

    pub fn can_scroll_vertically(&self, direction: f32) -> bool {
        self.is_vertical() && self.can_scroll_by(direction)
    }

    pub fn can_scroll_horizontally(&self, direction: f32) -> bool {
        !self.is_vertical() && self.can_scroll_by(direction)
    }

    pub fn enable_scroll(&self) -> bool {
        self.enable_scroll
    }

    pub fn force_can_scroll(&self) -> bool {
        self.force_can_scroll
    }

    pub fn nested_scroll_enabled(&self) -> bool {
        self.nested_scroll
    }

    pub fn max_fling_distance_ratio(&self) -> Option<FlingDistanceRatio> {
        self.max_fling_distance_ratio
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Returns whether the state changed.
    pub fn set_scroll_state(&mut self, state: ScrollState) -> bool {
        if self.scroll_state == state {
            return false;
        }
        self.scroll_state = state;
        true
    }

    pub fn stop_fling(&mut self) {
        self.smooth_scroll_target = None;
    }

    /// Hands a smooth-scroll target to the platform animator.
    pub fn smooth_scroll_to(&mut self, target: Point) {
        self.smooth_scroll_target = Some(target);
    }

    pub fn smooth_scroll_target(&self) -> Option<Point> {
        self.smooth_scroll_target
    }

    pub fn take_smooth_scroll_target(&mut self) -> Option<Point> {
        self.smooth_scroll_target.take()
    }

    pub fn is_during_auto_scroll(&self) -> bool {
        self.during_auto_scroll
    }

    pub fn set_during_auto_scroll(&mut self, value: bool) {
        self.during_auto_scroll = value;
    }

    // ─── Children ───────────────────────────────────────────────────────

    /// Appends the view on top of the draw order. Returns `false` when it is
    /// already attached.
    pub fn add_view(&mut self, id: NodeId) -> bool {
        if self.children.contains(&id) {
            return false;
        }
        self.children.push(id);
        true
    }

    pub fn remove_view(&mut self, id: NodeId) -> bool {
        match self.children.iter().position(|child| *child == id) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Moves an attached view to the end of the draw order.
    pub fn bring_to_front(&mut self, id: NodeId) -> bool {
        let Some(index) = self.children.iter().position(|child| *child == id) else {
            return false;
        };
        if index + 1 != self.children.len() {
            let view = self.children.remove(index);
            self.children.push(view);
        }
        true
    }

    pub fn contains_view(&self, id: NodeId) -> bool {
        self.children.contains(&id)
    }

    /// Attached views in draw order, back to front.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn clear_views(&mut self) {
        self.children.clear();
    }

    // ─── Gestures ───────────────────────────────────────────────────────

    pub fn gesture(&self) -> &GestureGate {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut GestureGate {
        &mut self.gesture
    }
}
