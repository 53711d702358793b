//! Engine-guided smooth scrolling.
//!
//! When the engine drives a smooth scroll to an item whose position is only
//! estimated, it keeps refining the estimate while the animation runs. Each
//! animation step is rescaled from the initial estimate to the latest one and
//! never overshoots it.

use pinlist_core::{Orientation, Point};

/// Marker for "no estimate known".
pub const INVALID_ESTIMATED_OFFSET: f32 = -1.0;

#[derive(Clone, Debug)]
pub struct EstimatedScrollHook {
    orientation: Orientation,
    estimated_offset: f32,
    initial_estimated_offset: f32,
    scroll_to_lower: bool,
}

impl EstimatedScrollHook {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            estimated_offset: INVALID_ESTIMATED_OFFSET,
            initial_estimated_offset: INVALID_ESTIMATED_OFFSET,
            scroll_to_lower: false,
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_estimated_offset(&mut self, offset: f32) {
        self.estimated_offset = offset;
    }

    pub fn estimated_offset(&self) -> f32 {
        self.estimated_offset
    }

    pub fn on_smooth_scroll_start(&mut self, last: Point, target: Point) {
        self.initial_estimated_offset = self.orientation.main(target.x, target.y);
        self.scroll_to_lower = self.initial_estimated_offset > self.orientation.main(last.x, last.y);
    }

    /// Maps one animation step to the offset that should actually be applied.
    pub fn on_smooth_scroll(&self, current: Point) -> Point {
        let mut offset = self.orientation.main(current.x, current.y);
        if self.initial_estimated_offset != 0.0 {
            offset *= self.estimated_offset / self.initial_estimated_offset;
        }
        if self.estimated_offset > 0.0 {
            let overshoot = if self.scroll_to_lower {
                offset > self.estimated_offset
            } else {
                offset < self.estimated_offset
            };
            if overshoot {
                offset = self.estimated_offset;
            }
        }
        match self.orientation {
            Orientation::Vertical => Point::new(current.x, offset),
            Orientation::Horizontal => Point::new(offset, current.y),
        }
    }
}
