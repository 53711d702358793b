//! Offset bookkeeping between the surface and the layout engine.
//!
//! The engine moves the surface when it adjusts content (items inserted above
//! the viewport, estimated sizes corrected). Those moves must not be reported
//! back to it as user scrolls, so they run with `block_feedback` raised.

use pinlist_core::Point;

/// A realized change of the surface scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollChange {
    pub x: f32,
    pub y: f32,
    pub old_x: f32,
    pub old_y: f32,
}

#[derive(Debug, Default)]
pub struct ScrollSync {
    block_feedback: bool,
    previous: Point,
    forwarded: u64,
    suppressed: u64,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_blocking(&self) -> bool {
        self.block_feedback
    }

    pub(crate) fn begin_engine_update(&mut self) {
        self.block_feedback = true;
    }

    pub(crate) fn end_engine_update(&mut self) {
        self.block_feedback = false;
    }

    /// Counts a scroll notification dropped because the engine caused it.
    pub(crate) fn note_suppressed(&mut self) {
        self.suppressed += 1;
        log::trace!("scroll notification suppressed during engine update");
    }

    /// Remembers an offset the engine is about to be told about. `x` must
    /// already be in the engine's coordinate space (RTL corrected).
    pub(crate) fn record_realized(&mut self, x: f32, y: f32) -> Point {
        self.previous = Point::new(x, y);
        self.forwarded += 1;
        self.previous
    }

    /// Applies an engine delta to the last known offset and returns the
    /// resulting offset.
    pub(crate) fn accumulate(&mut self, dx: f32, dy: f32) -> Point {
        self.previous.x += dx;
        self.previous.y += dy;
        self.previous
    }

    /// Last offset agreed on with the engine.
    pub fn previous_offset(&self) -> Point {
        self.previous
    }

    pub fn forwarded_count(&self) -> u64 {
        self.forwarded
    }

    pub fn suppressed_count(&self) -> u64 {
        self.suppressed
    }
}
