//! Parameters and results of the list-control methods.

use pinlist_core::{Dp, ItemKey};

use crate::ListError;

/// Result codes reported to method callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodStatus {
    Success,
    Unknown,
    NodeNotFound,
    MethodNotFound,
    ParamInvalid,
    InvalidStateError,
    OperationError,
}

impl MethodStatus {
    pub fn code(self) -> i32 {
        match self {
            MethodStatus::Success => 0,
            MethodStatus::Unknown => 1,
            MethodStatus::NodeNotFound => 2,
            MethodStatus::MethodNotFound => 3,
            MethodStatus::ParamInvalid => 4,
            MethodStatus::InvalidStateError => 5,
            MethodStatus::OperationError => 6,
        }
    }
}

/// Where the target item ends up in the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl ScrollAlign {
    /// Unknown names align to the top.
    pub fn from_name(name: &str) -> Self {
        match name {
            "middle" => ScrollAlign::Middle,
            "bottom" => ScrollAlign::Bottom,
            _ => ScrollAlign::Top,
        }
    }

    /// Value passed to the engine.
    pub fn code(self) -> i32 {
        match self {
            ScrollAlign::Top => 0,
            ScrollAlign::Middle => 1,
            ScrollAlign::Bottom => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollToPositionParams {
    /// Item position; negative values are rejected.
    pub position: i64,
    /// Extra offset in dp.
    pub offset: f32,
    pub smooth: bool,
    pub align_to: ScrollAlign,
}

impl ScrollToPositionParams {
    pub fn new(position: i64) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn align_to(mut self, align: ScrollAlign) -> Self {
        self.align_to = align;
        self
    }
}

/// Scroll offsets in whole dp; the cross axis is always 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollInfo {
    pub scroll_x: i32,
    pub scroll_y: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollByParams {
    /// Distance in dp; required.
    pub offset: Option<f32>,
}

/// How much of a scroll request the surface absorbed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollDelta {
    pub consumed_x: f32,
    pub consumed_y: f32,
    pub unconsumed_x: f32,
    pub unconsumed_y: f32,
}

impl ScrollDelta {
    /// Converts to whole dp, truncating toward zero.
    pub fn to_dp(self, density: f32) -> ScrollDelta {
        let dp = |px: f32| Dp::from_px(px, density).0.trunc();
        ScrollDelta {
            consumed_x: dp(self.consumed_x),
            consumed_y: dp(self.consumed_y),
            unconsumed_x: dp(self.unconsumed_x),
            unconsumed_y: dp(self.unconsumed_y),
        }
    }
}

/// A child intersecting the viewport. Edges are in dp relative to the
/// scroll offset.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleCell {
    pub id: Option<String>,
    pub position: Option<usize>,
    pub item_key: Option<ItemKey>,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl VisibleCell {
    /// Same as `position`, under the name scripts also read.
    pub fn index(&self) -> Option<usize> {
        self.position
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AutoScrollParams {
    /// Distance per second: `"<n>px"`, `"<n>dp"` or a bare pixel count.
    pub rate: String,
    pub start: bool,
    pub auto_stop: bool,
}

impl Default for AutoScrollParams {
    fn default() -> Self {
        Self {
            rate: String::new(),
            start: true,
            auto_stop: true,
        }
    }
}

impl AutoScrollParams {
    pub fn start(rate: impl Into<String>) -> Self {
        Self {
            rate: rate.into(),
            ..Self::default()
        }
    }

    pub fn stop() -> Self {
        Self {
            start: false,
            ..Self::default()
        }
    }

    pub fn auto_stop(mut self, auto_stop: bool) -> Self {
        self.auto_stop = auto_stop;
        self
    }
}

/// Completion of a smooth `scroll_to_position`.
pub type ScrollToCallback = Box<dyn FnOnce(Result<(), ListError>)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_names() {
        assert_eq!(ScrollAlign::from_name("middle").code(), 1);
        assert_eq!(ScrollAlign::from_name("bottom").code(), 2);
        assert_eq!(ScrollAlign::from_name("center"), ScrollAlign::Top);
    }

    #[test]
    fn delta_truncates_to_dp() {
        let delta = ScrollDelta {
            consumed_x: 0.0,
            consumed_y: 31.0,
            unconsumed_x: 0.0,
            unconsumed_y: -5.0,
        };
        let dp = delta.to_dp(2.0);
        assert_eq!(dp.consumed_y, 15.0);
        assert_eq!(dp.unconsumed_y, -2.0);
    }

    #[test]
    fn delta_without_density_stays_in_pixels() {
        let delta = ScrollDelta {
            consumed_y: 30.5,
            ..ScrollDelta::default()
        };
        let dp = delta.to_dp(0.0);
        assert_eq!(dp.consumed_y, 30.0);
        assert_eq!(dp.unconsumed_y, 0.0);
    }
}
