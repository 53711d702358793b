//! Container configuration and prop parsing.

use pinlist_core::{Dp, ListSign, Orientation, ThreadStrategy};

use super::snap::ItemSnap;
use super::sticky::StickyMode;
use crate::ListError;

/// A prop value as delivered by the script side. `Null` resets the prop to
/// its default.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<PropValue>),
    Map(Vec<(String, PropValue)>),
}

impl PropValue {
    pub fn get(&self, field: &str) -> Option<&PropValue> {
        match self {
            PropValue::Map(entries) => entries
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(value) => Some(*value),
            PropValue::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_owned())
    }
}

/// Cap on fling distance, relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlingDistanceRatio {
    Automatic,
    Ratio(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListContainerConfig {
    pub list_sign: ListSign,
    pub orientation: Orientation,
    pub rtl: bool,
    /// Pixels per dp.
    pub density: f32,
    pub thread_strategy: ThreadStrategy,
    pub enable_sticky: bool,
    pub sticky_offset: Dp,
    pub sticky_mode: StickyMode,
    /// Reset the transform of a sticky node when it is removed.
    pub recycle_sticky_item: bool,
    pub batch_render: bool,
    pub enable_fade_in_animation: bool,
    pub fade_in_duration_ms: u32,
    /// Attach visible-cell info to scroll state events.
    pub need_visible_item_info: bool,
    pub enable_scroll: bool,
    pub force_can_scroll: bool,
    pub enable_nested_scroll: bool,
    pub max_fling_distance_ratio: Option<FlingDistanceRatio>,
    pub item_snap: Option<ItemSnap>,
    pub enable_new_gesture: bool,
    pub include_native_gesture: bool,
}

impl Default for ListContainerConfig {
    fn default() -> Self {
        Self {
            list_sign: ListSign::default(),
            orientation: Orientation::Vertical,
            rtl: false,
            density: 1.0,
            thread_strategy: ThreadStrategy::AllOnUi,
            enable_sticky: false,
            sticky_offset: Dp(0.0),
            sticky_mode: StickyMode::ItemKey,
            recycle_sticky_item: true,
            batch_render: false,
            enable_fade_in_animation: false,
            fade_in_duration_ms: 100,
            need_visible_item_info: false,
            enable_scroll: true,
            force_can_scroll: false,
            enable_nested_scroll: false,
            max_fling_distance_ratio: None,
            item_snap: None,
            enable_new_gesture: false,
            include_native_gesture: true,
        }
    }
}

fn bool_prop(name: &str, value: &PropValue, default: bool) -> Result<bool, ListError> {
    match value {
        PropValue::Null => Ok(default),
        PropValue::Bool(flag) => Ok(*flag),
        _ => Err(ListError::invalid_prop(name, "expected a boolean")),
    }
}

fn number_prop(name: &str, value: &PropValue, default: f64) -> Result<f64, ListError> {
    match value {
        PropValue::Null => Ok(default),
        other => other
            .as_f64()
            .ok_or_else(|| ListError::invalid_prop(name, "expected a number")),
    }
}

impl ListContainerConfig {
    pub fn sticky_offset_px(&self) -> f32 {
        self.sticky_offset.to_px(self.density)
    }

    /// Applies one prop. Returns `Ok(false)` for props this config does not
    /// own.
    pub fn apply_prop(&mut self, name: &str, value: &PropValue) -> Result<bool, ListError> {
        match name {
            "sticky" => self.enable_sticky = bool_prop(name, value, true)?,
            "sticky-offset" => {
                // Whole dp only.
                self.sticky_offset = Dp(number_prop(name, value, 0.0)?.trunc() as f32);
            }
            "experimental-update-sticky-for-diff" => {
                self.sticky_mode = if bool_prop(name, value, true)? {
                    StickyMode::ItemKey
                } else {
                    StickyMode::Index
                };
            }
            "experimental-recycle-sticky-item" => {
                self.recycle_sticky_item = bool_prop(name, value, true)?;
            }
            "experimental-batch-render-strategy" => {
                self.batch_render = number_prop(name, value, 0.0)? > 0.0;
            }
            "enable-fade-in-animation" => {
                self.enable_fade_in_animation = bool_prop(name, value, false)?;
            }
            "update-animation-fade-in-duration" => {
                let duration = number_prop(name, value, 100.0)?;
                if duration < 0.0 {
                    return Err(ListError::invalid_prop(name, "duration must not be negative"));
                }
                self.fade_in_duration_ms = duration as u32;
            }
            "need-visible-item-info" => {
                self.need_visible_item_info = bool_prop(name, value, false)?;
            }
            "scroll-orientation" => {
                self.orientation = match value {
                    PropValue::Null => Orientation::Vertical,
                    PropValue::String(text) => {
                        Orientation::from_name(text).unwrap_or(Orientation::Vertical)
                    }
                    _ => return Err(ListError::invalid_prop(name, "expected a string")),
                };
            }
            "vertical-orientation" => {
                self.orientation = if bool_prop(name, value, false)? {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
            }
            "enable-scroll" => self.enable_scroll = bool_prop(name, value, true)?,
            "force-can-scroll" => self.force_can_scroll = bool_prop(name, value, false)?,
            "enable-nested-scroll" => {
                self.enable_nested_scroll = bool_prop(name, value, false)?;
            }
            "experimental-max-fling-distance-ratio" => {
                // Anything other than "auto" or a number leaves the ratio as is.
                match value {
                    PropValue::Null => self.max_fling_distance_ratio = None,
                    PropValue::String(text) if text == "auto" => {
                        self.max_fling_distance_ratio = Some(FlingDistanceRatio::Automatic);
                    }
                    PropValue::Number(ratio) => {
                        self.max_fling_distance_ratio = Some(FlingDistanceRatio::Ratio(*ratio as f32));
                    }
                    _ => {}
                }
            }
            "item-snap" => {
                self.item_snap = match value {
                    PropValue::Map(entries) if !entries.is_empty() => {
                        let factor = value.get("factor").and_then(PropValue::as_f64).unwrap_or(0.0);
                        let offset = value.get("offset").and_then(PropValue::as_f64).unwrap_or(0.0);
                        Some(ItemSnap::sanitized(factor as f32, offset.trunc() as f32))
                    }
                    PropValue::Map(_) | PropValue::Null => None,
                    _ => return Err(ListError::invalid_prop(name, "expected a map")),
                };
            }
            _ => {
                log::debug!("list container ignores prop `{name}`");
                return Ok(false);
            }
        }
        Ok(true)
    }
}
