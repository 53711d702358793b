//! Frame-driven auto scrolling at a constant rate.

use pinlist_core::Dp;

use crate::ListError;

const FRAMES_PER_SECOND: f32 = 60.0;
const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

/// Parses an auto-scroll rate into pixels per second.
///
/// Accepts `"<n>px"`, `"<n>dp"` or a bare number of pixels. Negative rates
/// scroll backward; zero is rejected.
pub fn parse_rate(rate: &str, density: f32) -> Result<f32, ListError> {
    let rate = rate.trim();
    let invalid = || ListError::AutoScroll {
        reason: format!("rate `{rate}` is not valid"),
    };
    let (number, to_px): (&str, fn(f32, f32) -> f32) = if let Some(number) = rate.strip_suffix("px") {
        (number, |value, _| value)
    } else if let Some(number) = rate.strip_suffix("dp") {
        (number, |value, density| Dp(value).to_px(density))
    } else {
        (rate, |value, _| value)
    };
    let value: f32 = number.trim().parse().map_err(|_| invalid())?;
    if value == 0.0 || !value.is_finite() {
        return Err(invalid());
    }
    Ok(to_px(value, density))
}

#[derive(Debug, Default)]
pub struct AutoScroller {
    rate: f32,
    auto_stop: bool,
    running: bool,
    last_frame_nanos: Option<u64>,
}

impl AutoScroller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, rate_px_per_second: f32, auto_stop: bool) {
        self.rate = rate_px_per_second;
        self.auto_stop = auto_stop;
        self.running = true;
        self.last_frame_nanos = None;
        log::debug!("auto scroll started at {rate_px_per_second}px/s");
    }

    /// Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        self.last_frame_nanos = None;
        std::mem::take(&mut self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn auto_stop(&self) -> bool {
        self.auto_stop
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Distance covered by one nominal frame.
    pub fn rate_per_frame(&self) -> f32 {
        self.rate / FRAMES_PER_SECOND
    }

    /// Distance to scroll for the frame at `frame_time_nanos`, or `None` when
    /// not running. The first frame advances by one nominal frame.
    pub fn step(&mut self, frame_time_nanos: u64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let distance = match self.last_frame_nanos {
            Some(last) if frame_time_nanos > last => {
                self.rate * ((frame_time_nanos - last) as f32 / NANOS_PER_SECOND)
            }
            Some(_) => 0.0,
            None => self.rate_per_frame(),
        };
        self.last_frame_nanos = Some(frame_time_nanos);
        Some(distance)
    }
}
